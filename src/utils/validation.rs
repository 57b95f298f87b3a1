use crate::utils::error::{EstimateError, Result};
use std::path::Path;
use url::Url;

/// 目錄檔只接受這兩種格式
pub const CATALOG_EXTENSIONS: [&str; 2] = ["json", "toml"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> EstimateError {
    EstimateError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// 分類服務端點必須是 http(s) URL
pub fn validate_endpoint(field: &str, endpoint: &str) -> Result<()> {
    let url = Url::parse(endpoint)
        .map_err(|e| invalid(field, endpoint, format!("Invalid URL format: {}", e)))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(
            field,
            endpoint,
            format!("Unsupported URL scheme: {}", scheme),
        )),
    }
}

/// 目錄路徑不可為空，副檔名決定解析格式
pub fn validate_catalog_path(field: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(invalid(field, path, "Path cannot be empty"));
    }

    match Path::new(path).extension().and_then(|ext| ext.to_str()) {
        Some(ext) if CATALOG_EXTENSIONS.contains(&ext) => Ok(()),
        _ => Err(invalid(
            field,
            path,
            format!("Catalog must be one of: {}", CATALOG_EXTENSIONS.join(", ")),
        )),
    }
}

pub fn validate_at_least(field: &str, value: u64, min: u64) -> Result<()> {
    if value < min {
        return Err(invalid(field, value, format!("Value must be at least {}", min)));
    }
    Ok(())
}

pub fn validate_non_empty_string(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, value, "Value cannot be empty or whitespace-only"));
    }
    Ok(())
}

/// 浮點數範圍檢查；NaN 不會通過任一比較，需另外排除
pub fn validate_range(field: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if !(value >= min && value <= max) {
        return Err(invalid(
            field,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| EstimateError::MissingConfigError {
        field: field.to_string(),
    })
}
