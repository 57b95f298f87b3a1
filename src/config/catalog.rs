use crate::domain::model::{RateCatalog, ServiceCatalog};
use crate::utils::error::{EstimateError, Result};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;

/// 啟動時載入一次、之後唯讀共享的兩份目錄
#[derive(Debug, Clone, Default)]
pub struct CatalogSet {
    pub services: Arc<ServiceCatalog>,
    pub rates: Arc<RateCatalog>,
    degraded: bool,
}

impl CatalogSet {
    pub fn new(services: ServiceCatalog, rates: RateCatalog) -> Self {
        Self {
            services: Arc::new(services),
            rates: Arc::new(rates),
            degraded: false,
        }
    }

    /// 任一目錄檔案不存在時以空目錄代替，並標記為降級模式
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(services_path: P, rates_path: Q) -> Result<Self> {
        let services = load_catalog::<ServiceCatalog>(services_path.as_ref())?;
        let rates = load_catalog::<RateCatalog>(rates_path.as_ref())?;
        let degraded = services.is_none() || rates.is_none();

        let catalogs = Self {
            services: Arc::new(services.unwrap_or_default()),
            rates: Arc::new(rates.unwrap_or_default()),
            degraded,
        };

        if catalogs.degraded {
            tracing::warn!("⚠️ Running with degraded catalogs; estimates may be zero");
        } else {
            tracing::info!("📚 Catalogs loaded");
        }
        Ok(catalogs)
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }
}

/// 依副檔名解析 JSON 或 TOML；檔案不存在時回傳 `None`
fn load_catalog<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let shown = path.display().to_string();

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("⚠️ Catalog not found: {}", shown);
            return Ok(None);
        }
        Err(e) => return Err(EstimateError::IoError(e)),
    };

    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    let parsed = match extension {
        "json" => serde_json::from_str(&content).map_err(|e| e.to_string()),
        "toml" => toml::from_str(&content).map_err(|e| e.to_string()),
        other => Err(format!("unsupported catalog format '{}'", other)),
    };

    parsed
        .map(Some)
        .map_err(|message| EstimateError::CatalogError {
            path: shown,
            message,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, TempDir};

    fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_json_catalogs() {
        let dir = TempDir::new().unwrap();
        let services = write_file(
            &dir,
            "services.json",
            r#"{"Family law": {"Divorce": 10, "Custody": 6.5}}"#,
        );
        let rates = write_file(
            &dir,
            "rates.json",
            r#"{"standard_hourly_rate": 150, "urgency_multiplier": 1.3,
                "fixed_prices": {"Divorce": 1200}}"#,
        );

        let catalogs = CatalogSet::load(&services, &rates).unwrap();

        assert!(!catalogs.is_degraded());
        assert_eq!(catalogs.services.hours("Family law", "Custody"), Some(6.5));
        assert_eq!(catalogs.rates.standard_hourly_rate, 150.0);
        assert_eq!(catalogs.rates.fixed_price("Divorce"), Some(1200.0));
    }

    #[test]
    fn test_load_toml_catalogs() {
        let dir = TempDir::new().unwrap();
        let services = write_file(
            &dir,
            "services.toml",
            "[\"Labour law\"]\nDismissal = 8.0\n",
        );
        let rates = write_file(
            &dir,
            "rates.toml",
            "standard_hourly_rate = 120.0\n\n[fixed_prices]\nDismissal = 900.0\n",
        );

        let catalogs = CatalogSet::load(&services, &rates).unwrap();

        assert_eq!(catalogs.services.hours("Labour law", "Dismissal"), Some(8.0));
        assert_eq!(catalogs.rates.urgency_multiplier, 1.0);
        assert_eq!(catalogs.rates.fixed_price("Dismissal"), Some(900.0));
    }

    #[test]
    fn test_missing_files_degrade_to_empty() {
        let dir = TempDir::new().unwrap();
        let catalogs = CatalogSet::load(
            dir.path().join("missing-services.json"),
            dir.path().join("missing-rates.json"),
        )
        .unwrap();

        assert!(catalogs.is_degraded());
        assert!(catalogs.services.is_empty());
        assert_eq!(catalogs.rates.standard_hourly_rate, 0.0);
    }

    #[test]
    fn test_one_missing_catalog_keeps_the_other() {
        let dir = TempDir::new().unwrap();
        let rates = write_file(&dir, "rates.json", r#"{"standard_hourly_rate": 90}"#);

        let catalogs = CatalogSet::load(dir.path().join("services.json"), &rates).unwrap();

        assert!(catalogs.is_degraded());
        assert!(catalogs.services.is_empty());
        assert_eq!(catalogs.rates.standard_hourly_rate, 90.0);
    }

    #[test]
    fn test_malformed_catalog_is_error() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(b"{\"Family law\": {\"Divorce\": \"ten\"}}").unwrap();

        let dir = TempDir::new().unwrap();
        let result = CatalogSet::load(file.path(), dir.path().join("rates.json"));

        assert!(matches!(result, Err(EstimateError::CatalogError { .. })));
    }

    #[test]
    fn test_unsupported_extension_is_error() {
        let dir = TempDir::new().unwrap();
        let services = write_file(&dir, "services.yaml", "Family law: {}");
        let result = CatalogSet::load(&services, dir.path().join("rates.json"));
        assert!(matches!(result, Err(EstimateError::CatalogError { .. })));
    }
}
