use crate::core::estimator::{RetryPolicy, DEFAULT_SAMPLES};
use crate::core::pricing::DEFAULT_FALLBACK_HOURS;
use crate::utils::error::{EstimateError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub oracle: OracleConfig,
    pub catalog: CatalogConfig,
    pub pricing: PricingConfig,
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub endpoint: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
    pub samples: usize,
    pub api_key_env: String,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.2,
            max_tokens: 150,
            timeout_seconds: 30,
            samples: DEFAULT_SAMPLES,
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub services_path: String,
    pub rates_path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            services_path: "data/services.json".to_string(),
            rates_path: "data/rates.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub fallback_hours: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            fallback_hours: DEFAULT_FALLBACK_HOURS,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub attempts: u32,
    pub delay_ms: u64,
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.attempts,
            delay: Duration::from_millis(self.delay_ms),
        }
    }
}

impl OracleConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// 讀取 API 金鑰；缺少或空白都視為設定錯誤
    pub fn api_key(&self) -> Result<String> {
        let value = std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
        validation::validate_required_field(&self.api_key_env, &value).cloned()
    }
}

impl EstimatorConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EstimateError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EstimateError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CATALOG_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| EstimateError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for EstimatorConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_endpoint("oracle.endpoint", &self.oracle.endpoint)?;
        validation::validate_non_empty_string("oracle.model", &self.oracle.model)?;
        validation::validate_non_empty_string("oracle.api_key_env", &self.oracle.api_key_env)?;
        validation::validate_range("oracle.temperature", self.oracle.temperature, 0.0, 2.0)?;
        validation::validate_at_least("oracle.samples", self.oracle.samples as u64, 1)?;
        validation::validate_at_least("oracle.max_tokens", u64::from(self.oracle.max_tokens), 1)?;
        validation::validate_at_least("oracle.timeout_seconds", self.oracle.timeout_seconds, 1)?;

        validation::validate_catalog_path("catalog.services_path", &self.catalog.services_path)?;
        validation::validate_catalog_path("catalog.rates_path", &self.catalog.rates_path)?;

        validation::validate_range(
            "pricing.fallback_hours",
            self.pricing.fallback_hours,
            0.0,
            f64::MAX,
        )?;

        Ok(())
    }
}
