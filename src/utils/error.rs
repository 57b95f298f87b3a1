use thiserror::Error;

#[derive(Error, Debug)]
pub enum EstimateError {
    #[error("Oracle unavailable: {reason}")]
    OracleUnavailable { reason: String },

    #[error("Pricing failure: {message}")]
    PricingFailure { message: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Catalog error in '{path}': {message}")]
    CatalogError { path: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Oracle,
    Pricing,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EstimateError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EstimateError::OracleUnavailable { .. } | EstimateError::ApiError(_) => {
                ErrorCategory::Oracle
            }
            EstimateError::PricingFailure { .. } => ErrorCategory::Pricing,
            EstimateError::CatalogError { .. }
            | EstimateError::ConfigError { .. }
            | EstimateError::MissingConfigError { .. }
            | EstimateError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            EstimateError::IoError(_) | EstimateError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 外部服務暫時不可用，可重試
            ErrorCategory::Oracle => ErrorSeverity::Medium,
            ErrorCategory::Pricing => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, EstimateError::OracleUnavailable { .. })
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EstimateError::OracleUnavailable { .. } | EstimateError::ApiError(_) => {
                "Check network connectivity and that the API key is valid, then try again"
                    .to_string()
            }
            EstimateError::PricingFailure { .. } => {
                "Check the rate and service catalogs for negative or non-numeric entries"
                    .to_string()
            }
            EstimateError::CatalogError { path, .. } => {
                format!("Fix the catalog file '{}' (JSON or TOML expected)", path)
            }
            EstimateError::MissingConfigError { field } => {
                format!("Provide a value for '{}'", field)
            }
            EstimateError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}' in the configuration", field)
            }
            EstimateError::ConfigError { .. } => "Review the configuration file".to_string(),
            EstimateError::IoError(_) => "Check file paths and permissions".to_string(),
            EstimateError::SerializationError(_) => {
                "Report this issue; the data could not be serialized".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EstimateError::OracleUnavailable { .. } | EstimateError::ApiError(_) => {
                "The classification service could not be reached; no estimate was produced"
                    .to_string()
            }
            EstimateError::PricingFailure { .. } => {
                "The price could not be computed from the current catalogs".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EstimateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oracle_errors_are_retryable_and_medium() {
        let err = EstimateError::OracleUnavailable {
            reason: "connection refused".to_string(),
        };
        assert!(err.is_retryable());
        assert_eq!(err.category(), ErrorCategory::Oracle);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_pricing_failure_is_not_retryable() {
        let err = EstimateError::PricingFailure {
            message: "negative rate".to_string(),
        };
        assert!(!err.is_retryable());
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("negative rate"));
    }

    #[test]
    fn test_missing_config_suggestion_names_field() {
        let err = EstimateError::MissingConfigError {
            field: "OPENAI_API_KEY".to_string(),
        };
        assert!(err.recovery_suggestion().contains("OPENAI_API_KEY"));
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }
}
