pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, OutputFormat};

pub use adapters::OpenAiClassifier;
pub use config::{CatalogSet, EstimatorConfig};
pub use crate::core::{estimator::Estimator, pricing::PricingCalculator};
pub use domain::model::{EstimateResponse, RequesterType, Urgency};
pub use domain::ports::Classifier;
pub use utils::error::{EstimateError, Result};
