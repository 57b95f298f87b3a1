pub mod catalog;
#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

pub use catalog::CatalogSet;
#[cfg(feature = "cli")]
pub use cli::{CliConfig, OutputFormat};
pub use toml_config::{EstimatorConfig, OracleConfig};
