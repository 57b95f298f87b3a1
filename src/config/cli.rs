use crate::config::toml_config::EstimatorConfig;
use crate::domain::model::{RequesterType, Urgency};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "fee-estimator")]
#[command(about = "Estimate the fee range of a legal service from a free-text description")]
pub struct CliConfig {
    /// Description of the situation
    #[arg(num_args = 1.., required_unless_present = "question_text")]
    pub question: Vec<String>,

    /// Description of the situation, as a single option value
    #[arg(long = "question", value_name = "TEXT", conflicts_with = "question")]
    pub question_text: Option<String>,

    #[arg(long, value_enum, default_value_t = RequesterType::Individual)]
    pub requester: RequesterType,

    #[arg(long, value_enum, default_value_t = Urgency::Normal)]
    pub urgency: Urgency,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the service catalog path
    #[arg(long)]
    pub services: Option<String>,

    /// Override the rate catalog path
    #[arg(long)]
    pub rates: Option<String>,

    /// Override the number of classification samples
    #[arg(long)]
    pub samples: Option<usize>,

    /// Override the classification model
    #[arg(long)]
    pub model: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    pub fn question(&self) -> String {
        match &self.question_text {
            Some(text) => text.clone(),
            None => self.question.join(" "),
        }
    }

    /// 命令列參數優先於設定檔
    pub fn apply_overrides(&self, config: &mut EstimatorConfig) {
        if let Some(services) = &self.services {
            config.catalog.services_path = services.clone();
        }
        if let Some(rates) = &self.rates {
            config.catalog.rates_path = rates.clone();
        }
        if let Some(samples) = self.samples {
            config.oracle.samples = samples;
        }
        if let Some(model) = &self.model {
            config.oracle.model = model.clone();
        }
    }
}
