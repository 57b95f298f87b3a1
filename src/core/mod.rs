pub mod consensus;
pub mod estimator;
pub mod parser;
pub mod pricing;
pub mod prompt;
pub mod relevance;
pub mod report;

pub use crate::domain::model::{
    AggregatedResult, ClassificationRecord, Estimate, EstimateResponse, RateCatalog,
    RequesterType, ServiceCatalog, Urgency,
};
pub use crate::domain::ports::Classifier;
pub use crate::utils::error::Result;
