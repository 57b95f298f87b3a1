use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 服務目錄：法律領域 → (服務 → 預估工時)
///
/// 同時也是分類器唯一允許的詞彙，會序列化進提示詞中。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceCatalog {
    domains: BTreeMap<String, BTreeMap<String, f64>>,
}

impl ServiceCatalog {
    pub fn new(domains: BTreeMap<String, BTreeMap<String, f64>>) -> Self {
        Self { domains }
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn hours(&self, domain: &str, service: &str) -> Option<f64> {
        self.domains.get(domain)?.get(service).copied()
    }

    pub fn has_domain(&self, domain: &str) -> bool {
        self.domains.contains_key(domain)
    }

    pub fn contains(&self, domain: &str, service: &str) -> bool {
        self.hours(domain, service).is_some()
    }

    /// 只列出名稱（不含工時），作為分類器的選項集合
    pub fn options(&self) -> BTreeMap<&str, Vec<&str>> {
        self.domains
            .iter()
            .map(|(domain, services)| {
                (
                    domain.as_str(),
                    services.keys().map(String::as_str).collect(),
                )
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateCatalog {
    pub standard_hourly_rate: f64,
    pub urgency_multiplier: f64,
    /// 服務名稱 → 固定價格上限
    pub fixed_prices: BTreeMap<String, f64>,
    pub initial_consultation_fee: f64,
}

impl Default for RateCatalog {
    fn default() -> Self {
        Self {
            standard_hourly_rate: 0.0,
            urgency_multiplier: 1.0,
            fixed_prices: BTreeMap::new(),
            initial_consultation_fee: 100.0,
        }
    }
}

impl RateCatalog {
    pub fn fixed_price(&self, service: &str) -> Option<f64> {
        self.fixed_prices.get(service).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum RequesterType {
    #[default]
    Individual,
    Business,
}

impl fmt::Display for RequesterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequesterType::Individual => write!(f, "Individual"),
            RequesterType::Business => write!(f, "Business"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[default]
    Normal,
    Urgent,
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Urgency::Normal => write!(f, "Normal"),
            Urgency::Urgent => write!(f, "Urgent"),
        }
    }
}

/// 單次分類器回應解析後的結果，只存在於一次彙整過程中
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassificationRecord {
    pub is_legal: bool,
    pub domain: String,
    pub service: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedResult {
    pub domain: String,
    pub service: String,
    pub confidence: f64,
    pub is_relevant: bool,
    pub samples_used: usize,
}

impl AggregatedResult {
    /// 沒有任何有效樣本時的終止狀態
    pub fn classification_failed(&self) -> bool {
        self.samples_used == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Estimate {
    pub low: i64,
    pub high: i64,
}

pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Advisory {
    LowConfidence,
    NotRelevant,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateResponse {
    pub domain: String,
    pub service: String,
    pub confidence: f64,
    pub is_relevant: bool,
    pub low: i64,
    pub high: i64,
    pub samples_used: usize,
}

impl EstimateResponse {
    pub fn new(result: AggregatedResult, estimate: Estimate) -> Self {
        Self {
            domain: result.domain,
            service: result.service,
            confidence: result.confidence,
            is_relevant: result.is_relevant,
            low: estimate.low,
            high: estimate.high,
            samples_used: result.samples_used,
        }
    }

    pub fn classification_failed(&self) -> bool {
        self.samples_used == 0
    }

    /// 低信心優先於不相關
    pub fn advisory(&self) -> Option<Advisory> {
        if self.confidence < LOW_CONFIDENCE_THRESHOLD {
            Some(Advisory::LowConfidence)
        } else if !self.is_relevant {
            Some(Advisory::NotRelevant)
        } else {
            None
        }
    }
}
