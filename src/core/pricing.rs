use crate::domain::model::{Estimate, RateCatalog, ServiceCatalog, Urgency};
use crate::utils::error::{EstimateError, Result};
use std::sync::Arc;

/// 目錄中找不到 (領域, 服務) 時使用的工時
pub const DEFAULT_FALLBACK_HOURS: f64 = 0.0;

pub const LOW_FACTOR: f64 = 0.8;
pub const HIGH_FACTOR: f64 = 1.2;

/// 依服務目錄與費率表計算估價區間。純函式，不做任何外部呼叫。
///
/// 金額四捨五入到整數單位（`f64::round`，0.5 一律遠離零進位）。
#[derive(Debug, Clone)]
pub struct PricingCalculator {
    services: Arc<ServiceCatalog>,
    rates: Arc<RateCatalog>,
    fallback_hours: f64,
}

impl PricingCalculator {
    pub fn new(services: Arc<ServiceCatalog>, rates: Arc<RateCatalog>) -> Self {
        Self {
            services,
            rates,
            fallback_hours: DEFAULT_FALLBACK_HOURS,
        }
    }

    pub fn with_fallback_hours(mut self, hours: f64) -> Self {
        self.fallback_hours = hours;
        self
    }

    pub fn rates(&self) -> &RateCatalog {
        &self.rates
    }

    pub fn price(&self, domain: &str, service: &str, urgency: Urgency) -> Result<Estimate> {
        let hours = match self.services.hours(domain, service) {
            Some(hours) => checked_amount("hours", &format!("{}/{}", domain, service), hours)?,
            None => {
                tracing::debug!(
                    "No hours for '{}' / '{}', using fallback of {}",
                    domain,
                    service,
                    self.fallback_hours
                );
                checked_amount("fallback hours", "pricing.fallback_hours", self.fallback_hours)?
            }
        };

        let rate = checked_amount(
            "hourly rate",
            "standard_hourly_rate",
            self.rates.standard_hourly_rate,
        )?;
        let mut base = hours * rate;

        if urgency == Urgency::Urgent {
            base *= checked_amount(
                "urgency multiplier",
                "urgency_multiplier",
                self.rates.urgency_multiplier,
            )?;
        }

        if let Some(cap) = self.rates.fixed_price(service) {
            let cap = checked_amount("fixed price", service, cap)?;
            // 上限只會壓低價格
            if cap < base {
                tracing::debug!("Fixed price {} caps computed base {}", cap, base);
                base = cap;
            }
        }

        let low = to_whole_units(base * LOW_FACTOR)?;
        let high = to_whole_units(base * HIGH_FACTOR)?;

        Ok(Estimate { low, high })
    }
}

fn checked_amount(kind: &str, entry: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(EstimateError::PricingFailure {
            message: format!("invalid {} for '{}': {}", kind, entry, value),
        })
    }
}

fn to_whole_units(amount: f64) -> Result<i64> {
    let rounded = amount.round();
    if !rounded.is_finite() || rounded >= i64::MAX as f64 {
        return Err(EstimateError::PricingFailure {
            message: format!("amount out of range: {}", amount),
        });
    }
    Ok(rounded as i64)
}
