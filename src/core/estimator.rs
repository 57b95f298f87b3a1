use crate::core::consensus;
use crate::core::parser;
use crate::core::pricing::PricingCalculator;
use crate::core::prompt::build_prompt;
use crate::core::relevance::RelevanceValidator;
use crate::domain::model::{
    AggregatedResult, EstimateResponse, RateCatalog, RequesterType, ServiceCatalog, Urgency,
};
use crate::domain::ports::Classifier;
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_SAMPLES: usize = 3;

/// 分類服務無法連線時的整體重試設定（分類器本身不重試）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

pub struct Estimator<C: Classifier> {
    classifier: C,
    services: Arc<ServiceCatalog>,
    pricing: PricingCalculator,
    samples: usize,
    retry: RetryPolicy,
}

impl<C: Classifier> Estimator<C> {
    pub fn new(classifier: C, services: Arc<ServiceCatalog>, rates: Arc<RateCatalog>) -> Self {
        let pricing = PricingCalculator::new(Arc::clone(&services), rates);
        Self {
            classifier,
            services,
            pricing,
            samples: DEFAULT_SAMPLES,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_fallback_hours(mut self, hours: f64) -> Self {
        self.pricing = self.pricing.with_fallback_hours(hours);
        self
    }

    pub fn rates(&self) -> &RateCatalog {
        self.pricing.rates()
    }

    pub async fn estimate(
        &self,
        question: &str,
        requester: RequesterType,
        urgency: Urgency,
    ) -> Result<EstimateResponse> {
        tracing::info!(
            "🔎 Estimating fee (requester: {}, urgency: {}, samples: {})",
            requester,
            urgency,
            self.samples
        );

        let prompt = build_prompt(&self.services, question, requester)?;
        let raw_responses = self.sample_with_retry(&prompt).await?;
        tracing::debug!("Received {} raw samples", raw_responses.len());

        let result = self.classify(&raw_responses);
        if result.classification_failed() {
            tracing::warn!("⚠️ Classification failed: no usable samples");
        }

        let estimate = self
            .pricing
            .price(&result.domain, &result.service, urgency)?;

        tracing::info!(
            "✅ Estimate ready: {}-{} (domain: '{}', service: '{}', confidence: {:.2}, relevant: {})",
            estimate.low,
            estimate.high,
            result.domain,
            result.service,
            result.confidence,
            result.is_relevant
        );

        Ok(EstimateResponse::new(result, estimate))
    }

    /// 解析、彙整並驗證一批原始回應
    pub fn classify<S: AsRef<str>>(&self, raw_responses: &[S]) -> AggregatedResult {
        let records = parser::parse_all(raw_responses);
        let consensus = consensus::aggregate(&records);
        RelevanceValidator::new(&self.services).resolve(consensus)
    }

    async fn sample_with_retry(&self, prompt: &str) -> Result<Vec<String>> {
        let mut attempt = 0;
        loop {
            match self.classifier.sample(prompt, self.samples).await {
                Ok(responses) => return Ok(responses),
                Err(e) if e.is_retryable() && attempt < self.retry.attempts => {
                    attempt += 1;
                    tracing::warn!(
                        "🔄 {} (retry {}/{} in {:?})",
                        e,
                        attempt,
                        self.retry.attempts,
                        self.retry.delay
                    );
                    tokio::time::sleep(self.retry.delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
