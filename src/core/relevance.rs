use crate::core::consensus::Consensus;
use crate::domain::model::{AggregatedResult, ServiceCatalog};

/// 檢查彙整結果是否落在服務目錄內，避免分類器自創的組合被當成正式估價
pub struct RelevanceValidator<'a> {
    catalog: &'a ServiceCatalog,
}

impl<'a> RelevanceValidator<'a> {
    pub fn new(catalog: &'a ServiceCatalog) -> Self {
        Self { catalog }
    }

    pub fn validate(&self, is_legal: bool, domain: &str, service: &str) -> bool {
        is_legal && self.catalog.has_domain(domain) && self.catalog.contains(domain, service)
    }

    pub fn resolve(&self, consensus: Consensus) -> AggregatedResult {
        let is_relevant =
            self.validate(consensus.is_legal, &consensus.domain, &consensus.service);

        if consensus.is_legal && !is_relevant {
            tracing::warn!(
                "⚠️ Classification '{}' / '{}' is not in the service catalog",
                consensus.domain,
                consensus.service
            );
        }

        AggregatedResult {
            domain: consensus.domain,
            service: consensus.service,
            confidence: consensus.confidence,
            is_relevant,
            samples_used: consensus.samples,
        }
    }
}
