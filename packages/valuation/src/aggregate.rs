//! The aggregation orchestrator.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::analytics::summarize;
use crate::error::{Result, ValuationError};
use crate::extract::Extractor;
use crate::sources::Registry;
use crate::store::ValuationStore;
use crate::types::{AggregationResponse, ValuationRecord};

/// Iterates the source registry in declared order, one extraction at a
/// time, persisting every result as a best-effort side effect.
///
/// Sequential processing bounds load on any downstream dependency and
/// keeps response order deterministic; total latency scales linearly with
/// source count.
pub struct Aggregator {
    registry: Registry,
    extractor: Arc<dyn Extractor>,
    store: Arc<dyn ValuationStore>,
}

impl std::fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl Aggregator {
    /// Wire an aggregator from its collaborators. Everything is injected;
    /// nothing is global.
    pub fn new(
        registry: Registry,
        extractor: Arc<dyn Extractor>,
        store: Arc<dyn ValuationStore>,
    ) -> Self {
        Self {
            registry,
            extractor,
            store,
        }
    }

    /// The registry this aggregator iterates.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Run one aggregation: one result per registry source, in registry
    /// order, plus analytics over the successes.
    ///
    /// Fails only on invalid input. Per-source failures surface inside
    /// the response; a failed log insert is logged and otherwise ignored.
    pub async fn aggregate(&self, address: &str, session_id: &str) -> Result<AggregationResponse> {
        let address = address.trim();
        let session_id = session_id.trim();

        if address.is_empty() || session_id.is_empty() {
            return Err(ValuationError::Validation(
                "Address and sessionId are required".to_string(),
            ));
        }

        info!(
            address = %address,
            session_id = %session_id,
            sources = self.registry.len(),
            extractor = self.extractor.name(),
            "aggregation started"
        );

        let mut valuations = Vec::with_capacity(self.registry.len());

        for source in self.registry.sources() {
            let result = self.extractor.extract(source, address).await;
            debug!(source = %source.name, status = result.status.as_str(), "source processed");

            let record = ValuationRecord::from_result(address, session_id, &result);
            if let Err(e) = self.store.insert(&record).await {
                // Best-effort side channel: a failed insert never drops
                // the result from the response or stops the loop.
                warn!(source = %source.name, error = %e, "failed to persist valuation row");
            }

            valuations.push(result);
        }

        let analytics = summarize(&valuations);

        info!(
            address = %address,
            successes = valuations.iter().filter(|v| v.is_success()).count(),
            "aggregation finished"
        );

        Ok(AggregationResponse {
            valuations,
            analytics,
            address: address.to_string(),
            session_id: session_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryValuationStore;
    use crate::testing::{FailingStore, MockExtractor};
    use crate::types::{ValuationResult, ValuationStatus};

    fn scripted_extractor() -> MockExtractor {
        MockExtractor::new()
            .with_result(
                "HSBC Hong Kong",
                ValuationResult::success("HSBC Hong Kong", 8_000_000.0),
            )
            .with_result(
                "Hang Seng Bank",
                ValuationResult::error("Hang Seng Bank", "request timeout"),
            )
            .with_result(
                "Centaline Property",
                ValuationResult::success("Centaline Property", 7_000_000.0),
            )
    }

    #[tokio::test]
    async fn test_one_result_per_source_in_registry_order() {
        let extractor = Arc::new(scripted_extractor());
        let store = Arc::new(MemoryValuationStore::new());
        let aggregator =
            Aggregator::new(Registry::model_query(), extractor.clone(), store.clone());

        let response = aggregator.aggregate("1 Queen's Road", "s-1").await.unwrap();

        assert_eq!(response.valuations.len(), 5);
        let names: Vec<_> = response.valuations.iter().map(|v| v.source.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "HSBC Hong Kong",
                "Hang Seng Bank",
                "Bank of China (Hong Kong)",
                "Standard Chartered Hong Kong",
                "Centaline Property",
            ]
        );
        assert_eq!(extractor.calls(), names);
    }

    #[tokio::test]
    async fn test_every_result_is_persisted_including_failures() {
        let extractor = Arc::new(scripted_extractor());
        let store = Arc::new(MemoryValuationStore::new());
        let aggregator = Aggregator::new(Registry::model_query(), extractor, store.clone());

        aggregator.aggregate("1 Queen's Road", "s-1").await.unwrap();

        let records = store.records();
        assert_eq!(records.len(), 5);
        assert_eq!(records[1].status, ValuationStatus::Error);
        assert!(records.iter().all(|r| r.session_id == "s-1"));
        assert!(records.iter().all(|r| r.address == "1 Queen's Road"));
    }

    #[tokio::test]
    async fn test_analytics_over_successes() {
        let extractor = Arc::new(scripted_extractor());
        let store = Arc::new(MemoryValuationStore::new());
        let aggregator = Aggregator::new(Registry::model_query(), extractor, store);

        let response = aggregator.aggregate("1 Queen's Road", "s-1").await.unwrap();

        assert_eq!(response.analytics.highest, Some(8_000_000.0));
        assert_eq!(response.analytics.lowest, Some(7_000_000.0));
        assert_eq!(response.analytics.average, Some(7_500_000.0));
    }

    #[tokio::test]
    async fn test_store_failure_keeps_results_and_continues() {
        let extractor = Arc::new(scripted_extractor());
        let store = Arc::new(FailingStore::new());
        let aggregator = Aggregator::new(Registry::model_query(), extractor, store.clone());

        let response = aggregator.aggregate("1 Queen's Road", "s-1").await.unwrap();

        assert_eq!(response.valuations.len(), 5);
        assert_eq!(store.attempts(), 5);
    }

    #[tokio::test]
    async fn test_empty_address_is_rejected_before_any_work() {
        let extractor = Arc::new(MockExtractor::new());
        let store = Arc::new(MemoryValuationStore::new());
        let aggregator = Aggregator::new(Registry::model_query(), extractor.clone(), store.clone());

        let err = aggregator.aggregate("   ", "s-1").await.unwrap_err();

        assert!(matches!(err, ValuationError::Validation(_)));
        assert_eq!(err.to_string(), "validation error: Address and sessionId are required");
        assert_eq!(extractor.call_count(), 0);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_empty_session_id_is_rejected() {
        let extractor = Arc::new(MockExtractor::new());
        let store = Arc::new(MemoryValuationStore::new());
        let aggregator = Aggregator::new(Registry::model_query(), extractor.clone(), store);

        let err = aggregator.aggregate("1 Queen's Road", "").await.unwrap_err();

        assert!(matches!(err, ValuationError::Validation(_)));
        assert_eq!(extractor.call_count(), 0);
    }

    #[tokio::test]
    async fn test_address_and_session_are_trimmed() {
        let extractor = Arc::new(scripted_extractor());
        let store = Arc::new(MemoryValuationStore::new());
        let aggregator = Aggregator::new(Registry::model_query(), extractor, store.clone());

        let response = aggregator
            .aggregate("  1 Queen's Road  ", " s-1 ")
            .await
            .unwrap();

        assert_eq!(response.address, "1 Queen's Road");
        assert_eq!(response.session_id, "s-1");
        assert!(store.records().iter().all(|r| r.address == "1 Queen's Road"));
    }
}
