//! Extraction strategies.
//!
//! Both strategies conform to one contract: given a source and an
//! address, produce exactly one `ValuationResult`. Extraction never fails
//! outright; network errors, bad statuses, and unparsable content are all
//! normalized into results with status `error` or `not_available`, so the
//! orchestrator can keep iterating the registry.

mod model_query;
mod page_fetch;

pub use model_query::ModelQueryExtractor;
pub use page_fetch::PageFetchExtractor;

use async_trait::async_trait;

use crate::sources::ValuationSource;
use crate::types::ValuationResult;

/// A strategy for obtaining one source's valuation estimate.
///
/// Implementations wrap a specific upstream (a text-generation provider,
/// the source's public web page) and handle the specifics of querying and
/// response parsing.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Produce one result for `source`. Must not fail: every failure path
    /// resolves to a result with status `error`.
    async fn extract(&self, source: &ValuationSource, address: &str) -> ValuationResult;

    /// Short strategy name for logs.
    fn name(&self) -> &str;
}
