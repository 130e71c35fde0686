//! Property Valuation Aggregation Library
//!
//! Queries a fixed registry of Hong Kong banks and property-data
//! providers for one valuation estimate each, normalizes every outcome
//! into a [`ValuationResult`], appends each result to a persistent log,
//! and reduces the successes into summary analytics.
//!
//! Two interchangeable extraction strategies share one contract: asking a
//! text-generation model for each source's figure, or scraping the
//! source's public valuation page. The strategy is chosen when the
//! [`Aggregator`] is wired; sources are processed sequentially in
//! registry order.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sonar_client::SonarClient;
//! use valuation::{Aggregator, MemoryValuationStore, ModelQueryExtractor, Registry};
//!
//! let extractor = Arc::new(ModelQueryExtractor::new(SonarClient::new("pplx-...")));
//! let store = Arc::new(MemoryValuationStore::new());
//! let aggregator = Aggregator::new(Registry::model_query(), extractor, store);
//!
//! let response = aggregator
//!     .aggregate("8 Finance Street, Central", "session-1")
//!     .await?;
//! ```
//!
//! # Modules
//!
//! - [`sources`] - The static source registry
//! - [`extract`] - The `Extractor` trait and both strategies
//! - [`aggregate`] - The sequential orchestrator
//! - [`analytics`] - Highest/lowest/average reduction
//! - [`store`] - Insert-only valuation log (Postgres, memory)
//! - [`parse`] - Numeric-token and sentinel parsing
//! - [`testing`] - Mock implementations for tests

pub mod aggregate;
pub mod analytics;
pub mod error;
pub mod extract;
pub mod parse;
pub mod sources;
pub mod store;
pub mod testing;
pub mod types;

// Re-export core types at crate root
pub use aggregate::Aggregator;
pub use analytics::summarize;
pub use error::{Result, ValuationError};
pub use extract::{Extractor, ModelQueryExtractor, PageFetchExtractor};
pub use sources::{QueryTarget, Registry, ValuationSource};
pub use store::{MemoryValuationStore, ValuationStore};
pub use types::{
    AggregationResponse, Analytics, ValuationRecord, ValuationResult, ValuationStatus,
};

#[cfg(feature = "postgres")]
pub use store::PostgresValuationStore;
