//! Valuation log storage.
//!
//! Insert-only: every aggregation appends one row per source, regardless
//! of extraction outcome. No reads happen here; reporting over the log is
//! a separate concern.

mod memory;
#[cfg(feature = "postgres")]
mod postgres;

pub use memory::MemoryValuationStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresValuationStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::ValuationRecord;

/// Append-only store for valuation rows.
#[async_trait]
pub trait ValuationStore: Send + Sync {
    /// Append one record. Rows are independent, so concurrent inserts
    /// need no coordination.
    async fn insert(&self, record: &ValuationRecord) -> Result<()>;
}
