//! In-memory storage implementation for testing and development.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::error::Result;
use crate::store::ValuationStore;
use crate::types::ValuationRecord;

/// In-memory valuation log.
///
/// Useful for testing and development. Not suitable for production as
/// rows are lost on restart.
#[derive(Default)]
pub struct MemoryValuationStore {
    records: RwLock<Vec<ValuationRecord>>,
}

impl MemoryValuationStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// All rows inserted so far, in insertion order.
    pub fn records(&self) -> Vec<ValuationRecord> {
        self.records.read().unwrap().clone()
    }

    /// Number of rows inserted.
    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    /// True when no rows have been inserted.
    pub fn is_empty(&self) -> bool {
        self.records.read().unwrap().is_empty()
    }

    /// Clear all rows.
    pub fn clear(&self) {
        self.records.write().unwrap().clear();
    }
}

#[async_trait]
impl ValuationStore for MemoryValuationStore {
    async fn insert(&self, record: &ValuationRecord) -> Result<()> {
        self.records.write().unwrap().push(record.clone());
        Ok(())
    }
}
