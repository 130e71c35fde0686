//! Testing utilities including mock implementations.
//!
//! These are useful for testing aggregation logic without making real
//! network calls or touching a database.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, RwLock,
};

use crate::error::{Result, ValuationError};
use crate::extract::Extractor;
use crate::sources::ValuationSource;
use crate::store::ValuationStore;
use crate::types::{ValuationRecord, ValuationResult};

/// A mock extractor returning scripted results per source name.
///
/// Unscripted sources get a deterministic `not_available` result. Calls
/// are recorded for assertions.
#[derive(Default)]
pub struct MockExtractor {
    results: Arc<RwLock<HashMap<String, ValuationResult>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockExtractor {
    /// Create a new mock with default behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a result for a source name.
    pub fn with_result(self, source: impl Into<String>, result: ValuationResult) -> Self {
        self.results.write().unwrap().insert(source.into(), result);
        self
    }

    /// Source names extracted so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Number of extract calls made.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl Extractor for MockExtractor {
    async fn extract(&self, source: &ValuationSource, _address: &str) -> ValuationResult {
        self.calls.write().unwrap().push(source.name.clone());

        self.results
            .read()
            .unwrap()
            .get(&source.name)
            .cloned()
            .unwrap_or_else(|| ValuationResult::not_available(&source.name, "no scripted result"))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// A store whose inserts always fail, for exercising the best-effort
/// persistence path. Attempts are counted.
#[derive(Default)]
pub struct FailingStore {
    attempts: AtomicUsize,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of insert attempts made.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ValuationStore for FailingStore {
    async fn insert(&self, _record: &ValuationRecord) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(ValuationError::Storage("simulated insert failure".into()))
    }
}
