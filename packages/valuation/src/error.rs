//! Typed errors for the valuation library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Per-source extraction
//! failures are NOT errors here: the extractor boundary normalizes them
//! into `ValuationResult`s with status `error` so one bad source never
//! aborts an aggregation.

use thiserror::Error;

/// Errors that can escape the aggregation pipeline.
#[derive(Debug, Error)]
pub enum ValuationError {
    /// Malformed or missing request fields. Surfaced as a client error,
    /// never retried, never persisted as a valuation row.
    #[error("validation error: {0}")]
    Validation(String),

    /// Missing required external credentials. Raised before any source
    /// processing begins.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Storage operation failed. The orchestrator treats these as
    /// best-effort per record and keeps going.
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Any unexpected failure outside the above.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for valuation operations.
pub type Result<T> = std::result::Result<T, ValuationError>;
