//! Core data types shared across the aggregation pipeline.
//!
//! Wire field names (`valuation_amount`, `sessionId`, snake_case statuses)
//! match what existing clients of the aggregation endpoint expect.

use serde::{Deserialize, Serialize};

/// Lower sanity bound for a parsed amount (exclusive).
pub const MIN_AMOUNT: f64 = 0.0;

/// Upper sanity bound for a parsed amount (exclusive). Values at or above
/// this are treated as misparsed tokens, not valuations.
pub const MAX_AMOUNT: f64 = 1_000_000_000.0;

/// Outcome of one source's extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationStatus {
    Success,
    NotAvailable,
    Error,
}

impl ValuationStatus {
    /// Stable text form, used for persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValuationStatus::Success => "success",
            ValuationStatus::NotAvailable => "not_available",
            ValuationStatus::Error => "error",
        }
    }
}

/// One source's valuation outcome.
///
/// Invariant: `valuation_amount` is present iff `status` is `Success`,
/// and then lies strictly inside (`MIN_AMOUNT`, `MAX_AMOUNT`). The
/// constructors below are the only way results are built, which keeps the
/// invariant out of every call site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Registry source name.
    pub source: String,

    /// Estimated amount in HKD.
    pub valuation_amount: Option<f64>,

    pub status: ValuationStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ValuationResult {
    /// A successful extraction with a parsed amount.
    pub fn success(source: impl Into<String>, amount: f64) -> Self {
        Self {
            source: source.into(),
            valuation_amount: Some(amount),
            status: ValuationStatus::Success,
            error_message: None,
        }
    }

    /// The source answered, but exposed no usable valuation.
    pub fn not_available(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            valuation_amount: None,
            status: ValuationStatus::NotAvailable,
            error_message: Some(message.into()),
        }
    }

    /// The source could not be queried (network failure, bad status,
    /// unreadable response).
    pub fn error(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            valuation_amount: None,
            status: ValuationStatus::Error,
            error_message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ValuationStatus::Success
    }
}

/// Summary statistics over the successful valuations of one aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
    pub highest: Option<f64>,
    pub lowest: Option<f64>,
    pub average: Option<f64>,
}

/// The full response for one aggregation call: one result per registry
/// source, in registry order, plus analytics.
#[derive(Debug, Clone, Serialize)]
pub struct AggregationResponse {
    pub valuations: Vec<ValuationResult>,
    pub analytics: Analytics,
    pub address: String,
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

/// One row of the append-only valuation log.
///
/// Rows are independent: no updates, no deletes, duplicate submissions
/// create duplicate rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationRecord {
    pub address: String,
    pub source: String,
    pub valuation_amount: Option<f64>,
    pub status: ValuationStatus,
    pub error_message: Option<String>,
    pub session_id: String,
}

impl ValuationRecord {
    /// Build the persisted row for one source's result.
    pub fn from_result(
        address: impl Into<String>,
        session_id: impl Into<String>,
        result: &ValuationResult,
    ) -> Self {
        Self {
            address: address.into(),
            source: result.source.clone(),
            valuation_amount: result.valuation_amount,
            status: result.status,
            error_message: result.error_message.clone(),
            session_id: session_id.into(),
        }
    }
}
