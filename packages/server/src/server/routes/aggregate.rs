//! The aggregation endpoint.
//!
//! POST /aggregate with `{address, sessionId}`; returns one result per
//! registry source plus summary analytics.

use axum::{extract::Extension, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use valuation::{AggregationResponse, ValuationError};

use crate::server::app::AppState;

/// Wire shape of the request body. Fields default to empty so a missing
/// field reports the same 400 as an empty one.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AggregateBody {
    pub address: String,
    pub session_id: String,
}

/// Aggregation handler.
///
/// Maps the library's error taxonomy onto HTTP: validation → 400,
/// configuration → 500, anything unexpected → 500 with the underlying
/// message.
pub async fn aggregate_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<AggregateBody>,
) -> Result<Json<AggregationResponse>, (StatusCode, Json<Value>)> {
    let aggregator = state
        .aggregator
        .as_ref()
        .map_err(|reason| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": reason })),
            )
        })?
        .clone();

    // Runs detached: a client disconnect mid-request must not cancel
    // in-flight source calls or their log writes.
    let task = tokio::spawn(async move {
        aggregator
            .aggregate(&body.address, &body.session_id)
            .await
    });

    match task.await {
        Ok(Ok(response)) => Ok(Json(response)),
        Ok(Err(ValuationError::Validation(message))) => {
            Err((StatusCode::BAD_REQUEST, Json(json!({ "error": message }))))
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "aggregation failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            ))
        }
        Err(e) => {
            tracing::error!(error = %e, "aggregation task panicked");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error" })),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_defaults_missing_fields_to_empty() {
        let body: AggregateBody = serde_json::from_str("{}").unwrap();
        assert!(body.address.is_empty());
        assert!(body.session_id.is_empty());

        let body: AggregateBody =
            serde_json::from_str(r#"{"address": "1 Queen's Road"}"#).unwrap();
        assert_eq!(body.address, "1 Queen's Road");
        assert!(body.session_id.is_empty());
    }

    #[test]
    fn test_body_reads_camel_case_session_id() {
        let body: AggregateBody =
            serde_json::from_str(r#"{"address": "1 Queen's Road", "sessionId": "s-1"}"#).unwrap();
        assert_eq!(body.session_id, "s-1");
    }
}
