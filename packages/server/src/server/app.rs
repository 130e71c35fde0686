//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{HeaderName, AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use sonar_client::SonarClient;
use valuation::{
    Aggregator, Extractor, ModelQueryExtractor, PageFetchExtractor, PostgresValuationStore,
    Registry, ValuationStore,
};

use crate::config::{Config, ExtractorMode};
use crate::server::routes::{aggregate_handler, health_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    /// `Err` carries the configuration failure the aggregation endpoint
    /// reports as a 500. The service still boots so /health works.
    pub aggregator: Result<Arc<Aggregator>, String>,
}

/// Build the Axum application router.
///
/// All collaborators (store, extractor, aggregator) are constructed here
/// and injected; nothing is process-global.
pub async fn build_app(pool: PgPool, config: &Config) -> anyhow::Result<Router> {
    let store: Arc<dyn ValuationStore> = Arc::new(
        PostgresValuationStore::from_pool(pool.clone())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to initialize valuation store: {}", e))?,
    );

    let aggregator = match build_aggregator(config, store) {
        Ok(aggregator) => Ok(Arc::new(aggregator)),
        Err(reason) => {
            tracing::warn!(reason = %reason, "aggregation endpoint disabled until configured");
            Err(reason)
        }
    };

    let app_state = AppState {
        db_pool: pool,
        aggregator,
    };

    // CORS: any origin; this layer also answers preflight OPTIONS.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            CONTENT_TYPE,
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ]);

    Ok(Router::new()
        .route("/aggregate", post(aggregate_handler))
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

/// Select and wire the extraction strategy from configuration.
fn build_aggregator(config: &Config, store: Arc<dyn ValuationStore>) -> Result<Aggregator, String> {
    match config.extractor_mode {
        ExtractorMode::ModelQuery => {
            let api_key = config
                .perplexity_api_key
                .clone()
                .ok_or_else(|| "Perplexity API key not configured".to_string())?;

            let extractor: Arc<dyn Extractor> =
                Arc::new(ModelQueryExtractor::new(SonarClient::new(api_key)));
            Ok(Aggregator::new(Registry::model_query(), extractor, store))
        }
        ExtractorMode::PageFetch => {
            let extractor: Arc<dyn Extractor> = Arc::new(PageFetchExtractor::new());
            Ok(Aggregator::new(Registry::page_fetch(), extractor, store))
        }
    }
}
