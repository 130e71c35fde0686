use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Which extraction strategy the service runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractorMode {
    /// Ask the text-generation provider per source (default).
    #[default]
    ModelQuery,
    /// Scrape each source's public valuation page.
    PageFetch,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Optional at startup: a missing key is reported as a configuration
    /// error on the aggregation endpoint instead of preventing boot, so
    /// /health keeps working.
    pub perplexity_api_key: Option<String>,
    pub extractor_mode: ExtractorMode,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let extractor_mode = match env::var("EXTRACTOR").as_deref() {
            Ok("model") | Err(_) => ExtractorMode::ModelQuery,
            Ok("page") => ExtractorMode::PageFetch,
            Ok(other) => anyhow::bail!("EXTRACTOR must be 'model' or 'page', got '{}'", other),
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            perplexity_api_key: env::var("PERPLEXITY_API_KEY").ok(),
            extractor_mode,
        })
    }
}
