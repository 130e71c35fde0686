//! Pure Perplexity REST API client
//!
//! A clean, minimal client for the Perplexity chat-completions API with no
//! domain-specific logic.
//!
//! # Example
//!
//! ```rust,ignore
//! use sonar_client::{ChatRequest, Message, SonarClient};
//!
//! let client = SonarClient::from_env()?;
//!
//! let response = client
//!     .chat_completion(
//!         ChatRequest::new("sonar")
//!             .message(Message::system("Answer with a bare number."))
//!             .message(Message::user("What is 2 + 2?")),
//!     )
//!     .await?;
//!
//! println!("{}", response.content);
//! ```

pub mod error;
pub mod types;

pub use error::{Result, SonarError};
pub use types::*;

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

/// Default request timeout. The provider enforces its own limits, but an
/// unbounded call could hang a caller indefinitely.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Pure Perplexity API client.
#[derive(Clone)]
pub struct SonarClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl SonarClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            api_key: api_key.into(),
            base_url: "https://api.perplexity.ai".to_string(),
        }
    }

    /// Create from environment variable `PERPLEXITY_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("PERPLEXITY_API_KEY")
            .map_err(|_| SonarError::Config("PERPLEXITY_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for proxies, test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom HTTP client (e.g. with a different timeout).
    pub fn with_client(mut self, client: Client) -> Self {
        self.http_client = client;
        self
    }

    /// Get the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Chat completion.
    ///
    /// Send messages to the chat-completions API and get the first
    /// choice's content back.
    pub async fn chat_completion(&self, request: ChatRequest) -> Result<ChatResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Perplexity request failed");
                SonarError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Perplexity API error");
            return Err(SonarError::Api(format!(
                "Perplexity API error: {} - {}",
                status.as_u16(),
                error_text
            )));
        }

        let chat_response: types::ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| SonarError::Parse(e.to_string()))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| SonarError::Api("No response from Perplexity".into()))?;

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            "Perplexity chat completion"
        );

        Ok(ChatResponse {
            content,
            usage: chat_response.usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = SonarClient::new("pplx-test").with_base_url("https://custom.api.com");

        assert_eq!(client.api_key, "pplx-test");
        assert_eq!(client.base_url, "https://custom.api.com");
    }
}
