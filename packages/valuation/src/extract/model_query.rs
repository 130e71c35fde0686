//! Model-query extraction strategy.
//!
//! Asks a text-generation model for each source's estimate, constrained
//! by the system prompt to answer with a bare number or the
//! `NOT_AVAILABLE` sentinel, then parses the first numeric token out of
//! the reply.

use async_trait::async_trait;
use sonar_client::{ChatRequest, Message, SonarClient};
use tracing::{debug, warn};

use crate::extract::Extractor;
use crate::parse;
use crate::sources::{QueryTarget, ValuationSource};
use crate::types::ValuationResult;

/// Keeps answers literal: a number or the sentinel, no prose.
const SYSTEM_PROMPT: &str = "You are a property valuation assistant. Provide only numerical \
                             values or \"NOT_AVAILABLE\". Do not include explanations.";

/// Low randomness favors literal numeric answers.
const TEMPERATURE: f32 = 0.2;

/// A valuation answer is a handful of tokens.
const MAX_TOKENS: u32 = 100;

const DEFAULT_MODEL: &str = "sonar";

/// Extraction via the Perplexity chat-completions API.
pub struct ModelQueryExtractor {
    client: SonarClient,
    model: String,
}

impl ModelQueryExtractor {
    /// Create an extractor over the given client.
    pub fn new(client: SonarClient) -> Self {
        Self {
            client,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Use a different model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Map a model reply to a result. Sentinel beats number: a reply that
    /// names the sentinel is a definitive "no data" even if it also
    /// carries digits.
    fn interpret(source: &str, content: &str) -> ValuationResult {
        let content = content.trim();

        if content.is_empty() {
            return ValuationResult::error(source, "Empty response from API");
        }

        if parse::contains_sentinel(content) {
            return ValuationResult::not_available(
                source,
                "No valuation data available from this source",
            );
        }

        if let Some(amount) = parse::first_amount(content) {
            if parse::within_sanity_bound(amount) {
                return ValuationResult::success(source, amount);
            }
        }

        ValuationResult::not_available(source, "Could not parse valuation from response")
    }
}

#[async_trait]
impl Extractor for ModelQueryExtractor {
    async fn extract(&self, source: &ValuationSource, address: &str) -> ValuationResult {
        let prompt = match &source.query_target {
            QueryTarget::Prompt(template) => template.replace("{address}", address),
            QueryTarget::Url(_) => {
                warn!(source = %source.name, "model-query extractor given a URL target");
                return ValuationResult::error(&source.name, "source has no prompt template");
            }
        };

        let request = ChatRequest::new(&self.model)
            .message(Message::system(SYSTEM_PROMPT))
            .message(Message::user(prompt))
            .temperature(TEMPERATURE)
            .max_tokens(MAX_TOKENS);

        match self.client.chat_completion(request).await {
            Ok(response) => {
                debug!(source = %source.name, "model response received");
                Self::interpret(&source.name, &response.content)
            }
            Err(e) => {
                warn!(source = %source.name, error = %e, "model query failed");
                ValuationResult::error(&source.name, e.to_string())
            }
        }
    }

    fn name(&self) -> &str {
        "model-query"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValuationStatus;

    #[test]
    fn test_interpret_bare_number() {
        let result = ModelQueryExtractor::interpret("HSBC Hong Kong", "8500000");
        assert_eq!(result.status, ValuationStatus::Success);
        assert_eq!(result.valuation_amount, Some(8_500_000.0));
    }

    #[test]
    fn test_interpret_number_with_separators_and_prose() {
        let result =
            ModelQueryExtractor::interpret("Hang Seng Bank", "The estimate is 1,234,567.89 HKD");
        assert_eq!(result.status, ValuationStatus::Success);
        assert_eq!(result.valuation_amount, Some(1_234_567.89));
    }

    #[test]
    fn test_interpret_sentinel_variants() {
        for reply in ["NOT_AVAILABLE", "not_available", "NOT AVAILABLE", "Data is not available."] {
            let result = ModelQueryExtractor::interpret("Centaline Property", reply);
            assert_eq!(result.status, ValuationStatus::NotAvailable);
            assert_eq!(
                result.error_message.as_deref(),
                Some("No valuation data available from this source")
            );
        }
    }

    #[test]
    fn test_interpret_sentinel_wins_over_digits() {
        let result =
            ModelQueryExtractor::interpret("HSBC Hong Kong", "NOT_AVAILABLE (checked 3 pages)");
        assert_eq!(result.status, ValuationStatus::NotAvailable);
    }

    #[test]
    fn test_interpret_out_of_bounds_amount() {
        let result = ModelQueryExtractor::interpret("HSBC Hong Kong", "2,000,000,000");
        assert_eq!(result.status, ValuationStatus::NotAvailable);
        assert_eq!(
            result.error_message.as_deref(),
            Some("Could not parse valuation from response")
        );

        let zero = ModelQueryExtractor::interpret("HSBC Hong Kong", "0");
        assert_eq!(zero.status, ValuationStatus::NotAvailable);
    }

    #[test]
    fn test_interpret_unparsable_reply() {
        let result = ModelQueryExtractor::interpret("HSBC Hong Kong", "I cannot help with that.");
        assert_eq!(result.status, ValuationStatus::NotAvailable);
        assert_eq!(
            result.error_message.as_deref(),
            Some("Could not parse valuation from response")
        );
    }

    #[test]
    fn test_interpret_empty_reply() {
        let result = ModelQueryExtractor::interpret("HSBC Hong Kong", "   ");
        assert_eq!(result.status, ValuationStatus::Error);
        assert_eq!(result.error_message.as_deref(), Some("Empty response from API"));
    }
}
