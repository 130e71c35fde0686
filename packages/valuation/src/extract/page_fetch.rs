//! Page-fetch extraction strategy.
//!
//! Fetches a source's public valuation page and scans the visible text
//! for a currency-marked figure. Most Hong Kong bank valuation tools sit
//! behind interactive forms, so a clean page with no figure is reported
//! as `not_available` rather than `error`.

use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use scraper::Html;
use tracing::{debug, warn};

use crate::extract::Extractor;
use crate::parse;
use crate::sources::{QueryTarget, ValuationSource};
use crate::types::ValuationResult;

/// Browser-like User-Agent; bank pages reject obvious bots.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Fixed per-request timeout.
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Keywords anchoring the first scan pass.
const KEYWORDS: [&str; 3] = ["valuation", "price", "value"];

/// Visible-text window scanned after each keyword hit, in bytes.
const KEYWORD_WINDOW: usize = 160;

/// Floor for the keyword-less fallback pass. Currency figures below this
/// are page furniture (fees, rates), not property valuations.
const MIN_PLAUSIBLE_AMOUNT: f64 = 100_000.0;

/// Extraction by scraping the source's public valuation page.
///
/// One generic scan parameterized by the keyword set; there is no
/// per-source parsing logic.
pub struct PageFetchExtractor {
    client: reqwest::Client,
    keywords: Vec<String>,
}

impl Default for PageFetchExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PageFetchExtractor {
    /// Create an extractor with the default keyword set.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(FETCH_TIMEOUT)
                .user_agent(USER_AGENT)
                .redirect(reqwest::redirect::Policy::limited(5))
                .build()
                .expect("Failed to create HTTP client"),
            keywords: KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Replace the scan keywords.
    pub fn with_keywords(mut self, keywords: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.keywords = keywords.into_iter().map(|k| k.into()).collect();
        self
    }

    /// Strip markup and return the page's visible text, lowercased for
    /// scanning. Script and style bodies are not visible text.
    fn visible_text(html: &str) -> String {
        let script_pattern =
            Regex::new(r"(?is)<script[^>]*>.*?</script>").expect("script pattern is valid");
        let style_pattern =
            Regex::new(r"(?is)<style[^>]*>.*?</style>").expect("style pattern is valid");

        let stripped = script_pattern.replace_all(html, "");
        let stripped = style_pattern.replace_all(&stripped, "");

        let document = Html::parse_document(&stripped);
        document
            .root_element()
            .text()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    /// One generic scan over visible text: a keyword followed within the
    /// window by a currency figure wins; otherwise any currency figure
    /// above the plausibility floor.
    fn scan(&self, text: &str) -> Option<f64> {
        for keyword in &self.keywords {
            let mut start = 0;
            while let Some(pos) = text[start..].find(keyword.as_str()) {
                let from = start + pos + keyword.len();
                let mut to = (from + KEYWORD_WINDOW).min(text.len());
                while !text.is_char_boundary(to) {
                    to -= 1;
                }

                if let Some(amount) = parse::currency_amounts(&text[from..to])
                    .into_iter()
                    .find(|a| parse::within_sanity_bound(*a))
                {
                    return Some(amount);
                }

                start = from;
            }
        }

        parse::currency_amounts(text)
            .into_iter()
            .find(|a| *a > MIN_PLAUSIBLE_AMOUNT && parse::within_sanity_bound(*a))
    }
}

#[async_trait]
impl Extractor for PageFetchExtractor {
    async fn extract(&self, source: &ValuationSource, _address: &str) -> ValuationResult {
        let url = match &source.query_target {
            QueryTarget::Url(url) => url.clone(),
            QueryTarget::Prompt(_) => {
                warn!(source = %source.name, "page-fetch extractor given a prompt target");
                return ValuationResult::error(&source.name, "source has no page URL");
            }
        };

        debug!(source = %source.name, url = %url, "fetching valuation page");

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(source = %source.name, error = %e, "page fetch failed");
                let message = if e.is_timeout() {
                    "request timeout".to_string()
                } else {
                    e.to_string()
                };
                return ValuationResult::error(&source.name, message);
            }
        };

        let status = response.status();
        if !status.is_success() {
            return ValuationResult::error(&source.name, format!("HTTP {}", status.as_u16()));
        }

        let html = match response.text().await {
            Ok(body) => body,
            Err(e) => return ValuationResult::error(&source.name, e.to_string()),
        };

        let text = Self::visible_text(&html);
        match self.scan(&text) {
            Some(amount) => ValuationResult::success(&source.name, amount),
            None => ValuationResult::not_available(
                &source.name,
                "Valuation data requires interactive form submission on this page",
            ),
        }
    }

    fn name(&self) -> &str {
        "page-fetch"
    }
}
