//! The valuation source registry.
//!
//! A static ordered list of the banks and property-data providers queried
//! for one estimate each. Built at process start, never persisted.
//! Response ordering follows registry order exactly.

use url::Url;

/// The five sources queried per aggregation, paired with the public page
/// each exposes for the page-fetch strategy.
const SOURCES: [(&str, &str); 5] = [
    (
        "HSBC Hong Kong",
        "https://www.hsbc.com.hk/mortgages/tools/property-valuation/",
    ),
    (
        "Hang Seng Bank",
        "https://www.hangseng.com/en-hk/e-valuation/",
    ),
    (
        "Bank of China (Hong Kong)",
        "https://www.bochk.com/en/mortgage/tools/propertyvaluation.html",
    ),
    (
        "Standard Chartered Hong Kong",
        "https://www.sc.com/hk/mortgages/online-property-valuation/",
    ),
    (
        "Centaline Property",
        "https://hk.centanet.com/findproperty/en/valuation",
    ),
];

/// How a source is queried: a prompt template for the model-query
/// strategy, or a page URL for the page-fetch strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryTarget {
    /// Natural-language prompt template. `{address}` is replaced with the
    /// requested property address at extraction time.
    Prompt(String),

    /// Absolute URL of the source's public valuation page.
    Url(Url),
}

/// A named bank or property-data provider.
#[derive(Debug, Clone)]
pub struct ValuationSource {
    /// Unique, stable identifier and display label.
    pub name: String,

    /// What to query for this source.
    pub query_target: QueryTarget,
}

impl ValuationSource {
    /// Create a source queried through a prompt template.
    pub fn with_prompt(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            query_target: QueryTarget::Prompt(template.into()),
        }
    }

    /// Create a source queried through a page URL.
    pub fn with_url(name: impl Into<String>, url: Url) -> Self {
        Self {
            name: name.into(),
            query_target: QueryTarget::Url(url),
        }
    }
}

/// The ordered source registry for one extraction strategy.
#[derive(Debug, Clone)]
pub struct Registry {
    sources: Vec<ValuationSource>,
}

impl Registry {
    /// Registry for the model-query strategy: one prompt template per
    /// source, asking for a bare HKD number or the sentinel.
    pub fn model_query() -> Self {
        let sources = SOURCES
            .iter()
            .map(|(name, _)| {
                ValuationSource::with_prompt(
                    *name,
                    format!(
                        "What is the current property valuation estimate from {name} for the \
                         property at \"{{address}}\" in Hong Kong? Please provide only the \
                         numerical value in Hong Kong Dollars (HKD). If you find a valuation, \
                         respond with just the number without currency symbols or commas. If no \
                         valuation is available, respond with \"NOT_AVAILABLE\". Focus on \
                         getting the most recent valuation data from {name}'s property \
                         valuation service or mortgage calculator."
                    ),
                )
            })
            .collect();

        Self { sources }
    }

    /// Registry for the page-fetch strategy: one public valuation page
    /// per source.
    pub fn page_fetch() -> Self {
        let sources = SOURCES
            .iter()
            .map(|(name, url)| {
                ValuationSource::with_url(*name, Url::parse(url).expect("registry URL is valid"))
            })
            .collect();

        Self { sources }
    }

    /// Sources in declared order.
    pub fn sources(&self) -> &[ValuationSource] {
        &self.sources
    }

    /// Number of sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// True when the registry has no sources.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registries_share_names_and_order() {
        let model = Registry::model_query();
        let page = Registry::page_fetch();

        assert_eq!(model.len(), 5);
        assert_eq!(page.len(), 5);

        for (a, b) in model.sources().iter().zip(page.sources()) {
            assert_eq!(a.name, b.name);
        }

        assert_eq!(model.sources()[0].name, "HSBC Hong Kong");
        assert_eq!(model.sources()[4].name, "Centaline Property");
    }

    #[test]
    fn test_model_query_templates_keep_address_placeholder() {
        for source in Registry::model_query().sources() {
            match &source.query_target {
                QueryTarget::Prompt(template) => {
                    assert!(template.contains("{address}"));
                    assert!(template.contains(&source.name));
                }
                QueryTarget::Url(_) => panic!("model registry must carry prompts"),
            }
        }
    }

    #[test]
    fn test_page_fetch_targets_are_absolute_urls() {
        for source in Registry::page_fetch().sources() {
            match &source.query_target {
                QueryTarget::Url(url) => assert_eq!(url.scheme(), "https"),
                QueryTarget::Prompt(_) => panic!("page registry must carry URLs"),
            }
        }
    }
}
