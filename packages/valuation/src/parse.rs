//! Numeric-token and sentinel parsing shared by both extraction
//! strategies.

use regex::Regex;

use crate::types::{MAX_AMOUNT, MIN_AMOUNT};

/// Sentinel the text-generation provider returns in place of a number
/// when a source has no valuation. Matched case-insensitively; some
/// models space the words instead of underscoring them.
pub const SENTINEL: &str = "NOT_AVAILABLE";

/// Find the first decimal-number token in `text`: digits with optional
/// thousands separators and an optional fractional part. Separators are
/// stripped before parsing; a token that is all separators is skipped.
pub fn first_amount(text: &str) -> Option<f64> {
    let pattern = Regex::new(r"[\d,]+(?:\.\d+)?").expect("number pattern is valid");

    for token in pattern.find_iter(text) {
        let cleaned = token.as_str().replace(',', "");
        if cleaned.is_empty() {
            continue;
        }
        if let Ok(value) = cleaned.parse::<f64>() {
            return Some(value);
        }
    }

    None
}

/// All currency-prefixed amounts in `text`, in order of appearance.
/// Recognizes `HK$`, `HKD`, and `$` prefixes, case-insensitively.
pub fn currency_amounts(text: &str) -> Vec<f64> {
    let pattern = Regex::new(r"(?i)(?:HK\$|HKD|\$)\s*([\d,]+(?:\.\d+)?)")
        .expect("currency pattern is valid");

    pattern
        .captures_iter(text)
        .filter_map(|cap| cap[1].replace(',', "").parse::<f64>().ok())
        .collect()
}

/// Amounts outside the open interval (0, 1e9) are misparsed tokens, not
/// valuations.
pub fn within_sanity_bound(amount: f64) -> bool {
    amount > MIN_AMOUNT && amount < MAX_AMOUNT
}

/// Case-insensitive sentinel detection, tolerating the spaced variant.
pub fn contains_sentinel(text: &str) -> bool {
    let upper = text.to_uppercase();
    upper.contains(SENTINEL) || upper.contains("NOT AVAILABLE")
}
