//! Reduction over successful valuations.

use crate::types::{Analytics, ValuationResult};

/// Reduce the successful amounts of one aggregation to
/// {highest, lowest, average}. An empty or all-failed set yields
/// all-`None` — "no data" rather than zeros.
///
/// Computed in floating point with no rounding; display rounding is a
/// presentation concern.
pub fn summarize(results: &[ValuationResult]) -> Analytics {
    let amounts: Vec<f64> = results
        .iter()
        .filter(|r| r.is_success())
        .filter_map(|r| r.valuation_amount)
        .collect();

    if amounts.is_empty() {
        return Analytics::default();
    }

    let highest = amounts.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let lowest = amounts.iter().cloned().fold(f64::INFINITY, f64::min);
    let average = amounts.iter().sum::<f64>() / amounts.len() as f64;

    Analytics {
        highest: Some(highest),
        lowest: Some(lowest),
        average: Some(average),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_empty() {
        assert_eq!(summarize(&[]), Analytics::default());
    }

    #[test]
    fn test_summarize_all_failures() {
        let results = vec![
            ValuationResult::not_available("HSBC Hong Kong", "no data"),
            ValuationResult::error("Hang Seng Bank", "HTTP 503"),
        ];

        let analytics = summarize(&results);
        assert_eq!(analytics.highest, None);
        assert_eq!(analytics.lowest, None);
        assert_eq!(analytics.average, None);
    }

    #[test]
    fn test_summarize_basic() {
        let results = vec![
            ValuationResult::success("HSBC Hong Kong", 100.0),
            ValuationResult::success("Hang Seng Bank", 200.0),
            ValuationResult::success("Centaline Property", 300.0),
        ];

        let analytics = summarize(&results);
        assert_eq!(analytics.highest, Some(300.0));
        assert_eq!(analytics.lowest, Some(100.0));
        assert_eq!(analytics.average, Some(200.0));
    }

    #[test]
    fn test_summarize_ignores_failures_among_successes() {
        let results = vec![
            ValuationResult::success("HSBC Hong Kong", 8_000_000.0),
            ValuationResult::error("Hang Seng Bank", "request timeout"),
            ValuationResult::success("Centaline Property", 7_000_000.0),
            ValuationResult::not_available("Standard Chartered Hong Kong", "no data"),
        ];

        let analytics = summarize(&results);
        assert_eq!(analytics.highest, Some(8_000_000.0));
        assert_eq!(analytics.lowest, Some(7_000_000.0));
        assert_eq!(analytics.average, Some(7_500_000.0));
    }

    #[test]
    fn test_summarize_single_success() {
        let results = vec![ValuationResult::success("HSBC Hong Kong", 5_500_000.0)];

        let analytics = summarize(&results);
        assert_eq!(analytics.highest, Some(5_500_000.0));
        assert_eq!(analytics.lowest, Some(5_500_000.0));
        assert_eq!(analytics.average, Some(5_500_000.0));
    }
}
