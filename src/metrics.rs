// 📊 Derived Metrics - Summary statistics from a synthesized series

use crate::noise::NoiseSource;
use crate::record::{price_for_year, ForecastPoint, YearlyDataPoint};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Used when a look-back year is missing from the history
const MISSING_YEAR_FACTOR: f64 = 0.9;

const BASE_TRANSACTIONS: u32 = 200;
const TRANSACTION_SPREAD: f64 = 1500.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub current_price: f64,
    pub yoy_growth: f64,
    pub cagr_5y: f64,
    pub transactions: u32,
    pub projected_growth_5y: f64,
    pub projected_growth_10y: f64,
}

/// One row of the annual price table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualChange {
    pub year: i32,
    pub price: f64,

    /// Percent vs the previous year; `None` for the oldest year
    pub change_pct: Option<f64>,
}

/// Percentage change from `from` to `to`
pub fn growth_pct(from: f64, to: f64) -> f64 {
    if from <= 0.0 {
        0.0
    } else {
        (to - from) / from * 100.0
    }
}

/// Compound annual growth rate as a fraction
pub fn calculate_cagr(start_value: f64, end_value: f64, years: f64) -> f64 {
    if start_value <= 0.0 || end_value <= 0.0 || years <= 0.0 {
        0.0
    } else {
        (end_value / start_value).powf(1.0 / years) - 1.0
    }
}

fn price_or_default(history: &[YearlyDataPoint], year: i32, current_price: f64) -> f64 {
    price_for_year(history, year).unwrap_or_else(|| {
        warn!("No history for {}, assuming 90% of current price", year);
        current_price * MISSING_YEAR_FACTOR
    })
}

pub fn compute_metrics<N: NoiseSource>(
    history: &[YearlyDataPoint],
    forecast: &[ForecastPoint],
    seed: i64,
    current_year: i32,
    noise: &N,
) -> DerivedMetrics {
    let current_price = history.last().map(|p| p.price).unwrap_or_default();

    let one_year_ago = price_or_default(history, current_year - 1, current_price);
    let five_years_ago = price_or_default(history, current_year - 5, current_price);

    let projected = |index: usize| {
        forecast
            .get(index)
            .map(|point| growth_pct(current_price, point.price))
            .unwrap_or_default()
    };

    DerivedMetrics {
        current_price,
        yoy_growth: growth_pct(one_year_ago, current_price),
        cagr_5y: calculate_cagr(five_years_ago, current_price, 5.0) * 100.0,
        transactions: BASE_TRANSACTIONS + (noise.draw(seed) * TRANSACTION_SPREAD).floor() as u32,
        projected_growth_5y: projected(4),
        projected_growth_10y: projected(9),
    }
}

/// Year-by-year change, newest first
pub fn annual_changes(history: &[YearlyDataPoint]) -> Vec<AnnualChange> {
    let mut rows: Vec<AnnualChange> = history
        .iter()
        .enumerate()
        .map(|(i, point)| AnnualChange {
            year: point.year,
            price: point.price,
            change_pct: i
                .checked_sub(1)
                .map(|prev| growth_pct(history[prev].price, point.price)),
        })
        .collect();

    rows.reverse();
    rows
}

/// Population standard deviation of the annual percentage changes
pub fn annual_volatility(history: &[YearlyDataPoint]) -> f64 {
    let changes: Vec<f64> = history
        .windows(2)
        .map(|w| growth_pct(w[0].price, w[1].price))
        .collect();

    if changes.is_empty() {
        return 0.0;
    }

    let count = changes.len() as f64;
    let mean = changes.iter().sum::<f64>() / count;
    let variance = changes.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / count;
    variance.sqrt()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::SineNoise;

    fn history(prices: &[f64], last_year: i32) -> Vec<YearlyDataPoint> {
        let first = last_year - prices.len() as i32 + 1;
        prices
            .iter()
            .enumerate()
            .map(|(i, &price)| YearlyDataPoint {
                year: first + i as i32,
                price,
            })
            .collect()
    }

    fn forecast(prices: &[f64], first_year: i32) -> Vec<ForecastPoint> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &price)| ForecastPoint {
                year: first_year + i as i32,
                price,
                lower_bound: price,
                upper_bound: price,
                conservative: price,
                aggressive: price,
            })
            .collect()
    }

    #[test]
    fn test_growth_pct() {
        assert_eq!(growth_pct(100.0, 110.0), 10.0);
        assert_eq!(growth_pct(0.0, 110.0), 0.0);
    }

    #[test]
    fn test_cagr() {
        let cagr = calculate_cagr(100.0, 200.0, 5.0);
        assert!((cagr - 0.148698).abs() < 1e-5);
        assert_eq!(calculate_cagr(0.0, 200.0, 5.0), 0.0);
    }

    #[test]
    fn test_compute_metrics() {
        let h = history(&[50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 110.0], 2026);
        let f = forecast(
            &[120.0, 130.0, 140.0, 150.0, 165.0, 170.0, 180.0, 190.0, 200.0, 220.0],
            2027,
        );
        let m = compute_metrics(&h, &f, 26, 2026, &SineNoise);

        assert_eq!(m.current_price, 110.0);
        assert!((m.yoy_growth - 10.0).abs() < 1e-9);
        let expected_cagr = ((110.0f64 / 60.0).powf(0.2) - 1.0) * 100.0;
        assert!((m.cagr_5y - expected_cagr).abs() < 1e-9);
        assert!((m.projected_growth_5y - 50.0).abs() < 1e-9);
        assert!((m.projected_growth_10y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_years_default_to_ninety_percent() {
        let h = history(&[100.0], 2026);
        let m = compute_metrics(&h, &[], 1, 2026, &SineNoise);

        let expected_yoy = (100.0 - 90.0) / 90.0 * 100.0;
        assert!((m.yoy_growth - expected_yoy).abs() < 1e-9);
        let expected_cagr = ((100.0f64 / 90.0).powf(0.2) - 1.0) * 100.0;
        assert!((m.cagr_5y - expected_cagr).abs() < 1e-9);
        assert_eq!(m.projected_growth_5y, 0.0);
    }

    #[test]
    fn test_transactions_range() {
        for seed in 0..200 {
            let m = compute_metrics(&history(&[100.0], 2026), &[], seed, 2026, &SineNoise);
            assert!((200..1700).contains(&m.transactions));
        }
    }

    #[test]
    fn test_annual_changes_newest_first() {
        let rows = annual_changes(&history(&[100.0, 110.0, 99.0], 2026));

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].year, 2026);
        assert!((rows[0].change_pct.unwrap() + 10.0).abs() < 1e-9);
        assert!((rows[1].change_pct.unwrap() - 10.0).abs() < 1e-9);
        assert_eq!(rows[2].change_pct, None);
    }

    #[test]
    fn test_annual_volatility() {
        assert_eq!(annual_volatility(&history(&[100.0], 2026)), 0.0);
        // steady 10% growth has no spread
        let steady = history(&[100.0, 110.0, 121.0], 2026);
        assert!(annual_volatility(&steady) < 1e-9);

        let choppy = history(&[100.0, 120.0, 96.0], 2026);
        assert!((annual_volatility(&choppy) - 20.0).abs() < 1e-9);
    }
}
