// 📦 Result Records - What the engine hands to the presentation layer
// Serialized with camelCase keys (chart, map and dialog consumers expect them)

use crate::property::PropertyType;
use serde::{Deserialize, Serialize};

/// One historical year. `price` is always a whole currency unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyDataPoint {
    pub year: i32,
    pub price: f64,
}

/// Price recorded for `year`, if the history covers it
pub fn price_for_year(history: &[YearlyDataPoint], year: i32) -> Option<f64> {
    history.iter().find(|p| p.year == year).map(|p| p.price)
}

/// One forecast year with its confidence band and scenario tracks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub year: i32,

    /// Moderate scenario
    pub price: f64,

    pub lower_bound: f64,
    pub upper_bound: f64,

    /// Growth at 75% of the moderate rate
    pub conservative: f64,

    /// Growth at 135% of the moderate rate
    pub aggressive: f64,
}

impl ForecastPoint {
    pub fn band_width(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }
}

/// Full analysis for one (query, property type) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealEstateRecord {
    /// Name to display: the resolved label, or the raw query on fallback
    pub location: String,

    pub city: String,
    pub area: String,

    /// "area, city" of the resolved entry
    pub label: String,

    /// Input text exactly as received
    pub query: String,

    pub is_nearby_fallback: bool,

    /// Substitute label when `is_nearby_fallback` is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearby_location_name: Option<String>,

    pub property_type: PropertyType,

    pub current_price: f64,
    pub yoy_growth: f64,
    #[serde(rename = "cagr5y")]
    pub cagr_5y: f64,
    pub transactions: u32,
    #[serde(rename = "projectedGrowth5y")]
    pub projected_growth_5y: f64,
    #[serde(rename = "projectedGrowth10y")]
    pub projected_growth_10y: f64,

    /// Ascending by year
    pub history: Vec<YearlyDataPoint>,

    /// Ascending by year, starting the year after the current one
    pub forecast: Vec<ForecastPoint>,
}

impl RealEstateRecord {
    /// Price for a given historical year, if present
    pub fn price_in(&self, year: i32) -> Option<f64> {
        price_for_year(&self.history, year)
    }

    /// One-line summary for logs and the CLI
    pub fn summary(&self) -> String {
        format!(
            "{} ({}): ₹{:.0}/sq.ft, YoY {:+.1}%, 5Y CAGR {:.1}%, 5Y outlook {:+.0}%, 10Y outlook {:+.0}%",
            self.location,
            self.property_type.display_name(),
            self.current_price,
            self.yoy_growth,
            self.cagr_5y,
            self.projected_growth_5y,
            self.projected_growth_10y,
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use crate::engine::MarketEngine;
    use crate::property::PropertyType;

    #[test]
    fn test_price_in() {
        let record = MarketEngine::new()
            .with_reference_year(2026)
            .generate_uncached("Bandra West", PropertyType::Apartment);

        assert_eq!(record.price_in(2026), Some(28900.0));
        assert_eq!(record.price_in(2014), Some(record.history[0].price));
        assert_eq!(record.price_in(2013), None);
        assert_eq!(record.price_in(2027), None);
    }
}
