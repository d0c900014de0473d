// 🧭 Guidance - Buyer and seller verdicts derived from a record
//
// Pure functions of a RealEstateRecord plus the catalog; nothing here
// touches the cache.

use crate::catalog::{Catalog, LocationEntry};
use crate::metrics::{annual_volatility, growth_pct};
use crate::noise::NoiseSource;
use crate::property::PropertyType;
use crate::record::RealEstateRecord;
use crate::synthesizer::{seed_for, Synthesizer};
use serde::{Deserialize, Serialize};

const RENTAL_YIELD_SEED_OFFSET: i64 = 200;

/// Premium above the city base that still counts as fair value
const FAIR_VALUE_PREMIUM: f64 = 3000.0;

const MAX_TOP_SECTORS: usize = 3;

// ============================================================================
// VERDICT ENUMS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuyAction {
    Buy,
    Hold,
    Wait,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// From the std-dev of annual changes, in percentage points
    pub fn from_volatility(volatility: f64) -> Self {
        if volatility < 2.0 {
            RiskLevel::Low
        } else if volatility < 4.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketHeat {
    Hot,
    Warm,
    Cool,
}

impl MarketHeat {
    pub fn from_yoy(yoy_growth: f64) -> Self {
        if yoy_growth >= 10.0 {
            MarketHeat::Hot
        } else if yoy_growth >= 6.0 {
            MarketHeat::Warm
        } else {
            MarketHeat::Cool
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemandTrend {
    Rising,
    Stable,
    Falling,
}

impl DemandTrend {
    /// Last year's growth against the 5-year CAGR, ±1 point tolerance
    pub fn from_growth(yoy_growth: f64, cagr_5y: f64) -> Self {
        if yoy_growth > cagr_5y + 1.0 {
            DemandTrend::Rising
        } else if yoy_growth < cagr_5y - 1.0 {
            DemandTrend::Falling
        } else {
            DemandTrend::Stable
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketSentiment {
    Bullish,
    Neutral,
    Bearish,
}

impl MarketSentiment {
    pub fn from_yoy(yoy_growth: f64) -> Self {
        if yoy_growth >= 8.0 {
            MarketSentiment::Bullish
        } else if yoy_growth >= 3.0 {
            MarketSentiment::Neutral
        } else {
            MarketSentiment::Bearish
        }
    }
}

// ============================================================================
// INSIGHTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorOutlook {
    pub area: String,
    pub label: String,
    pub projected_growth_10y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerInsight {
    pub action: BuyAction,
    pub risk_level: RiskLevel,

    /// Projected 5-year appreciation, percent
    pub projected_appreciation: f64,

    /// Gross yield, percent, one decimal
    pub rental_yield: f64,
    pub undervalued: bool,
    pub top_sectors: Vec<SectorOutlook>,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerInsight {
    pub suggested_action: String,
    pub market_heat: MarketHeat,
    pub demand_trend: DemandTrend,
    pub estimated_price_next_year: f64,
    pub best_time_to_sell: String,
    pub reasoning: String,
}

fn base_rental_yield(property_type: PropertyType) -> f64 {
    match property_type {
        PropertyType::Apartment => 3.0,
        PropertyType::Flat => 3.2,
        PropertyType::Villa => 2.2,
        PropertyType::Plot => 0.0,
        PropertyType::Commercial => 6.5,
    }
}

pub fn rental_yield<N: NoiseSource>(seed: i64, property_type: PropertyType, noise: &N) -> f64 {
    if property_type == PropertyType::Plot {
        return 0.0;
    }
    let raw = base_rental_yield(property_type) + noise.draw(seed + RENTAL_YIELD_SEED_OFFSET);
    (raw * 10.0).round() / 10.0
}

/// Up to three other areas of the same city, best 10-year outlook first
pub fn top_sectors<N: NoiseSource>(
    record: &RealEstateRecord,
    synthesizer: &Synthesizer<'_, N>,
    catalog: &Catalog,
    current_year: i32,
) -> Vec<SectorOutlook> {
    let mut sectors: Vec<SectorOutlook> = catalog
        .areas_in(&record.city)
        .into_iter()
        .filter(|entry| entry.area != record.area)
        .map(|entry| {
            let series = synthesizer.synthesize(entry, record.property_type, current_year);
            let projected = series
                .forecast
                .last()
                .map(|point| growth_pct(series.current_price(), point.price))
                .unwrap_or_default();
            SectorOutlook {
                area: entry.area.clone(),
                label: entry.label.clone(),
                projected_growth_10y: projected,
            }
        })
        .collect();

    // Stable sort keeps catalog order on ties
    sectors.sort_by(|a, b| b.projected_growth_10y.total_cmp(&a.projected_growth_10y));
    sectors.truncate(MAX_TOP_SECTORS);
    sectors
}

pub fn buyer_insight<N: NoiseSource>(
    record: &RealEstateRecord,
    synthesizer: &Synthesizer<'_, N>,
    catalog: &Catalog,
    current_year: i32,
) -> BuyerInsight {
    let risk_level = RiskLevel::from_volatility(annual_volatility(&record.history));
    let appreciation = record.projected_growth_5y;

    let action = if appreciation >= 35.0 && risk_level != RiskLevel::High {
        BuyAction::Buy
    } else if appreciation >= 20.0 {
        BuyAction::Hold
    } else {
        BuyAction::Wait
    };

    let entry = LocationEntry::new(&record.city, &record.area);
    let seed = seed_for(&entry, record.property_type);
    let fair_value = (catalog.parameters_for(&record.city).base_price + FAIR_VALUE_PREMIUM)
        * record.property_type.modifier().price_multiplier;
    let undervalued = record.current_price < fair_value;

    let reasoning = match action {
        BuyAction::Buy => format!(
            "{} projects {:.1}% over 5 years with {:?} risk. Strong entry point.",
            record.label, appreciation, risk_level
        ),
        BuyAction::Hold => format!(
            "{} projects {:.1}% over 5 years. Reasonable, but compare neighbouring sectors.",
            record.label, appreciation
        ),
        BuyAction::Wait => format!(
            "{} projects only {:.1}% over 5 years with {:?} risk. Better entry points may follow.",
            record.label, appreciation, risk_level
        ),
    };

    BuyerInsight {
        action,
        risk_level,
        projected_appreciation: appreciation,
        rental_yield: rental_yield(seed, record.property_type, synthesizer.noise()),
        undervalued,
        top_sectors: top_sectors(record, synthesizer, catalog, current_year),
        reasoning,
    }
}

pub fn seller_insight(record: &RealEstateRecord, current_year: i32) -> SellerInsight {
    let market_heat = MarketHeat::from_yoy(record.yoy_growth);
    let demand_trend = DemandTrend::from_growth(record.yoy_growth, record.cagr_5y);
    let estimated_price_next_year = record
        .forecast
        .first()
        .map(|point| point.price)
        .unwrap_or(record.current_price);

    let (suggested_action, best_time_to_sell) = match market_heat {
        MarketHeat::Hot => ("Sell now", "Within 12 months".to_string()),
        MarketHeat::Warm => ("Sell soon", format!("{}", current_year + 2)),
        MarketHeat::Cool => ("Hold and wait", format!("After {}", current_year + 3)),
    };

    let reasoning = format!(
        "Prices in {} moved {:.1}% last year against a {:.1}% 5-year CAGR. Demand is {:?}; next year's estimate is ₹{:.0}/sqft.",
        record.label, record.yoy_growth, record.cagr_5y, demand_trend, estimated_price_next_year
    );

    SellerInsight {
        suggested_action: suggested_action.to_string(),
        market_heat,
        demand_trend,
        estimated_price_next_year,
        best_time_to_sell,
        reasoning,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MarketEngine;
    use crate::noise::SineNoise;

    const YEAR: i32 = 2026;

    fn engine() -> MarketEngine {
        MarketEngine::new().with_reference_year(YEAR)
    }

    #[test]
    fn test_thresholds() {
        assert_eq!(RiskLevel::from_volatility(1.9), RiskLevel::Low);
        assert_eq!(RiskLevel::from_volatility(2.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_volatility(4.0), RiskLevel::High);

        assert_eq!(MarketHeat::from_yoy(10.0), MarketHeat::Hot);
        assert_eq!(MarketHeat::from_yoy(6.0), MarketHeat::Warm);
        assert_eq!(MarketHeat::from_yoy(5.9), MarketHeat::Cool);

        assert_eq!(DemandTrend::from_growth(9.0, 7.0), DemandTrend::Rising);
        assert_eq!(DemandTrend::from_growth(7.5, 7.0), DemandTrend::Stable);
        assert_eq!(DemandTrend::from_growth(5.0, 7.0), DemandTrend::Falling);

        assert_eq!(MarketSentiment::from_yoy(8.0), MarketSentiment::Bullish);
        assert_eq!(MarketSentiment::from_yoy(3.0), MarketSentiment::Neutral);
        assert_eq!(MarketSentiment::from_yoy(2.9), MarketSentiment::Bearish);
    }

    #[test]
    fn test_rental_yield() {
        assert_eq!(rental_yield(26, PropertyType::Plot, &SineNoise), 0.0);

        for ty in [PropertyType::Apartment, PropertyType::Commercial] {
            let y = rental_yield(26, ty, &SineNoise);
            let base = base_rental_yield(ty);
            assert!(y >= base && y <= base + 1.0);
            assert_eq!(y, (y * 10.0).round() / 10.0);
        }
    }

    #[test]
    fn test_top_sectors_exclude_self_and_are_ranked() {
        let engine = engine();
        let record = engine.generate("Bandra West", PropertyType::Apartment);
        let sectors = top_sectors(&record, &engine.synthesizer(), engine.catalog(), YEAR);

        assert_eq!(sectors.len(), 3);
        assert!(sectors.iter().all(|s| s.area != "Bandra West"));
        assert!(sectors.iter().all(|s| s.label.ends_with(", Mumbai")));
        for pair in sectors.windows(2) {
            assert!(pair[0].projected_growth_10y >= pair[1].projected_growth_10y);
        }
    }

    #[test]
    fn test_buyer_action_follows_appreciation() {
        let engine = engine();
        for entry in engine.catalog().all_locations() {
            let record = engine.generate(&entry.label, PropertyType::Apartment);
            let insight = engine.buyer_insight(&record);

            assert_eq!(insight.projected_appreciation, record.projected_growth_5y);
            match insight.action {
                BuyAction::Buy => {
                    assert!(insight.projected_appreciation >= 35.0);
                    assert_ne!(insight.risk_level, RiskLevel::High);
                }
                BuyAction::Hold => assert!(insight.projected_appreciation >= 20.0),
                BuyAction::Wait => assert!(insight.projected_appreciation < 20.0),
            }
        }
    }

    #[test]
    fn test_undervalued_uses_city_fair_value() {
        let engine = engine();
        // 25000 + 3900 premium is above 25000 + 3000
        let bandra = engine.generate("Bandra West", PropertyType::Apartment);
        assert!(!engine.buyer_insight(&bandra).undervalued);

        // Gota plot: (5000 + 17 * 150) * 0.7 = 5285, below 8000 * 0.7
        let gota = engine.generate("Gota", PropertyType::Plot);
        assert_eq!(gota.current_price, 5285.0);
        assert!(engine.buyer_insight(&gota).undervalued);
    }

    #[test]
    fn test_seller_insight() {
        let engine = engine();
        let record = engine.generate("Whitefield", PropertyType::Villa);
        let insight = engine.seller_insight(&record);

        assert_eq!(insight.estimated_price_next_year, record.forecast[0].price);
        assert_eq!(insight.market_heat, MarketHeat::from_yoy(record.yoy_growth));
        match insight.market_heat {
            MarketHeat::Hot => assert_eq!(insight.best_time_to_sell, "Within 12 months"),
            MarketHeat::Warm => assert_eq!(insight.best_time_to_sell, "2028"),
            MarketHeat::Cool => assert_eq!(insight.best_time_to_sell, "After 2029"),
        }
    }

    #[test]
    fn test_insight_serializes_camel_case() {
        let engine = engine();
        let record = engine.generate("Powai", PropertyType::Flat);
        let json = serde_json::to_value(engine.buyer_insight(&record)).unwrap();

        assert!(json.get("riskLevel").is_some());
        assert!(json.get("topSectors").is_some());
        assert!(json.get("rentalYield").is_some());
    }
}
