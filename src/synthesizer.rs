// 📈 Price Series Synthesizer - Reproducible history + 10-year forecast
//
// Every value is a pure function of (entry, property type, current year) and
// the noise source. History is built backward from today's price so that the
// most recent point is always the base price.

use crate::catalog::{Catalog, LocationEntry};
use crate::noise::NoiseSource;
use crate::property::PropertyType;
use crate::record::{ForecastPoint, YearlyDataPoint};

/// Years of history before the current one
pub const HISTORY_YEARS: i32 = 12;

/// Years of forecast after the current one
pub const FORECAST_YEARS: i32 = 10;

/// Peak-to-peak amplitude of the yearly history noise (±1.5%)
const HISTORY_NOISE: f64 = 0.03;

/// Locality premium cycles through [0, 6000) in steps of 150
const PREMIUM_STEP: i64 = 150;
const PREMIUM_RANGE: i64 = 6000;

/// Seed offset of the per-location infrastructure draw
const INFRASTRUCTURE_SEED_OFFSET: i64 = 100;

/// Infrastructure can lift the moderate rate by up to 1.5%
const INFRASTRUCTURE_WEIGHT: f64 = 0.015;

const CONSERVATIVE_FACTOR: f64 = 0.75;
const AGGRESSIVE_FACTOR: f64 = 1.35;

/// Band half-width grows by 1.5% of the moderate price per forecast year
const UNCERTAINTY_PER_YEAR: f64 = 0.015;

// ============================================================================
// PRICE SERIES
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub seed: i64,

    /// City growth + property type modifier
    pub effective_growth: f64,

    /// Ascending, ends at the current year
    pub history: Vec<YearlyDataPoint>,

    /// Ascending, current year + 1 ..= current year + 10
    pub forecast: Vec<ForecastPoint>,
}

impl PriceSeries {
    pub fn current_price(&self) -> f64 {
        self.history.last().map(|p| p.price).unwrap_or_default()
    }
}

/// `len(area) + len(city) + len(type name)`, lengths in UTF-16 code units
pub fn seed_for(entry: &LocationEntry, property_type: PropertyType) -> i64 {
    let len = |s: &str| s.encode_utf16().count();
    (len(&entry.area) + len(&entry.city) + len(property_type.as_str())) as i64
}

/// Growth applied when stepping back from `year` to `year - 1`
pub fn year_growth(year: i32, effective_growth: f64) -> f64 {
    match year {
        // Stagnation
        2020 | 2021 => effective_growth * 0.3,
        2016 | 2017 => effective_growth * 0.6,
        // Post-pandemic boom
        2023 | 2024 => effective_growth + 0.02,
        _ => effective_growth,
    }
}

// ============================================================================
// SYNTHESIZER
// ============================================================================

pub struct Synthesizer<'a, N: NoiseSource> {
    catalog: &'a Catalog,
    noise: &'a N,
}

impl<'a, N: NoiseSource> Synthesizer<'a, N> {
    pub fn new(catalog: &'a Catalog, noise: &'a N) -> Self {
        Synthesizer { catalog, noise }
    }

    pub fn noise(&self) -> &'a N {
        self.noise
    }

    /// Today's price: city base + locality premium, scaled by property type
    pub fn base_price(&self, entry: &LocationEntry, property_type: PropertyType, seed: i64) -> f64 {
        let params = self.catalog.parameters_for(&entry.city);
        let premium = (seed * PREMIUM_STEP).rem_euclid(PREMIUM_RANGE) as f64;
        ((params.base_price + premium) * property_type.modifier().price_multiplier).round()
    }

    pub fn effective_growth(&self, entry: &LocationEntry, property_type: PropertyType) -> f64 {
        self.catalog.parameters_for(&entry.city).growth_rate + property_type.modifier().growth_modifier
    }

    pub fn synthesize(
        &self,
        entry: &LocationEntry,
        property_type: PropertyType,
        current_year: i32,
    ) -> PriceSeries {
        let seed = seed_for(entry, property_type);
        let current_price = self.base_price(entry, property_type, seed);
        let effective_growth = self.effective_growth(entry, property_type);

        PriceSeries {
            seed,
            effective_growth,
            history: self.history(seed, current_price, effective_growth, current_year),
            forecast: self.forecast(seed, current_price, effective_growth, current_year),
        }
    }

    /// 13 yearly points, built backward from `current_price` then reversed
    pub fn history(
        &self,
        seed: i64,
        current_price: f64,
        effective_growth: f64,
        current_year: i32,
    ) -> Vec<YearlyDataPoint> {
        let mut points = Vec::with_capacity(HISTORY_YEARS as usize + 1);
        let mut price = current_price;

        for year in ((current_year - HISTORY_YEARS)..=current_year).rev() {
            points.push(YearlyDataPoint { year, price });

            let growth = year_growth(year, effective_growth);
            let noise = 1.0 + (self.noise.draw(seed + year as i64) - 0.5) * HISTORY_NOISE;
            price = (price / (1.0 + growth) * noise).round();
        }

        points.reverse();
        points
    }

    /// Ten yearly points with moderate / conservative / aggressive tracks
    pub fn forecast(
        &self,
        seed: i64,
        current_price: f64,
        effective_growth: f64,
        current_year: i32,
    ) -> Vec<ForecastPoint> {
        // Fixed per location, not per year
        let infrastructure =
            1.0 + self.noise.draw(seed + INFRASTRUCTURE_SEED_OFFSET) * INFRASTRUCTURE_WEIGHT;

        let mut moderate = current_price;
        let mut conservative = current_price;
        let mut aggressive = current_price;
        let mut points = Vec::with_capacity(FORECAST_YEARS as usize);

        for offset in 1..=FORECAST_YEARS {
            let demand_cycle = 1.0 + (offset as f64 * 0.6).sin() * 0.01;
            let moderate_growth = effective_growth * infrastructure * demand_cycle;

            moderate *= 1.0 + moderate_growth;
            conservative *= 1.0 + moderate_growth * CONSERVATIVE_FACTOR;
            aggressive *= 1.0 + moderate_growth * AGGRESSIVE_FACTOR;

            let (lower_bound, upper_bound) =
                confidence_band(moderate, conservative, aggressive, offset);

            points.push(ForecastPoint {
                year: current_year + offset,
                price: moderate.round(),
                lower_bound: lower_bound.round(),
                upper_bound: upper_bound.round(),
                conservative: conservative.round(),
                aggressive: aggressive.round(),
            });
        }

        points
    }
}

/// Uncertainty band clamped into the scenario envelope.
///
/// The envelope is ordered before clamping and the band always contains the
/// moderate price, so `lower <= price <= upper` holds even for shrinking markets.
fn confidence_band(moderate: f64, conservative: f64, aggressive: f64, offset: i32) -> (f64, f64) {
    let uncertainty = moderate * UNCERTAINTY_PER_YEAR * offset as f64;
    let floor = conservative.min(aggressive);
    let ceiling = conservative.max(aggressive);

    let lower = floor.max(moderate - uncertainty).min(moderate);
    let upper = ceiling.min(moderate + uncertainty).max(moderate);
    (lower, upper)
}

// ============================================================================
// TESTS
// ============================================================================
