// ⚙️ Market Engine - query + property type → RealEstateRecord
//
// Pipeline: Resolver → Synthesizer → Metrics → Cache
// The engine owns its cache; nothing here is global.

use crate::cache::ResultCache;
use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::guidance::{self, BuyerInsight, SellerInsight};
use crate::metrics::compute_metrics;
use crate::noise::{NoiseSource, SineNoise};
use crate::property::PropertyType;
use crate::record::RealEstateRecord;
use crate::resolver::resolve;
use crate::synthesizer::Synthesizer;
use chrono::{Datelike, Utc};
use std::sync::Arc;
use tracing::debug;

pub struct MarketEngine<N: NoiseSource = SineNoise> {
    catalog: Catalog,
    noise: N,
    cache: ResultCache,

    /// Pins "today" for reproducible output; wall clock when unset
    reference_year: Option<i32>,
}

impl MarketEngine<SineNoise> {
    /// Engine over the shipped catalog with sine noise
    pub fn new() -> Self {
        MarketEngine {
            catalog: Catalog::new(),
            noise: SineNoise,
            cache: ResultCache::new(),
            reference_year: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let engine = Self::new();
        match config.reference_year {
            Some(year) => engine.with_reference_year(year),
            None => engine,
        }
    }
}

impl Default for MarketEngine<SineNoise> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NoiseSource> MarketEngine<N> {
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    /// Swap the catalog; cached records from the old one are dropped
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self.cache.clear();
        self
    }

    /// Swap the noise source; cached records from the old one are dropped
    pub fn with_noise<M: NoiseSource>(self, noise: M) -> MarketEngine<M> {
        MarketEngine {
            catalog: self.catalog,
            noise,
            cache: ResultCache::new(),
            reference_year: self.reference_year,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn noise(&self) -> &N {
        &self.noise
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn current_year(&self) -> i32 {
        self.reference_year.unwrap_or_else(|| Utc::now().year())
    }

    pub fn synthesizer(&self) -> Synthesizer<'_, N> {
        Synthesizer::new(&self.catalog, &self.noise)
    }

    /// Cached entry point. Every input yields a record.
    pub fn generate(&self, query: &str, property_type: PropertyType) -> Arc<RealEstateRecord> {
        self.cache
            .get_or_insert_with(query, property_type, || self.generate_uncached(query, property_type))
    }

    /// Build a fresh record, bypassing the cache
    pub fn generate_uncached(&self, query: &str, property_type: PropertyType) -> RealEstateRecord {
        let current_year = self.current_year();
        let resolution = resolve(query, &self.catalog);
        let series = self
            .synthesizer()
            .synthesize(&resolution.entry, property_type, current_year);
        let metrics = compute_metrics(
            &series.history,
            &series.forecast,
            series.seed,
            current_year,
            &self.noise,
        );

        debug!(
            "Generated {} ({}) seed={} price={}",
            resolution.entry.label, property_type, series.seed, metrics.current_price
        );

        RealEstateRecord {
            location: resolution.display_name,
            city: resolution.entry.city,
            area: resolution.entry.area,
            label: resolution.entry.label,
            query: query.to_string(),
            is_nearby_fallback: resolution.is_nearby_fallback,
            nearby_location_name: resolution.nearby_location_name,
            property_type,
            current_price: metrics.current_price,
            yoy_growth: metrics.yoy_growth,
            cagr_5y: metrics.cagr_5y,
            transactions: metrics.transactions,
            projected_growth_5y: metrics.projected_growth_5y,
            projected_growth_10y: metrics.projected_growth_10y,
            history: series.history,
            forecast: series.forecast,
        }
    }

    pub fn buyer_insight(&self, record: &RealEstateRecord) -> BuyerInsight {
        guidance::buyer_insight(record, &self.synthesizer(), &self.catalog, self.current_year())
    }

    pub fn seller_insight(&self, record: &RealEstateRecord) -> SellerInsight {
        guidance::seller_insight(record, self.current_year())
    }
}

// ============================================================================
// TESTS
// ============================================================================
