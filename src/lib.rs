// Realty Insight - Core Library
// Synthetic real-estate market engine: catalog → resolver → synthesizer → metrics → cache
// Exposes all modules for use in CLI, API server, and tests

pub mod catalog;
pub mod property;
pub mod noise;
pub mod record;
pub mod resolver;
pub mod synthesizer;
pub mod metrics;
pub mod cache;
pub mod engine;
pub mod guidance;     // Buyer / seller verdicts
pub mod export;       // CSV tables
pub mod config;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError, CityParameters, LocationEntry};
pub use property::{ParsePropertyTypeError, PropertyType, PropertyTypeModifier};
pub use noise::{NoiseSource, SineNoise};
pub use record::{price_for_year, ForecastPoint, RealEstateRecord, YearlyDataPoint};
pub use resolver::{query_hash, resolve, MatchKind, Resolution};
pub use synthesizer::{seed_for, PriceSeries, Synthesizer};
pub use metrics::{
    annual_changes, annual_volatility, calculate_cagr, compute_metrics, growth_pct,
    AnnualChange, DerivedMetrics,
};
pub use cache::ResultCache;
pub use engine::MarketEngine;
pub use guidance::{
    BuyAction, BuyerInsight, DemandTrend, MarketHeat, MarketSentiment,
    RiskLevel, SectorOutlook, SellerInsight,
};
pub use export::{export_record, write_forecast_csv, write_history_csv};
pub use config::{AppConfig, ConfigError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
