// 🗄️ Result Cache - Memoized records keyed by query + property type
//
// No eviction, no expiry: entries live as long as the cache does.
// Keyed by the raw query, so two spellings of the same place are two entries.

use crate::property::PropertyType;
use crate::record::RealEstateRecord;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

#[derive(Debug, Default)]
pub struct ResultCache {
    entries: RwLock<HashMap<String, Arc<RealEstateRecord>>>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query text followed by the property type name.
    ///
    /// Unambiguous because no type name is a suffix of another.
    pub fn key(query: &str, property_type: PropertyType) -> String {
        format!("{}{}", query, property_type.as_str())
    }

    pub fn get(&self, query: &str, property_type: PropertyType) -> Option<Arc<RealEstateRecord>> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(&Self::key(query, property_type)).cloned()
    }

    pub fn put(&self, query: &str, property_type: PropertyType, record: RealEstateRecord) -> Arc<RealEstateRecord> {
        let record = Arc::new(record);
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(Self::key(query, property_type), Arc::clone(&record));
        record
    }

    /// Return the cached record, or build and store it.
    ///
    /// The check and the insert happen under one write lock, so concurrent
    /// callers for the same key compute it once.
    pub fn get_or_insert_with<F>(
        &self,
        query: &str,
        property_type: PropertyType,
        build: F,
    ) -> Arc<RealEstateRecord>
    where
        F: FnOnce() -> RealEstateRecord,
    {
        let key = Self::key(query, property_type);

        if let Some(hit) = self.entries.read().unwrap_or_else(|e| e.into_inner()).get(&key) {
            debug!("Cache hit: {}", key);
            return Arc::clone(hit);
        }

        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let record = entries.entry(key).or_insert_with_key(|key| {
            debug!("Cache miss: {}", key);
            Arc::new(build())
        });
        Arc::clone(record)
    }

    pub fn clear(&self) {
        self.entries.write().unwrap_or_else(|e| e.into_inner()).clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(query: &str) -> RealEstateRecord {
        RealEstateRecord {
            location: query.to_string(),
            city: "Mumbai".to_string(),
            area: "Powai".to_string(),
            label: "Powai, Mumbai".to_string(),
            query: query.to_string(),
            is_nearby_fallback: false,
            nearby_location_name: None,
            property_type: PropertyType::Apartment,
            current_price: 30000.0,
            yoy_growth: 8.0,
            cagr_5y: 6.5,
            transactions: 900,
            projected_growth_5y: 40.0,
            projected_growth_10y: 95.0,
            history: Vec::new(),
            forecast: Vec::new(),
        }
    }

    #[test]
    fn test_key_concatenates() {
        assert_eq!(ResultCache::key("Powai", PropertyType::Villa), "Powaivilla");
    }

    #[test]
    fn test_put_then_get() {
        let cache = ResultCache::new();
        assert!(cache.get("Powai", PropertyType::Apartment).is_none());

        cache.put("Powai", PropertyType::Apartment, record("Powai"));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("Powai", PropertyType::Apartment).unwrap().query, "Powai");
        assert!(cache.get("Powai", PropertyType::Villa).is_none());
    }

    #[test]
    fn test_query_keyed_not_location_keyed() {
        let cache = ResultCache::new();
        cache.put("Powai", PropertyType::Apartment, record("Powai"));
        cache.put("powai", PropertyType::Apartment, record("powai"));

        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_get_or_insert_builds_once() {
        let cache = ResultCache::new();
        let mut builds = 0;

        let first = cache.get_or_insert_with("Juhu", PropertyType::Plot, || {
            builds += 1;
            record("Juhu")
        });
        let second = cache.get_or_insert_with("Juhu", PropertyType::Plot, || {
            builds += 1;
            record("Juhu")
        });

        assert_eq!(builds, 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_clear() {
        let cache = ResultCache::new();
        cache.put("Juhu", PropertyType::Flat, record("Juhu"));
        assert!(!cache.is_empty());

        cache.clear();
        assert!(cache.is_empty());
    }
}
