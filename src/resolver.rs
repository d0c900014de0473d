// 🔎 Location Resolver - Free text → exactly one catalog entry
// Three strategies, first match wins: Exact, Partial, Hash Fallback

use crate::catalog::{Catalog, LocationEntry};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

// ============================================================================
// MATCH KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchKind {
    /// Query equals a label or an area name (case-insensitive)
    Exact,

    /// Label contains the query, or the query contains an area name
    Partial,

    /// Nothing matched; a substitute was chosen from the query hash
    NearbyFallback,
}

// ============================================================================
// RESOLUTION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub entry: LocationEntry,
    pub match_kind: MatchKind,
    pub is_nearby_fallback: bool,

    /// Label of the substitute (fallback only)
    pub nearby_location_name: Option<String>,

    /// The raw query on fallback, the entry label otherwise
    pub display_name: String,
}

impl Resolution {
    fn matched(entry: &LocationEntry, match_kind: MatchKind) -> Self {
        Resolution {
            entry: entry.clone(),
            match_kind,
            is_nearby_fallback: false,
            nearby_location_name: None,
            display_name: entry.label.clone(),
        }
    }

    fn fallback(entry: &LocationEntry, query: &str) -> Self {
        Resolution {
            entry: entry.clone(),
            match_kind: MatchKind::NearbyFallback,
            is_nearby_fallback: true,
            nearby_location_name: Some(entry.label.clone()),
            display_name: query.to_string(),
        }
    }
}

/// Sum of UTF-16 code units, the same value a browser's `charCodeAt` sum gives
pub fn query_hash(query: &str) -> u64 {
    query.encode_utf16().map(u64::from).sum()
}

/// Resolve a query against the catalog. Never fails: a catalog is never empty.
pub fn resolve(query: &str, catalog: &Catalog) -> Resolution {
    let all = catalog.all_locations();
    let needle = query.to_lowercase();

    // 1. Exact match on label or area
    if let Some(entry) = all
        .iter()
        .find(|l| l.label.to_lowercase() == needle || l.area.to_lowercase() == needle)
    {
        debug!("Exact match for '{}': {}", query, entry.label);
        return Resolution::matched(entry, MatchKind::Exact);
    }

    // 2. Partial match in either direction
    if let Some(entry) = all.iter().find(|l| {
        l.label.to_lowercase().contains(&needle) || needle.contains(&l.area.to_lowercase())
    }) {
        debug!("Partial match for '{}': {}", query, entry.label);
        return Resolution::matched(entry, MatchKind::Partial);
    }

    // 3. Deterministic substitute
    let index = (query_hash(query) % all.len() as u64) as usize;
    let entry = &all[index];
    info!("No match for '{}', showing nearby {}", query, entry.label);
    Resolution::fallback(entry, query)
}

// ============================================================================
// TESTS
// ============================================================================
