// 🗺️ Location Catalog - Fixed universe of localities + city pricing
//
// Order matters: cities in declaration order, then areas in declaration order.
// The resolver's hash fallback indexes into exactly this sequence.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// STATIC DATA
// ============================================================================

const CITY_AREAS: &[(&str, &[&str])] = &[
    (
        "Mumbai",
        &[
            "Bandra West",
            "Andheri East",
            "Powai",
            "Juhu",
            "Worli",
            "Lower Parel",
            "Chembur",
            "Goregaon",
            "Malad",
            "Borivali",
        ],
    ),
    (
        "Delhi NCR",
        &[
            "Vasant Kunj",
            "Greater Kailash",
            "Dwarka",
            "Saket",
            "Hauz Khas",
            "Gurgaon - Cyber City",
            "Gurgaon - Sector 56",
            "Noida - Sector 62",
            "Noida - Sector 150",
        ],
    ),
    (
        "Bengaluru",
        &[
            "Indiranagar",
            "Koramangala",
            "Whitefield",
            "HSR Layout",
            "Jayanagar",
            "Electronic City",
            "Hebbal",
            "Malleshwaram",
            "Yelahanka",
        ],
    ),
    (
        "Hyderabad",
        &[
            "Gachibowli",
            "Jubilee Hills",
            "Banjara Hills",
            "Hitech City",
            "Kondapur",
            "Madhapur",
            "Begumpet",
            "Kukatpally",
        ],
    ),
    (
        "Pune",
        &[
            "Koregaon Park",
            "Viman Nagar",
            "Kalyani Nagar",
            "Baner",
            "Wakad",
            "Hinjewadi",
            "Aundh",
            "Hadapsar",
        ],
    ),
    (
        "Chennai",
        &[
            "Adyar",
            "Besant Nagar",
            "Anna Nagar",
            "T Nagar",
            "Velachery",
            "OMR",
            "Porur",
            "Mylapore",
        ],
    ),
    (
        "Kolkata",
        &[
            "Salt Lake",
            "New Town",
            "Park Street",
            "Ballygunge",
            "Dum Dum",
            "Jadavpur",
        ],
    ),
    (
        "Ahmedabad",
        &["Satellite", "Bodakdev", "Vastrapur", "Thaltej", "Gota", "Bopal"],
    ),
];

/// (city, base price per sq.ft, annual growth rate)
const CITY_PARAMETERS: &[(&str, f64, f64)] = &[
    ("Mumbai", 25000.0, 0.070),
    ("Delhi NCR", 12000.0, 0.065),
    ("Bengaluru", 9000.0, 0.090),
    ("Hyderabad", 7500.0, 0.095),
    ("Pune", 8000.0, 0.080),
    ("Chennai", 7000.0, 0.065),
    ("Kolkata", 6000.0, 0.055),
    ("Ahmedabad", 5000.0, 0.075),
];

const POPULAR_LOCATIONS: &[&str] = &[
    "Bandra West, Mumbai",
    "Indiranagar, Bengaluru",
    "Cyber City, Delhi NCR",
    "Gachibowli, Hyderabad",
];

// ============================================================================
// LOCATION ENTRY
// ============================================================================

/// A single searchable locality. Identity is the (city, area) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationEntry {
    pub city: String,
    pub area: String,

    /// "area, city" - unique within the catalog
    pub label: String,
}

impl LocationEntry {
    pub fn new(city: &str, area: &str) -> Self {
        LocationEntry {
            city: city.to_string(),
            area: area.to_string(),
            label: format!("{}, {}", area, city),
        }
    }
}

// ============================================================================
// CITY PARAMETERS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CityParameters {
    /// Currency per sq.ft before the locality premium
    pub base_price: f64,

    /// Annual fractional growth (0.07 = 7%)
    pub growth_rate: f64,
}

impl Default for CityParameters {
    /// Used for any city missing from the parameter table
    fn default() -> Self {
        CityParameters {
            base_price: 6500.0,
            growth_rate: 0.06,
        }
    }
}

// ============================================================================
// CATALOG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog must contain at least one location")]
    Empty,
}

/// Immutable catalog, built once and shared by the resolver and synthesizer
#[derive(Debug, Clone)]
pub struct Catalog {
    locations: Vec<LocationEntry>,
    parameters: Vec<(String, CityParameters)>,
}

impl Catalog {
    /// Build the shipped catalog
    pub fn new() -> Self {
        let locations = CITY_AREAS
            .iter()
            .flat_map(|(city, areas)| areas.iter().map(move |area| LocationEntry::new(city, area)))
            .collect();

        let parameters = CITY_PARAMETERS
            .iter()
            .map(|(city, base_price, growth_rate)| {
                (
                    city.to_string(),
                    CityParameters {
                        base_price: *base_price,
                        growth_rate: *growth_rate,
                    },
                )
            })
            .collect();

        Catalog {
            locations,
            parameters,
        }
    }

    /// Build a catalog from arbitrary data (order is preserved as given).
    ///
    /// Rejects an empty location list: resolution indexes into it.
    pub fn from_parts(
        locations: Vec<LocationEntry>,
        parameters: Vec<(String, CityParameters)>,
    ) -> Result<Self, CatalogError> {
        if locations.is_empty() {
            return Err(CatalogError::Empty);
        }

        Ok(Catalog {
            locations,
            parameters,
        })
    }

    /// Every locality, city order then area order
    pub fn all_locations(&self) -> &[LocationEntry] {
        &self.locations
    }

    /// Pricing parameters for a city, or the default when the city is unknown
    pub fn parameters_for(&self, city: &str) -> CityParameters {
        self.parameters
            .iter()
            .find(|(name, _)| name == city)
            .map(|(_, params)| *params)
            .unwrap_or_default()
    }

    /// Distinct cities in declaration order
    pub fn cities(&self) -> Vec<&str> {
        let mut cities: Vec<&str> = Vec::new();
        for entry in &self.locations {
            if !cities.contains(&entry.city.as_str()) {
                cities.push(&entry.city);
            }
        }
        cities
    }

    /// Areas of one city in declaration order
    pub fn areas_in(&self, city: &str) -> Vec<&LocationEntry> {
        self.locations.iter().filter(|l| l.city == city).collect()
    }

    pub fn find(&self, city: &str, area: &str) -> Option<&LocationEntry> {
        self.locations
            .iter()
            .find(|l| l.city == city && l.area == area)
    }

    /// Suggested queries shown before the user types anything
    pub fn popular_locations(&self) -> Vec<&'static str> {
        POPULAR_LOCATIONS.to_vec()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
