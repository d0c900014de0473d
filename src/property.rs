// 🏠 Property Types - Closed enum + coefficient table
// Each type scales the city base price and shifts the city growth rate

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// PROPERTY TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    /// Multi-unit residential apartment
    #[default]
    Apartment,

    /// Builder floor / flat
    Flat,

    /// Independent villa or bungalow
    Villa,

    /// Land plot
    Plot,

    /// Office or retail space
    Commercial,
}

impl PropertyType {
    pub const ALL: [PropertyType; 5] = [
        PropertyType::Apartment,
        PropertyType::Flat,
        PropertyType::Villa,
        PropertyType::Plot,
        PropertyType::Commercial,
    ];

    /// Wire name; its length feeds the synthesizer seed
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::Flat => "flat",
            PropertyType::Villa => "villa",
            PropertyType::Plot => "plot",
            PropertyType::Commercial => "commercial",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "Apartment",
            PropertyType::Flat => "Flat",
            PropertyType::Villa => "Villa",
            PropertyType::Plot => "Plot",
            PropertyType::Commercial => "Commercial",
        }
    }

    pub fn modifier(&self) -> PropertyTypeModifier {
        match self {
            PropertyType::Apartment => PropertyTypeModifier {
                price_multiplier: 1.0,
                growth_modifier: 0.0,
            },
            PropertyType::Flat => PropertyTypeModifier {
                price_multiplier: 0.95,
                growth_modifier: -0.005,
            },
            PropertyType::Villa => PropertyTypeModifier {
                price_multiplier: 1.6,
                growth_modifier: 0.01,
            },
            PropertyType::Plot => PropertyTypeModifier {
                price_multiplier: 0.7,
                growth_modifier: 0.015,
            },
            PropertyType::Commercial => PropertyTypeModifier {
                price_multiplier: 1.4,
                growth_modifier: 0.005,
            },
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown property type '{0}' (expected apartment, flat, villa, plot or commercial)")]
pub struct ParsePropertyTypeError(pub String);

impl FromStr for PropertyType {
    type Err = ParsePropertyTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        PropertyType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == wanted)
            .ok_or_else(|| ParsePropertyTypeError(s.to_string()))
    }
}

// ============================================================================
// MODIFIER TABLE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropertyTypeModifier {
    /// Multiplies the location's base price
    pub price_multiplier: f64,

    /// Added to the city growth rate (signed fraction)
    pub growth_modifier: f64,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_apartment() {
        assert_eq!(PropertyType::default(), PropertyType::Apartment);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("Villa".parse::<PropertyType>(), Ok(PropertyType::Villa));
        assert_eq!(" COMMERCIAL ".parse::<PropertyType>(), Ok(PropertyType::Commercial));
        assert!("castle".parse::<PropertyType>().is_err());
    }

    #[test]
    fn test_round_trip_names() {
        for ty in PropertyType::ALL {
            assert_eq!(ty.as_str().parse::<PropertyType>(), Ok(ty));
            assert_eq!(ty.to_string(), ty.as_str());
        }
    }

    #[test]
    fn test_apartment_is_neutral() {
        let m = PropertyType::Apartment.modifier();
        assert_eq!(m.price_multiplier, 1.0);
        assert_eq!(m.growth_modifier, 0.0);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&PropertyType::Plot).unwrap();
        assert_eq!(json, "\"plot\"");
    }
}
