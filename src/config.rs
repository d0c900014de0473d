// 🔧 Configuration - JSON file + environment overrides
//
// Resolution order: defaults → $REALTY_CONFIG file → PORT / REALTY_REFERENCE_YEAR

use crate::property::PropertyType;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_PATH_VAR: &str = "REALTY_CONFIG";
pub const PORT_VAR: &str = "PORT";
pub const REFERENCE_YEAR_VAR: &str = "REALTY_REFERENCE_YEAR";

/// Reference years the synthesizer can offset by ±12 without overflow
pub const REFERENCE_YEARS: RangeInclusive<i32> = 1900..=9999;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid port: {0:?}")]
    InvalidPort(String),

    #[error("invalid reference year: {0:?}")]
    InvalidYear(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Treat this as the current year instead of the wall clock
    pub reference_year: Option<i32>,
    pub default_property_type: PropertyType,
    pub host: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            reference_year: None,
            default_property_type: PropertyType::default(),
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        if let Some(year) = config.reference_year {
            check_year(year, &year.to_string())?;
        }
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Apply overrides from any variable source
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(PORT_VAR) {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }
        if let Some(year) = lookup(REFERENCE_YEAR_VAR) {
            let parsed: i32 = year
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidYear(year.clone()))?;
            self.reference_year = Some(check_year(parsed, &year)?);
        }
        Ok(self)
    }

    /// Defaults, then the file named by `$REALTY_CONFIG`, then env overrides
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::load(path)?,
            Err(_) => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn check_year(year: i32, raw: &str) -> Result<i32, ConfigError> {
    if REFERENCE_YEARS.contains(&year) {
        Ok(year)
    } else {
        Err(ConfigError::InvalidYear(raw.to_string()))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.default_property_type, PropertyType::Apartment);
        assert!(config.reference_year.is_none());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AppConfig::from_json(r#"{"port": 8080, "default_property_type": "villa"}"#).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.default_property_type, PropertyType::Villa);
    }

    #[test]
    fn test_invalid_json() {
        let err = AppConfig::from_json("{ port: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::load("/nonexistent/realty.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("realty-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"reference_year": 2024, "host": "127.0.0.1"}"#).unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.reference_year, Some(2024));
        assert_eq!(config.bind_address(), "127.0.0.1:3000");

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::default()
            .with_overrides(vars(&[("PORT", "9090"), ("REALTY_REFERENCE_YEAR", "2031")]))
            .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.reference_year, Some(2031));
    }

    #[test]
    fn test_invalid_overrides() {
        let err = AppConfig::default()
            .with_overrides(vars(&[("PORT", "http")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(p) if p == "http"));

        let err = AppConfig::default()
            .with_overrides(vars(&[("REALTY_REFERENCE_YEAR", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidYear(_)));
    }

    #[test]
    fn test_out_of_range_year_is_rejected() {
        let err = AppConfig::default()
            .with_overrides(vars(&[("REALTY_REFERENCE_YEAR", "2147483647")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidYear(y) if y == "2147483647"));

        let err = AppConfig::default()
            .with_overrides(vars(&[("REALTY_REFERENCE_YEAR", "-5")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidYear(_)));

        let err = AppConfig::from_json(r#"{"reference_year": 2147483647}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidYear(_)));

        let config = AppConfig::default()
            .with_overrides(vars(&[("REALTY_REFERENCE_YEAR", "9999")]))
            .unwrap();
        assert_eq!(config.reference_year, Some(9999));
    }
}
