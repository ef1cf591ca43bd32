//! City-list configuration.
//!
//! A JSON document maps city names to their station-plan files:
//!
//! ```json
//! { "cities": [ { "city": "paris", "plan": "paris.plan" } ] }
//! ```
//!
//! Relative plan paths are resolved against the directory containing the
//! configuration file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// One configured city.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CityEntry {
    /// City name as used in URLs and registry lookups.
    pub city: String,
    /// Path of the station-plan file.
    pub plan: PathBuf,
}

/// A malformed or unreadable city configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("configuration lists no cities")]
    NoCities,

    #[error("city {0:?} is configured twice")]
    DuplicateCity(String),
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    cities: Vec<CityEntry>,
}

/// The validated city list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitiesConfig {
    cities: Vec<CityEntry>,
}

impl CitiesConfig {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let raw: RawConfig = serde_json::from_str(&text)?;
        if raw.cities.is_empty() {
            return Err(ConfigError::NoCities);
        }
        for (i, entry) in raw.cities.iter().enumerate() {
            if raw.cities[..i].iter().any(|e| e.city == entry.city) {
                return Err(ConfigError::DuplicateCity(entry.city.clone()));
            }
        }

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        let cities = raw
            .cities
            .into_iter()
            .map(|entry| CityEntry {
                plan: if entry.plan.is_relative() {
                    base.join(&entry.plan)
                } else {
                    entry.plan
                },
                city: entry.city,
            })
            .collect();

        Ok(Self { cities })
    }

    /// Configured cities, in file order.
    pub fn cities(&self) -> &[CityEntry] {
        &self.cities
    }
}
