//! Pool configuration — weighted entries loaded from TOML or JSON.
//!
//! ```toml
//! seed = 42
//!
//! [entries]
//! "{NO.1}" = 10.0
//! "{NO.2}" = 50.0
//! "{Super Big Prize!!!}" = 0.1
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::registry::{RegistryError, WeightedChoice};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read pool file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse pool TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("parse pool JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid pool: {0}")]
    Registry(#[from] RegistryError),
    #[error("pool has no entries")]
    NoEntries,
}

/// A named pool of weighted entries plus an optional seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Seed for reproducible draws. Absent means a uniquely seeded source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Key → weight.
    pub entries: BTreeMap<String, f64>,
}

impl PoolConfig {
    /// Load a pool file. `.json` files are parsed as JSON, everything else as TOML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_toml(&content)
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Validate the entries and build the registry.
    pub fn to_choice(&self) -> Result<WeightedChoice<String>, ConfigError> {
        if self.entries.is_empty() {
            return Err(ConfigError::NoEntries);
        }
        let choice = WeightedChoice::from_entries(
            self.entries.iter().map(|(key, &weight)| (key.clone(), weight)),
        )?;
        Ok(choice)
    }
}
