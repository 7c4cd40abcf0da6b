//! Explorer configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::data::{ElevationBuckets, RegionMode, DEFAULT_CACHE_CAPACITY};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "AIRPORT_EXPLORER_CONFIG";

/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "airport-explorer.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Settings for the explorer.
///
/// Every field is optional in the JSON file; missing ones take the defaults
/// below.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExplorerConfig {
    /// Airport table loaded at startup.
    pub data_path: PathBuf,
    /// Region codes offered in the region selector.
    pub regions: Vec<String>,
    pub region_mode: RegionMode,
    /// Elevation band policy.
    pub buckets: ElevationBuckets,
    /// How many of the dataset's types start out selected.
    pub default_type_count: usize,
    /// Memoize filter results.
    pub cache_queries: bool,
    /// Most filter results kept when caching; older ones are evicted.
    pub cache_capacity: usize,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("new_england_airports.csv"),
            regions: ["MA", "CT", "RI", "NH", "VT", "ME"]
                .into_iter()
                .map(String::from)
                .collect(),
            region_mode: RegionMode::Single,
            buckets: ElevationBuckets::standard(),
            default_type_count: 2,
            cache_queries: true,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl ExplorerConfig {
    /// Read a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Capacity handed to the query engine; 0 when caching is off.
    pub fn effective_cache_capacity(&self) -> usize {
        if self.cache_queries {
            self.cache_capacity
        } else {
            0
        }
    }

    /// Resolve the config: `$AIRPORT_EXPLORER_CONFIG`, then
    /// `airport-explorer.json` in the working directory, then defaults.
    ///
    /// An explicitly named file that cannot be read is an error; a missing
    /// default file is not.
    pub fn discover() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            let path = PathBuf::from(path);
            log::info!("Using config from ${CONFIG_ENV}: {}", path.display());
            return Self::from_file(&path);
        }

        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            log::info!("Using config from {}", local.display());
            return Self::from_file(local);
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }
}
