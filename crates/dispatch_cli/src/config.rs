//! Front-end configuration file (JSON).
//!
//! ```json
//! {
//!   "fleet_file": "cabs.txt",
//!   "dispatch": { "fare_per_unit": 10, "backlog_miss_policy": "retain" },
//!   "network": { "kind": "linear", "nodes": 10 }
//! }
//! ```
//!
//! Every field is optional.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use dispatch_core::config::{DispatchConfig, NetworkConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_FLEET_FILE: &str = "cabs.txt";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub fleet_file: PathBuf,
    pub dispatch: DispatchConfig,
    pub network: NetworkConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fleet_file: PathBuf::from(DEFAULT_FLEET_FILE),
            dispatch: DispatchConfig::default(),
            network: NetworkConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }
}
