//! Layered settings.
//!
//! Defaults, then an optional TOML file, then `SIMDASH_*` environment
//! variables (e.g. `SIMDASH_BASE_URL`). CLI flags override on top.
//!
//! ```toml
//! base_url = "http://127.0.0.1:8080"
//! resource_path = "/simulation_data.json"
//! request_timeout_secs = 10
//! export_path = "simulation_data.csv"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::export::EXPORT_FILE_NAME;
use crate::source::{resource_url, RESOURCE_PATH};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Server serving the record resource.
    pub base_url: String,
    /// Path of the record resource on the server.
    pub resource_path: String,
    pub request_timeout_secs: u64,
    /// How long the CLI waits for the single load to finish.
    pub load_timeout_secs: u64,
    pub export_path: PathBuf,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            resource_path: RESOURCE_PATH.to_string(),
            request_timeout_secs: 10,
            load_timeout_secs: 30,
            export_path: PathBuf::from(EXPORT_FILE_NAME),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from an optional file plus the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(Environment::with_prefix("SIMDASH"))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Full URL of the record resource.
    pub fn resource_url(&self) -> String {
        resource_url(&self.base_url, &self.resource_path)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_secs(self.load_timeout_secs)
    }
}
