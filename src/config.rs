//! Configuration for the protodeps command line tool

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::models::ROOT_PATH;
use crate::reader::FileReader;

/// Default tracing filter when `RUST_LOG` is not set
const DEFAULT_LOG_FILTER: &str = "info";

/// Tool configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory resolved dependencies are materialized into
    pub root_path: PathBuf,
    /// Tracing filter directive (e.g. "debug", "protodeps=trace")
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_path: PathBuf::from(ROOT_PATH),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    ///
    /// Missing fields take their default. An unreadable or malformed file is
    /// an error.
    pub fn load(reader: &impl FileReader, path: &Path) -> anyhow::Result<Self> {
        let content = reader
            .read_file(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_slice(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }
}
