//! Configuration file loading
//!
//! An optional `.bundle-dedupe.toml` in the working directory supplies
//! defaults the CLI flags can override.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = ".bundle-dedupe.toml";

/// bundle-dedupe configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Duplication groups wasting fewer bytes than this merge into "Other"
    #[serde(
        rename = "ignore-threshold-bytes",
        skip_serializing_if = "Option::is_none"
    )]
    pub ignore_threshold_bytes: Option<u64>,
}

impl ConfigFile {
    /// Load config from `.bundle-dedupe.toml` in the given directory.
    ///
    /// A missing file yields the defaults; an unreadable or invalid one
    /// is an error, reported before any analysis starts.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        let contents = match std::fs::read_to_string(&config_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(ConfigFile::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", CONFIG_FILE_NAME));
            }
        };

        toml_edit::de::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", CONFIG_FILE_NAME))
    }
}
