//! Minifier configuration
//!
//! ```toml
//! # 0 = keep as written, 1 = conservative, 2 = aggressive
//! format_script = 2
//! # log the size of every strategy's output at debug level
//! log_stats = true
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::MinifyResult;
use crate::minifier::Mode;

/// Settings read from a TOML file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Raw mode index; validated by [`Config::mode`]
    pub format_script: i64,
    pub log_stats: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format_script: i64::from(Mode::default().index()),
            log_stats: false,
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse config")
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// The configured mode
    pub fn mode(&self) -> MinifyResult<Mode> {
        Mode::from_index(self.format_script)
    }
}
