//! Interpreter configuration
//!
//! Loaded from a TOML file; every field is optional:
//!
//! ```toml
//! max_depth = 10000
//! max_iterations = 1000000
//! scoping = "dynamic"
//! ```

use crate::error::{PsError, Result};
use serde::Deserialize;
use std::path::Path;

/// Name resolution mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Scoping {
    /// Innermost dictionary on the live stack wins
    #[default]
    Dynamic,
    /// Accepted but resolves like `Dynamic`
    Lexical,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Maximum block nesting depth
    pub max_depth: usize,
    /// Loop iterations allowed per top-level token, nested loops included
    pub max_iterations: usize,
    pub scoping: Scoping,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_depth: 10_000,
            max_iterations: 1_000_000,
            scoping: Scoping::Dynamic,
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| PsError::config(e.message().to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| PsError::config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }
}
