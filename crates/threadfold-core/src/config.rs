//! Configuration for the folding engine.
//!
//! Loads from a TOML file with sensible defaults; a missing file is not an
//! error, and a partial file merges field-by-field with the defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Folding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FoldConfig {
    /// Whether unread messages may be hidden inside a fold.
    ///
    /// Off by default: folding must not hide a message the user hasn't
    /// seen unless they opted in.
    pub fold_unread: bool,

    /// Marker prepended to the fold summary on the root line.
    pub summary_prefix: String,
}

impl Default for FoldConfig {
    fn default() -> Self {
        Self {
            fold_unread: false,
            summary_prefix: "▸ ".to_string(),
        }
    }
}

impl FoldConfig {
    /// Loads configuration from a specific path.
    ///
    /// Returns defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }
}
