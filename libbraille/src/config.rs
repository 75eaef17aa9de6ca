//! Braille-specific configuration that extends the base `Config` from core.
//!
//! This configuration includes:
//! - All chord resolution options from `libbraille_core::Config` (flattened via serde)
//! - Word suggestion tunables
//! - Optional external chord map and dictionary files
//!
//! # Example
//!
//! ```rust
//! use libbraille::BrailleConfig;
//!
//! let config = BrailleConfig::default();
//! assert_eq!(config.base().chords.len(), 26);
//! ```
use std::path::{Path, PathBuf};

use anyhow::Context;
use libbraille_core::suggest::{DEFAULT_CUTOFF, DEFAULT_MATCH_COUNT};
use serde::{Deserialize, Serialize};

use crate::presets::{default_error_rules, english_chord_map};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BrailleConfig {
    /// Maximum number of suggestions returned
    pub suggestion_limit: usize,

    /// Minimum similarity (0.0-1.0) for dictionary suggestions
    pub suggestion_cutoff: f64,

    /// How many predictor results are merged after the dictionary matches
    pub predicted_take: usize,

    /// Word list, one word per line
    pub dictionary_path: Option<PathBuf>,

    /// JSON chord map replacing the built-in layout
    pub key_map_path: Option<PathBuf>,

    /// Base configuration fields (chords, error patterns, tolerance)
    #[serde(flatten)]
    pub base: libbraille_core::Config,
}

impl Default for BrailleConfig {
    fn default() -> Self {
        let mut base = libbraille_core::Config::default();
        base.chords = english_chord_map();
        base.error_patterns = default_error_rules();

        Self {
            suggestion_limit: DEFAULT_MATCH_COUNT,
            suggestion_cutoff: DEFAULT_CUTOFF,
            predicted_take: 3,
            dictionary_path: None,
            key_map_path: None,
            base,
        }
    }
}

impl BrailleConfig {
    /// Load a TOML config file. Missing fields keep their defaults.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let cfg = Self::from_toml_str(&content).with_context(|| format!("failed to parse config {}", path.display()))?;
        tracing::debug!(path = %path.display(), chords = cfg.base.chords.len(), "loaded braille config");
        Ok(cfg)
    }

    /// Parse TOML. A config without a `[chords]` table gets the built-in
    /// English layout.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let mut cfg: BrailleConfig = toml::from_str(content)?;
        if cfg.base.chords.is_empty() {
            cfg.base.chords = english_chord_map();
        }
        Ok(cfg)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Convert this braille config into the base config
    pub fn into_base(self) -> libbraille_core::Config {
        self.base
    }

    /// Get a reference to the base config
    pub fn base(&self) -> &libbraille_core::Config {
        &self.base
    }

    /// Get a mutable reference to the base config
    pub fn base_mut(&mut self) -> &mut libbraille_core::Config {
        &mut self.base
    }
}
