//! Shared configuration for chord resolution.
//!
//! Designed to be deserialized from TOML. Front-end crates extend it by
//! flattening it into their own config type.
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::patterns::ErrorPatterns;
use crate::resolver::{ChordMap, ResolveOptions, DEFAULT_MAX_DISTANCE};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Known mistyping rules as `"raw=chord"` pairs (e.g. "dkp=dk")
    pub error_patterns: Vec<String>,

    /// Largest edit distance accepted by the fuzzy search
    pub max_distance: usize,

    /// Let error patterns override exact chord matches as well
    pub override_exact: bool,

    /// Cap on stored history entries per user; unbounded when absent
    pub history_limit: Option<usize>,

    /// Canonical chord → character table
    pub chords: ChordMap,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            error_patterns: ErrorPatterns::builtin().to_rules(),
            max_distance: DEFAULT_MAX_DISTANCE,
            override_exact: false,
            history_limit: None,
            // Empty chord map by default - front-ends ship their own layout
            chords: ChordMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content).with_context(|| format!("failed to write config {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            max_distance: self.max_distance,
            override_exact: self.override_exact,
        }
    }

    /// Parsed form of `error_patterns`.
    pub fn error_table(&self) -> ErrorPatterns {
        ErrorPatterns::from_rules(&self.error_patterns)
    }
}
