//! # libbraille
//!
//! Six-key Braille chord input engine built on libbraille-core.

pub mod config;
pub mod engine;
pub mod presets;

// Re-export the resolution core
pub use libbraille_core::*;

pub use config::BrailleConfig;
pub use engine::{Engine, DEFAULT_USER};
pub use presets::{default_error_rules, english_chord_map, no_error_rules, ENGLISH_LETTERS};
