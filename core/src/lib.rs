//! libbraille-core
//!
//! Chord resolution engine shared by the libbraille front-ends: turns raw
//! six-key chord input into characters, falling back to a fuzzy chord search
//! and a table of known mistyping patterns when the input has no exact match.
//!
//! Public API:
//! - `normalize`, `Chord` - canonical chord form
//! - `distance`, `is_subsequence`, `sequence_ratio` - string helpers behind the
//!   fuzzy search and dictionary matches
//! - `ChordMap`, `Resolver`, `resolve`, `Resolution` - chord → character
//! - `ErrorPatterns` - known raw-input slips and the chords they stand for
//! - `UserHistory` - per-user record of translated chords
//! - `Predictor`, `CorrectionMemory`, `Dictionary` - word suggestions
//! - `Config` - configuration and tunables

pub mod chord;
pub use chord::{is_canonical, normalize, Chord, ALPHABET};

pub mod distance;
pub use distance::{distance, is_subsequence, sequence_ratio};

pub mod patterns;
pub use patterns::{ErrorPatterns, BUILTIN_PATTERNS};

pub mod resolver;
pub use resolver::{resolve, ChordMap, Resolution, ResolveOptions, Resolver, DEFAULT_MAX_DISTANCE, SENTINEL};

pub mod history;
pub use history::{HistoryEntry, UserHistory};

pub mod suggest;
pub use suggest::{merge_suggestions, CorrectionMemory, Dictionary, Predictor};

pub mod config;
pub use config::Config;
