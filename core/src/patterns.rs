//! Known chord mistyping patterns.
//!
//! Some raw key combinations are known to be slips for another chord (an
//! extra key brushed, a key released too early, two neighbouring keys
//! swapped). The table maps the literal raw input to the chord the typist
//! most likely meant.
use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// Built-in mistyping patterns as `(raw, intended chord)` pairs.
pub const BUILTIN_PATTERNS: [(&str, &str); 7] = [
    ("dkp", "dk"),  // extra key
    ("dwk", "dw"),  // extra key
    ("doq", "dq"),  // extra key
    ("kq", "kqw"),  // missing key
    ("ko", "kow"),  // missing key
    ("dp", "dq"),   // neighbour confusion
    ("wk", "dw"),   // neighbour confusion
];

static BUILTIN: Lazy<ErrorPatterns> = Lazy::new(|| ErrorPatterns::from_pairs(BUILTIN_PATTERNS));

/// Insertion-ordered table from raw input to intended canonical chord.
///
/// Keys are matched against the raw input exactly as typed, before any
/// normalization. Targets may name chords that are absent from the live
/// chord map; such entries are simply never applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorPatterns {
    map: IndexMap<String, String>,
}

impl ErrorPatterns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared instance of the built-in table.
    pub fn builtin() -> &'static ErrorPatterns {
        &BUILTIN
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = Self::new();
        for (raw, chord) in pairs {
            table.insert(raw, chord);
        }
        table
    }

    /// Build a table from textual rules of the form `"raw=chord"`.
    ///
    /// Whitespace around either side is trimmed. Entries without `=` or
    /// with an empty side are skipped.
    pub fn from_rules(rules: &[String]) -> Self {
        let mut table = Self::new();
        for rule in rules {
            match rule.split_once('=') {
                Some((raw, chord)) if !raw.trim().is_empty() && !chord.trim().is_empty() => {
                    table.insert(raw.trim(), chord.trim());
                }
                _ => tracing::warn!(rule = %rule, "skipping malformed error pattern"),
            }
        }
        table
    }

    /// Add or replace a pattern. A replaced entry keeps its original position.
    pub fn insert(&mut self, raw: impl Into<String>, chord: impl Into<String>) {
        self.map.insert(raw.into(), chord.into());
    }

    /// Intended chord for a raw input, if the input is a known slip.
    pub fn get(&self, raw: &str) -> Option<&str> {
        self.map.get(raw).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Textual `raw=chord` rules, the inverse of [`ErrorPatterns::from_rules`].
    pub fn to_rules(&self) -> Vec<String> {
        self.iter().map(|(raw, chord)| format!("{raw}={chord}")).collect()
    }
}
