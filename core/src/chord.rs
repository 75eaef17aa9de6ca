//! Chord normalization.
//!
//! A chord is the set of keys held down together on the six-key Braille
//! keyboard. Raw input arrives as whatever the keyboard layer produced
//! (repeated keys, upper case, stray symbols); the canonical form keeps only
//! the distinct chord keys, sorted into `ALPHABET` order.
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// The six chord keys in their fixed total order.
///
/// Dots 1..6 of a Braille cell are bound to `d`, `w`, `q`, `k`, `o`, `p`;
/// canonical chords list their keys in plain character order.
pub const ALPHABET: [char; 6] = ['d', 'k', 'o', 'p', 'q', 'w'];

/// Canonicalize raw key input.
///
/// Lowercases, drops anything outside the alphabet, collapses duplicates
/// and sorts. Never fails; empty or entirely invalid input yields `""`.
pub fn normalize(raw: &str) -> String {
    let mut pressed = [false; ALPHABET.len()];
    for c in raw.chars().flat_map(char::to_lowercase) {
        if let Some(idx) = ALPHABET.iter().position(|&k| k == c) {
            pressed[idx] = true;
        }
    }

    ALPHABET
        .iter()
        .zip(pressed)
        .filter_map(|(&k, hit)| hit.then_some(k))
        .collect()
}

/// True iff `chord` is already in canonical form.
pub fn is_canonical(chord: &str) -> bool {
    normalize(chord) == chord
}

/// A chord in canonical form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chord(String);

impl Chord {
    /// Build a chord from raw key input, normalizing it.
    pub fn from_raw(raw: &str) -> Self {
        Self(normalize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of distinct keys pressed (0..=6).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `key` is part of this chord.
    pub fn contains(&self, key: char) -> bool {
        self.0.contains(key)
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Chord {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_raw(s))
    }
}

impl AsRef<str> for Chord {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_sorts_and_dedups() {
        assert_eq!(normalize("kd"), "dk");
        assert_eq!(normalize("wokk"), "kow");
        assert_eq!(normalize("pppp"), "p");
        assert_eq!(normalize("wqpokd"), "dkopqw");
    }

    #[test]
    fn normalize_lowercases_and_filters() {
        assert_eq!(normalize("DK"), "dk");
        assert_eq!(normalize("d-k x!"), "dk");
        assert_eq!(normalize("Ωdé k"), "dk");
    }

    #[test]
    fn normalize_empty_and_invalid() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("xyz 123"), "");
    }

    #[test]
    fn canonical_check() {
        assert!(is_canonical(""));
        assert!(is_canonical("dkw"));
        assert!(!is_canonical("kd"));
        assert!(!is_canonical("dd"));
        assert!(!is_canonical("dx"));
    }

    #[test]
    fn chord_newtype() {
        let chord: Chord = "WKO".parse().unwrap();
        assert_eq!(chord.as_str(), "kow");
        assert_eq!(chord.len(), 3);
        assert!(chord.contains('w'));
        assert!(!chord.contains('d'));
        assert_eq!(chord.to_string(), "kow");
        assert!(Chord::from_raw("zz").is_empty());
    }
}
