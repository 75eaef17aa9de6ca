//! Chord resolution: exact lookup, two-phase fuzzy fallback and
//! known-error-pattern override.
use std::path::Path;

use anyhow::Context;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::chord::{is_canonical, normalize};
use crate::distance::{distance, is_subsequence};
use crate::patterns::ErrorPatterns;

/// Placeholder character for "no chord resolved".
pub const SENTINEL: char = '?';

/// Default edit-distance tolerance for fuzzy matches.
pub const DEFAULT_MAX_DISTANCE: usize = 2;

/// Canonical chord → output character.
///
/// Iteration follows insertion order, which fixes tie-breaking in the fuzzy
/// search. Keys are expected to be canonical already; the map does not
/// re-normalize them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChordMap {
    map: IndexMap<String, char>,
}

impl ChordMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, chord: impl Into<String>, character: char) {
        self.map.insert(chord.into(), character);
    }

    pub fn get(&self, chord: &str) -> Option<char> {
        self.map.get(chord).copied()
    }

    /// Like [`ChordMap::get`] but falls back to [`SENTINEL`].
    pub fn lookup(&self, chord: &str) -> char {
        self.get(chord).unwrap_or(SENTINEL)
    }

    pub fn contains(&self, chord: &str) -> bool {
        self.map.contains_key(chord)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, char)> {
        self.map.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Keys that are not in canonical chord form.
    pub fn non_canonical_keys(&self) -> Vec<&str> {
        self.keys().filter(|k| !is_canonical(k)).collect()
    }

    /// Parse a JSON object of `"chord": "c"` pairs, keeping file order.
    pub fn from_json_str(content: &str) -> anyhow::Result<Self> {
        let map: ChordMap = serde_json::from_str(content).context("invalid chord map JSON")?;
        for key in map.non_canonical_keys() {
            tracing::warn!(chord = key, "chord map key is not in canonical form");
        }
        Ok(map)
    }

    /// Load a JSON chord map file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read chord map {}", path.display()))?;
        let map = Self::from_json_str(&content)
            .with_context(|| format!("failed to parse chord map {}", path.display()))?;
        tracing::debug!(path = %path.display(), chords = map.len(), "loaded chord map");
        Ok(map)
    }
}

impl<K: Into<String>> FromIterator<(K, char)> for ChordMap {
    fn from_iter<I: IntoIterator<Item = (K, char)>>(iter: I) -> Self {
        let mut map = ChordMap::new();
        for (chord, character) in iter {
            map.insert(chord, character);
        }
        map
    }
}

/// Outcome of resolving one raw chord.
///
/// `corrected` is true iff `character` differs from a plain exact lookup of
/// the normalized input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    #[serde(rename = "char")]
    pub character: char,
    #[serde(rename = "was_corrected")]
    pub corrected: bool,
}

impl Resolution {
    /// False when nothing matched and the sentinel was returned.
    pub fn is_resolved(&self) -> bool {
        self.character != SENTINEL
    }
}

/// Tunables for [`Resolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveOptions {
    /// Largest edit distance a fuzzy candidate may have.
    pub max_distance: usize,
    /// Also apply error-pattern overrides when the input matched exactly.
    pub override_exact: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_MAX_DISTANCE,
            override_exact: false,
        }
    }
}

/// Resolves raw chords against a chord map.
///
/// Holds only shared references, so one resolver can serve any number of
/// threads concurrently.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    patterns: &'a ErrorPatterns,
    options: ResolveOptions,
}

impl Default for Resolver<'static> {
    fn default() -> Self {
        Self::new(ErrorPatterns::builtin())
    }
}

impl<'a> Resolver<'a> {
    pub fn new(patterns: &'a ErrorPatterns) -> Self {
        Self {
            patterns,
            options: ResolveOptions::default(),
        }
    }

    pub fn with_options(patterns: &'a ErrorPatterns, options: ResolveOptions) -> Self {
        Self { patterns, options }
    }

    pub fn options(&self) -> ResolveOptions {
        self.options
    }

    /// Resolve `raw` to a character.
    ///
    /// Order: exact lookup of the normalized chord; on a miss, the fuzzy
    /// search of [`Resolver::closest_chord`]; then the error-pattern override
    /// keyed on the raw, un-normalized input.
    pub fn resolve(&self, raw: &str, chords: &ChordMap) -> Resolution {
        self.resolve_normalized(raw, &normalize(raw), chords)
    }

    /// [`Resolver::resolve`] for callers that already hold `normalize(raw)`.
    ///
    /// `normalized` drives the lookups and the fuzzy search; error patterns
    /// are still keyed on `raw`.
    pub fn resolve_normalized(&self, raw: &str, normalized: &str, chords: &ChordMap) -> Resolution {
        let baseline = chords.lookup(normalized);
        let exact = baseline != SENTINEL;
        let mut character = baseline;

        if exact {
            tracing::trace!(raw, chord = %normalized, %character, "exact chord match");
        } else if let Some((chord, dist)) = self.closest_chord(normalized, chords) {
            character = chords.lookup(chord);
            tracing::debug!(raw, input = %normalized, chord, dist, %character, "fuzzy chord match");
        }

        if !exact || self.options.override_exact {
            if let Some(intended) = self.patterns.get(raw) {
                match chords.get(intended) {
                    Some(c) => {
                        tracing::debug!(raw, intended, character = %c, "known error pattern applied");
                        character = c;
                    }
                    None => {
                        tracing::trace!(raw, intended, "error pattern target not in chord map");
                    }
                }
            }
        }

        Resolution {
            character,
            corrected: character != baseline,
        }
    }

    /// Nearest chord to an already-normalized input, with its distance.
    ///
    /// Phase one only considers chords that contain `normalized` as a
    /// subsequence. If that yields nothing within tolerance, phase two scans
    /// every chord, starting from phase one's best rather than from scratch.
    /// Ties go to the earliest chord in map order.
    pub fn closest_chord<'m>(&self, normalized: &str, chords: &'m ChordMap) -> Option<(&'m str, usize)> {
        let max = self.options.max_distance;
        let mut best: Option<(&'m str, usize)> = None;

        for chord in chords.keys() {
            if is_subsequence(normalized, chord) {
                consider(&mut best, chord, distance(normalized, chord));
            }
        }
        if let Some(hit) = best.filter(|&(_, d)| d <= max) {
            return Some(hit);
        }

        for chord in chords.keys() {
            consider(&mut best, chord, distance(normalized, chord));
        }
        best.filter(|&(_, d)| d <= max)
    }
}

fn consider<'m>(best: &mut Option<(&'m str, usize)>, chord: &'m str, dist: usize) {
    if best.map_or(true, |(_, min)| dist < min) {
        *best = Some((chord, dist));
    }
}

/// Resolve with the built-in error patterns and default options.
pub fn resolve(raw: &str, chords: &ChordMap) -> Resolution {
    Resolver::default().resolve(raw, chords)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc_map() -> ChordMap {
        [("dk", 'A'), ("dw", 'B'), ("kow", 'C')].into_iter().collect()
    }

    #[test]
    fn exact_match_is_not_corrected() {
        let map = abc_map();
        assert_eq!(resolve("kd", &map), Resolution { character: 'A', corrected: false });
        assert_eq!(resolve("WOK", &map), Resolution { character: 'C', corrected: false });
    }

    #[test]
    fn neighbour_confusion_falls_back_to_nearest() {
        // "dp" -> "dq" is a known slip, but "dq" is not mapped here.
        let map = abc_map();
        assert_eq!(resolve("dp", &map), Resolution { character: 'A', corrected: true });
    }

    #[test]
    fn override_beats_fuzzy_choice() {
        let map: ChordMap = [("dk", 'A')].into_iter().collect();
        assert_eq!(resolve("dkp", &map), Resolution { character: 'A', corrected: true });

        // fuzzy alone would pick "dkq"; the pattern for raw "dkp" wins
        let map: ChordMap = [("dkq", 'X'), ("dk", 'A')].into_iter().collect();
        assert_eq!(resolve("dkp", &map), Resolution { character: 'A', corrected: true });
    }

    #[test]
    fn override_uses_raw_input_not_normalized() {
        let map: ChordMap = [("dkq", 'X'), ("dk", 'A')].into_iter().collect();
        // "pkd" normalizes to "dkp" but is not itself a known pattern
        assert_eq!(resolve("pkd", &map), Resolution { character: 'X', corrected: true });
    }

    #[test]
    fn override_of_exact_match_is_opt_in() {
        let map: ChordMap = [("doq", 'o'), ("dq", 'k')].into_iter().collect();
        assert_eq!(resolve("doq", &map), Resolution { character: 'o', corrected: false });

        let patterns = ErrorPatterns::builtin();
        let resolver = Resolver::with_options(
            patterns,
            ResolveOptions { override_exact: true, ..ResolveOptions::default() },
        );
        assert_eq!(resolver.resolve("doq", &map), Resolution { character: 'k', corrected: true });
    }

    #[test]
    fn subsequence_phase_is_preferred() {
        // "k" is closer, but only "dko" contains "d"
        let map: ChordMap = [("k", 'K'), ("dko", 'D')].into_iter().collect();
        let resolver = Resolver::default();
        assert_eq!(resolver.closest_chord("d", &map), Some(("dko", 2)));
    }

    #[test]
    fn unconstrained_phase_runs_when_subsequence_hit_is_too_far() {
        // only "dkopq" contains "dk" and it sits at 3; the full scan finds
        // "wq" and "pq" at 2 and the earlier one wins
        let map: ChordMap = [("dkopq", 'L'), ("wq", 'W'), ("pq", 'P')].into_iter().collect();
        let resolver = Resolver::default();
        assert_eq!(resolver.closest_chord("dk", &map), Some(("wq", 2)));
        assert_eq!(resolve("dk", &map), Resolution { character: 'W', corrected: true });
    }

    #[test]
    fn resolve_normalized_matches_resolve() {
        let map: ChordMap = [("dkq", 'X'), ("dk", 'A'), ("kow", 'C')].into_iter().collect();
        let resolver = Resolver::default();
        for raw in ["WOK", "dkp", "pkd", "w", ""] {
            assert_eq!(resolver.resolve_normalized(raw, &normalize(raw), &map), resolver.resolve(raw, &map), "{raw}");
        }
        // the pattern still keys on the raw text
        assert_eq!(resolver.resolve_normalized("dkp", "dkp", &map).character, 'A');
        assert_eq!(resolver.resolve_normalized("pkd", "dkp", &map).character, 'X');
    }

    #[test]
    fn nothing_within_tolerance() {
        let map: ChordMap = [("dkopqw", 'Z')].into_iter().collect();
        assert_eq!(resolve("w", &map), Resolution { character: SENTINEL, corrected: false });
        assert!(!resolve("w", &map).is_resolved());
    }

    #[test]
    fn ties_go_to_first_inserted() {
        let map: ChordMap = [("dw", 'B'), ("dk", 'A')].into_iter().collect();
        assert_eq!(resolve("d", &map).character, 'B');
        let map: ChordMap = [("dk", 'A'), ("dw", 'B')].into_iter().collect();
        assert_eq!(resolve("d", &map).character, 'A');
    }

    #[test]
    fn empty_input_picks_shortest_chord() {
        let map: ChordMap = [("kow", 'C'), ("dk", 'A'), ("d", 'a')].into_iter().collect();
        assert_eq!(resolve("", &map), Resolution { character: 'a', corrected: true });

        let map: ChordMap = [("kow", 'C'), ("dkw", 'F')].into_iter().collect();
        assert_eq!(resolve("", &map), Resolution { character: SENTINEL, corrected: false });
    }

    #[test]
    fn empty_map_yields_sentinel() {
        let map = ChordMap::new();
        assert_eq!(resolve("dk", &map), Resolution { character: SENTINEL, corrected: false });
    }

    #[test]
    fn sentinel_value_counts_as_miss() {
        // the fuzzy search runs, lands on "dk" itself and yields its value again
        let map: ChordMap = [("dk", SENTINEL), ("dkw", 'F')].into_iter().collect();
        assert_eq!(resolve("dk", &map), Resolution { character: SENTINEL, corrected: false });
        assert_eq!(Resolver::default().closest_chord("dk", &map), Some(("dk", 0)));
    }

    #[test]
    fn resolution_wire_shape() {
        let json = serde_json::to_string(&Resolution { character: 'A', corrected: true }).unwrap();
        assert_eq!(json, r#"{"char":"A","was_corrected":true}"#);
    }

    #[test]
    fn chord_map_json_keeps_order() {
        let map = ChordMap::from_json_str(r#"{"dw": "b", "d": "a", "dk": "c"}"#).unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["dw", "d", "dk"]);
        assert_eq!(map.get("d"), Some('a'));
        assert!(ChordMap::from_json_str(r#"{"d": "ab"}"#).is_err());
    }
}
