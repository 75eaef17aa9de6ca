//! Built-in chord layouts and mistyping rules.
//!
//! ## Key layout
//!
//! The six chord keys stand for the six dots of a Braille cell:
//!
//! ```text
//!   dot 1 = d    dot 4 = k
//!   dot 2 = w    dot 5 = o
//!   dot 3 = q    dot 6 = p
//! ```
//!
//! A letter's chord is the set of keys for its raised dots, written in
//! canonical (sorted) form, so `b` (dots 1-2) is `dw` and `j` (dots 2-4-5)
//! is `kow`.
use libbraille_core::{ChordMap, BUILTIN_PATTERNS};
use once_cell::sync::Lazy;

/// Grade 1 English Braille letters as `(chord, letter)` pairs.
pub const ENGLISH_LETTERS: [(&str, char); 26] = [
    ("d", 'a'),     // 1
    ("dw", 'b'),    // 12
    ("dk", 'c'),    // 14
    ("dko", 'd'),   // 145
    ("do", 'e'),    // 15
    ("dkw", 'f'),   // 124
    ("dkow", 'g'),  // 1245
    ("dow", 'h'),   // 125
    ("kw", 'i'),    // 24
    ("kow", 'j'),   // 245
    ("dq", 'k'),    // 13
    ("dqw", 'l'),   // 123
    ("dkq", 'm'),   // 134
    ("dkoq", 'n'),  // 1345
    ("doq", 'o'),   // 135
    ("dkqw", 'p'),  // 1234
    ("dkoqw", 'q'), // 12345
    ("doqw", 'r'),  // 1235
    ("kqw", 's'),   // 234
    ("koqw", 't'),  // 2345
    ("dpq", 'u'),   // 136
    ("dpqw", 'v'),  // 1236
    ("kopw", 'w'),  // 2456
    ("dkpq", 'x'),  // 1346
    ("dkopq", 'y'), // 13456
    ("dopq", 'z'),  // 1356
];

static ENGLISH: Lazy<ChordMap> = Lazy::new(|| ENGLISH_LETTERS.into_iter().collect());

/// The English letter layout as a chord map, in alphabetical letter order.
pub fn english_chord_map() -> ChordMap {
    ENGLISH.clone()
}

/// Built-in mistyping rules in `raw=chord` form.
pub fn default_error_rules() -> Vec<String> {
    BUILTIN_PATTERNS
        .iter()
        .map(|(raw, chord)| format!("{raw}={chord}"))
        .collect()
}

/// No mistyping rules; only the fuzzy search corrects input.
pub fn no_error_rules() -> Vec<String> {
    Vec::new()
}
