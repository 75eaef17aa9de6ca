//! Word suggestions.
//!
//! Two sources feed the suggestion list: close spelling matches from a
//! plain word list, and a [`Predictor`] that may take the user's history
//! and past corrections into account.
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, RwLock};

use anyhow::Context;

use crate::distance::sequence_ratio;
use crate::history::HistoryEntry;

/// Default number of dictionary matches.
pub const DEFAULT_MATCH_COUNT: usize = 5;
/// Default minimum similarity for a dictionary match.
pub const DEFAULT_CUTOFF: f64 = 0.6;

/// Word prediction capability.
///
/// Implementations must be shareable across threads; `update` takes `&self`
/// so they manage their own interior mutability.
pub trait Predictor: Send + Sync {
    /// Ranked words for `word`, best first.
    fn predict(&self, word: &str, user: &str, history: &[HistoryEntry]) -> Vec<String>;

    /// Learn that `user` replaced `original` with `corrected`.
    fn update(&self, original: &str, corrected: &str, user: &str);
}

#[derive(Debug, Clone)]
struct Correction {
    original: String,
    corrected: String,
    count: u64,
}

/// Predictor that replays each user's own corrections.
///
/// For a word the user has corrected before, the recorded replacements come
/// first (most frequent first, then oldest first). Corrected words that
/// extend the typed word as a prefix follow.
#[derive(Debug, Clone, Default)]
pub struct CorrectionMemory {
    inner: Arc<RwLock<HashMap<String, Vec<Correction>>>>,
}

impl CorrectionMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// How often `user` corrected `original` into `corrected`.
    pub fn count(&self, user: &str, original: &str, corrected: &str) -> u64 {
        let Ok(map) = self.inner.read() else {
            return 0;
        };
        map.get(user)
            .and_then(|list| {
                list.iter()
                    .find(|c| c.original == original && c.corrected == corrected)
            })
            .map_or(0, |c| c.count)
    }
}

impl Predictor for CorrectionMemory {
    fn predict(&self, word: &str, user: &str, _history: &[HistoryEntry]) -> Vec<String> {
        let Ok(map) = self.inner.read() else {
            return Vec::new();
        };
        let Some(list) = map.get(user) else {
            return Vec::new();
        };

        let mut direct: Vec<&Correction> = list.iter().filter(|c| c.original == word).collect();
        // stable: equal counts keep first-seen order
        direct.sort_by(|a, b| b.count.cmp(&a.count));

        let completions = list
            .iter()
            .filter(|c| !word.is_empty() && c.corrected != word && c.corrected.starts_with(word));

        let mut seen = HashSet::new();
        let predictions: Vec<String> = direct
            .into_iter()
            .chain(completions)
            .filter(|c| seen.insert(c.corrected.as_str()))
            .map(|c| c.corrected.clone())
            .collect();
        predictions
    }

    fn update(&self, original: &str, corrected: &str, user: &str) {
        if original.is_empty() || corrected.is_empty() || original == corrected {
            return;
        }
        if let Ok(mut map) = self.inner.write() {
            let list = map.entry(user.to_string()).or_default();
            match list
                .iter_mut()
                .find(|c| c.original == original && c.corrected == corrected)
            {
                Some(c) => c.count = c.count.saturating_add(1),
                None => list.push(Correction {
                    original: original.to_string(),
                    corrected: corrected.to_string(),
                    count: 1,
                }),
            }
            tracing::debug!(user, original, corrected, "learned correction");
        }
    }
}

/// Ordered word list used for spelling-style suggestions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: Vec<String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// One word per line; words are trimmed and lowercased, blanks and
    /// repeats dropped.
    pub fn from_lines(text: &str) -> Self {
        Self::from_words(text.lines())
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty() && seen.insert(w.clone()))
            .collect();
        Self { words }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read dictionary {}", path.display()))?;
        let dict = Self::from_lines(&text);
        tracing::debug!(path = %path.display(), words = dict.len(), "loaded dictionary");
        Ok(dict)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Up to `n` words whose [`sequence_ratio`] against `word` is at least
    /// `cutoff`, best first. Equal scores are ordered by word, descending.
    pub fn close_matches(&self, word: &str, n: usize, cutoff: f64) -> Vec<String> {
        if n == 0 {
            return Vec::new();
        }
        let mut scored: Vec<(f64, &String)> = self
            .words
            .iter()
            .map(|w| (sequence_ratio(w, word), w))
            .filter(|(score, _)| *score >= cutoff)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| b.1.cmp(a.1)));
        scored.into_iter().take(n).map(|(_, w)| w.clone()).collect()
    }
}

/// Combine dictionary matches with predictor output.
///
/// All of `basic` comes first, then the first `predicted_take` predictions;
/// duplicates keep their first position and the result is cut to `limit`.
pub fn merge_suggestions(
    basic: Vec<String>,
    predicted: Vec<String>,
    predicted_take: usize,
    limit: usize,
) -> Vec<String> {
    let mut seen = HashSet::new();
    basic
        .into_iter()
        .chain(predicted.into_iter().take(predicted_take))
        .filter(|w| seen.insert(w.clone()))
        .take(limit)
        .collect()
}
