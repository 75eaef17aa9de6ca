//! Braille engine for libbraille
//!
//! Ties chord resolution, per-user history and word suggestions together
//! behind the three operations an input front-end needs: translate a chord,
//! suggest words for the current word, and learn from a user's correction.

use libbraille_core::{
    merge_suggestions, normalize, ChordMap, CorrectionMemory, Dictionary, ErrorPatterns, HistoryEntry,
    Predictor, Resolution, ResolveOptions, Resolver, UserHistory,
};

use crate::config::BrailleConfig;

/// User id used when the caller does not supply one.
pub const DEFAULT_USER: &str = "default";

/// Public engine for libbraille
pub struct Engine {
    chords: ChordMap,
    patterns: ErrorPatterns,
    options: ResolveOptions,
    history: UserHistory,
    dictionary: Dictionary,
    predictor: Box<dyn Predictor>,
    suggestion_limit: usize,
    suggestion_cutoff: f64,
    predicted_take: usize,
}

impl Engine {
    /// Construct an Engine from an in-memory config. File paths in the
    /// config are ignored; see [`Engine::from_config`].
    pub fn new(config: BrailleConfig) -> Self {
        let (suggestion_limit, suggestion_cutoff, predicted_take) =
            (config.suggestion_limit, config.suggestion_cutoff, config.predicted_take);
        let base = config.into_base();
        Self {
            patterns: base.error_table(),
            options: base.resolve_options(),
            history: UserHistory::with_limit(base.history_limit),
            chords: base.chords,
            dictionary: Dictionary::new(),
            predictor: Box::new(CorrectionMemory::new()),
            suggestion_limit,
            suggestion_cutoff,
            predicted_take,
        }
    }

    /// Construct an Engine, loading the chord map and dictionary files the
    /// config points at.
    pub fn from_config(mut config: BrailleConfig) -> anyhow::Result<Self> {
        if let Some(path) = config.key_map_path.take() {
            config.base.chords = ChordMap::load_json(&path)?;
        }
        let dictionary = match config.dictionary_path.take() {
            Some(path) => Dictionary::load(&path)?,
            None => Dictionary::new(),
        };
        let engine = Self::new(config).with_dictionary(dictionary);
        tracing::info!(
            chords = engine.chords.len(),
            patterns = engine.patterns.len(),
            words = engine.dictionary.len(),
            "braille engine ready"
        );
        Ok(engine)
    }

    pub fn with_dictionary(mut self, dictionary: Dictionary) -> Self {
        self.dictionary = dictionary;
        self
    }

    /// Replace the default [`CorrectionMemory`] predictor.
    pub fn with_predictor<P: Predictor + 'static>(mut self, predictor: P) -> Self {
        self.predictor = Box::new(predictor);
        self
    }

    /// Resolve one chord and record it in `user`'s history.
    pub fn translate(&self, sequence: &str, user: &str) -> Resolution {
        let resolver = Resolver::with_options(&self.patterns, self.options);
        let normalized = normalize(sequence);
        let resolution = resolver.resolve_normalized(sequence, &normalized, &self.chords);
        self.history
            .record(user, HistoryEntry::from_resolution(sequence, &normalized, &resolution));
        resolution
    }

    /// Translate a run of chords into text.
    pub fn type_chords<I, S>(&self, sequences: I, user: &str) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        sequences
            .into_iter()
            .map(|seq| self.translate(seq.as_ref(), user).character)
            .collect()
    }

    /// Word suggestions for `word`: close dictionary matches first, then the
    /// predictor's picks.
    pub fn suggest(&self, word: &str, user: &str) -> Vec<String> {
        let word = word.to_lowercase();
        let basic = self
            .dictionary
            .close_matches(&word, self.suggestion_limit, self.suggestion_cutoff);
        let history = self.history.entries(user);
        let predicted = self.predictor.predict(&word, user, &history);
        let merged = merge_suggestions(basic, predicted, self.predicted_take, self.suggestion_limit);
        tracing::debug!(word = %word, user, count = merged.len(), "suggestions");
        merged
    }

    /// Tell the predictor that `user` replaced `original` with `corrected`.
    pub fn learn(&self, original: &str, corrected: &str, user: &str) {
        self.predictor
            .update(&original.to_lowercase(), &corrected.to_lowercase(), user);
    }

    pub fn history(&self) -> &UserHistory {
        &self.history
    }

    pub fn chords(&self) -> &ChordMap {
        &self.chords
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(BrailleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::no_error_rules;
    use libbraille_core::SENTINEL;
    use std::sync::{Arc, Mutex};

    #[test]
    fn engine_translate_records_history() {
        let engine = Engine::default();
        let r = engine.translate("WOK", "alice");
        assert_eq!(r, Resolution { character: 'j', corrected: false });

        let history = engine.history().entries("alice");
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].raw, "WOK");
        assert_eq!(history[0].normalized, "kow");
        assert_eq!(history[0].character, 'j');
    }

    #[test]
    fn engine_types_words() {
        let engine = Engine::default();
        // h-e-l-l-o
        let text = engine.type_chords(["dow", "od", "dqw", "wqd", "doq"], DEFAULT_USER);
        assert_eq!(text, "hello");
        assert_eq!(engine.history().len(DEFAULT_USER), 5);
    }

    #[test]
    fn engine_corrects_known_slip() {
        let engine = Engine::default();
        // raw "dp" is a known slip for "dq" (k)
        assert_eq!(engine.translate("dp", DEFAULT_USER), Resolution { character: 'k', corrected: true });
    }

    #[test]
    fn engine_sentinel_for_empty_layout() {
        let mut cfg = BrailleConfig::default();
        cfg.base.chords = ChordMap::new();
        let engine = Engine::new(cfg);
        assert_eq!(engine.translate("d", DEFAULT_USER).character, SENTINEL);
    }

    #[test]
    fn engine_without_error_rules_uses_fuzzy_search() {
        let mut cfg = BrailleConfig::default();
        cfg.base_mut().error_patterns = no_error_rules();
        let engine = Engine::new(cfg);
        // "dq" is no longer forced; "dpq" (u) is the nearest chord holding "dp"
        assert_eq!(engine.translate("dp", DEFAULT_USER), Resolution { character: 'u', corrected: true });
    }

    #[test]
    fn engine_suggest_and_learn() {
        let engine = Engine::default().with_dictionary(Dictionary::from_words(["hello", "help", "yellow"]));
        assert_eq!(engine.suggest("HELLO", "u"), vec!["hello", "yellow", "help"]);

        engine.learn("helo", "Hello", "u");
        engine.learn("helo", "halo", "u");
        engine.learn("helo", "halo", "u");
        assert_eq!(engine.suggest("helo", "u"), vec!["hello", "help", "yellow", "halo"]);
        // other users do not see u's corrections
        assert_eq!(engine.suggest("helo", "v"), vec!["hello", "help", "yellow"]);
    }

    /// Returns a fixed word list and records every call.
    #[derive(Clone, Default)]
    struct ScriptedPredictor {
        words: Vec<String>,
        predicted: Arc<Mutex<Vec<(String, String, usize)>>>,
        updates: Arc<Mutex<Vec<(String, String, String)>>>,
    }

    impl Predictor for ScriptedPredictor {
        fn predict(&self, word: &str, user: &str, history: &[HistoryEntry]) -> Vec<String> {
            self.predicted
                .lock()
                .unwrap()
                .push((word.to_string(), user.to_string(), history.len()));
            self.words.clone()
        }

        fn update(&self, original: &str, corrected: &str, user: &str) {
            self.updates
                .lock()
                .unwrap()
                .push((original.to_string(), corrected.to_string(), user.to_string()));
        }
    }

    #[test]
    fn engine_uses_injected_predictor() {
        let predictor = ScriptedPredictor {
            words: ["halo", "hello", "hull", "hilly", "holy"].map(String::from).to_vec(),
            ..ScriptedPredictor::default()
        };
        let engine = Engine::default()
            .with_dictionary(Dictionary::from_words(["hello"]))
            .with_predictor(predictor.clone());
        engine.translate("dow", "u");

        // first three predictions after the dictionary match, "hello" once
        assert_eq!(engine.suggest("Hello", "u"), vec!["hello", "halo", "hull"]);
        assert_eq!(*predictor.predicted.lock().unwrap(), vec![("hello".to_string(), "u".to_string(), 1)]);

        engine.learn("Helo", "HELLO", "u");
        assert_eq!(
            *predictor.updates.lock().unwrap(),
            vec![("helo".to_string(), "hello".to_string(), "u".to_string())]
        );
    }
}
