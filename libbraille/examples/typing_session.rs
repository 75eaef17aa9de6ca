//! Type a short word with a few slips, then ask for suggestions.
//!
//! Run with `RUST_LOG=debug` to see which chords were corrected and why.

use libbraille::{Dictionary, Engine, DEFAULT_USER};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let engine = Engine::default().with_dictionary(Dictionary::from_words(["braille", "brain", "bright", "rail"]));

    // b r a i l l e, with dot 1 released early on r (doqw) and the first l (dqw)
    let chords = ["dw", "oqw", "d", "kw", "qw", "dqw", "do"];
    let mut word = String::new();
    for chord in chords {
        let r = engine.translate(chord, DEFAULT_USER);
        println!("{:>6} -> {}{}", chord, r.character, if r.corrected { "  (corrected)" } else { "" });
        word.push(r.character);
    }
    println!("typed: {word}");
    println!("suggestions: {:?}", engine.suggest(&word, DEFAULT_USER));
}
