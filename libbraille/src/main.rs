use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use libbraille::{BrailleConfig, Engine, Resolution, DEFAULT_USER};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "libbraille")]
#[command(about = "Six-key Braille chord input with fuzzy correction and word suggestions")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// User id for history and learned corrections
    #[arg(short, long, global = true, default_value = DEFAULT_USER)]
    user: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive mode: one chord per line
    Repl,
    /// Resolve chords given on the command line
    Translate {
        /// Raw chords, e.g. `dk wok`
        #[arg(required = true)]
        chords: Vec<String>,
        /// Print each resolution as JSON
        #[arg(long)]
        json: bool,
    },
    /// Suggest words for a partial or misspelled word
    Suggest {
        word: String,
    },
    /// Print the effective configuration as TOML
    ShowConfig,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<BrailleConfig> {
    match path {
        Some(path) => BrailleConfig::load_toml(path),
        None => Ok(BrailleConfig::default()),
    }
}

fn print_resolution(raw: &str, r: &Resolution) {
    let mark = if r.corrected { " (corrected)" } else { "" };
    println!("{} -> {}{}", raw, r.character, mark);
}

fn run_repl(engine: &Engine, user: &str) -> Result<()> {
    println!("libbraille demo CLI: type a chord (keys d w q k o p) and press Enter");
    println!("Commands: ':s WORD' suggests, ':l WRONG RIGHT' learns, ':c' clears the line.");
    println!("Ctrl-D to exit.");

    let mut text = String::new();
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            text.push(' ');
        } else if let Some(word) = input.strip_prefix(":s ") {
            println!("  suggestions: {}", engine.suggest(word.trim(), user).join(", "));
            continue;
        } else if let Some(rest) = input.strip_prefix(":l ") {
            match rest.split_once(' ') {
                Some((wrong, right)) => engine.learn(wrong.trim(), right.trim(), user),
                None => println!("  usage: :l WRONG RIGHT"),
            }
            continue;
        } else if input == ":c" {
            text.clear();
        } else {
            let r = engine.translate(input, user);
            print_resolution(input, &r);
            text.push(r.character);
        }
        println!("  text: {}", text);
        io::stdout().flush()?;
    }
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Some(Commands::ShowConfig) => {
            print!("{}", config.to_toml_string()?);
        }
        Some(Commands::Translate { chords, json }) => {
            let engine = Engine::from_config(config)?;
            for raw in &chords {
                let r = engine.translate(raw, &cli.user);
                if json {
                    println!("{}", serde_json::to_string(&r)?);
                } else {
                    print_resolution(raw, &r);
                }
            }
        }
        Some(Commands::Suggest { word }) => {
            let engine = Engine::from_config(config)?;
            for s in engine.suggest(&word, &cli.user) {
                println!("{}", s);
            }
        }
        Some(Commands::Repl) | None => {
            let engine = Engine::from_config(config)?;
            run_repl(&engine, &cli.user)?;
        }
    }
    Ok(())
}
