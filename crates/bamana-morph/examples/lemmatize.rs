use std::env;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use bamana_lexicon::Lexicon;
use bamana_morph::{Analyzer, AnalyzerOptions};
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: cargo run -p bamana-morph --example lemmatize -- [--lexicon <records.json>] [--extended] <word>...";
const DEFAULT_LEXICON: &str = "lexicon.json";

struct Config {
    lexicon: PathBuf,
    extended: bool,
    words: Vec<String>,
}

fn main() -> Result<()> {
    init_tracing();
    let config = load_config()?;

    let start = Instant::now();
    let lexicon = Lexicon::load_json(&config.lexicon)
        .with_context(|| format!("loading lexicon from {}", config.lexicon.display()))?;
    info!("lexicon loaded in {} ms", start.elapsed().as_millis());

    let options = if config.extended {
        AnalyzerOptions::extended()
    } else {
        AnalyzerOptions::default()
    };
    let analyzer = Analyzer::default().with_options(options);

    for word in &config.words {
        println!("{word}");
        for cand in analyzer.lemmatize(word, &lexicon) {
            let pos: Vec<&str> = cand.pos.iter().map(|p| p.as_tag()).collect();
            println!(
                "  {:>2}  {:<16} {:<10} {}",
                cand.stage.code(),
                cand.lemma.as_deref().unwrap_or("-"),
                pos.join("/"),
                cand.gloss.as_deref().unwrap_or("-"),
            );
        }
    }
    Ok(())
}

/// `BAMANA_LEXICON` names the record file; `--lexicon` overrides it.
fn load_config() -> Result<Config> {
    let mut lexicon = env::var("BAMANA_LEXICON")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_LEXICON));
    let mut extended = false;
    let mut words = Vec::new();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--lexicon" => lexicon = args.next().map(PathBuf::from).context(USAGE)?,
            "--extended" => extended = true,
            _ => words.push(arg),
        }
    }
    if words.is_empty() {
        bail!(USAGE);
    }
    Ok(Config {
        lexicon,
        extended,
        words,
    })
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(Level::INFO)
        .init();
}
