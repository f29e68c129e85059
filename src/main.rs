//! Command-line OCR text cleanup
//!
//! Usage: wordsieve [--lang fra] [--rulesets rulesets.json] [--stats] [FILE]
//!
//! Reads recognised text from FILE (or stdin), drops garbage words for the
//! selected language and prints the cleaned text.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wordsieve::config::Config;
use wordsieve::ocr::{OcrCleanupConfig, OcrCleanupService};

#[derive(Parser)]
#[command(name = "wordsieve")]
#[command(about = "Remove OCR garbage words from recognised text")]
struct Args {
    /// File with recognised text; stdin when omitted
    file: Option<String>,

    /// Language code, overrides OCR_LANGUAGE
    #[arg(short, long)]
    lang: Option<String>,

    /// JSON file with extra ruleset definitions, overrides OCR_RULESETS_PATH
    #[arg(short, long)]
    rulesets: Option<String>,

    /// Print cleanup statistics as JSON to stderr
    #[arg(short, long)]
    stats: bool,

    /// List the languages with a ruleset and exit
    #[arg(long)]
    list_languages: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;

    let cleanup_config = OcrCleanupConfig::from(&config).with_overrides(args.lang, args.rulesets);
    let service = OcrCleanupService::new_with_config(cleanup_config)?;

    if args.list_languages {
        for language in service.registry().languages() {
            println!("{}", language);
        }
        return Ok(());
    }

    let text = match &args.file {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };

    let cleaner = service.cleaner(None);
    let cleaned = cleaner.clean_text(&text);

    info!(
        "Kept {} of {} words ({})",
        cleaned.stats.accepted_words,
        cleaned.stats.total_words,
        cleaner.language()
    );

    println!("{}", cleaned.text);

    if args.stats {
        eprintln!("{}", serde_json::to_string_pretty(&cleaned.stats)?);
    }

    Ok(())
}
