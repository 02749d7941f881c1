//! Wikiturn CLI
//!
//! Translate an English Wikipedia article into wiki markup for another
//! language, with the original references reinserted at their positions.
//!
//! # Examples
//!
//! Translate into the configured default language:
//! ```bash
//! wikiturn --article Albert_Einstein
//! ```
//!
//! Translate into Czech with category links, without references:
//! ```bash
//! wikiturn --article Albert_Einstein --lang cs --kat --xref
//! ```
//!
//! Check remaining DeepL character quota:
//! ```bash
//! wikiturn --usage
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use tracing_subscriber::EnvFilter;

use wikiturn::{
    Config, DeeplTranslator, Glossary, Pipeline, Translator, WikipediaSource, WikiturnError,
    KNOWN_TARGET_LANGUAGES,
};

#[derive(Parser)]
#[command(name = "wikiturn")]
#[command(version, about = "DeepL-assisted translation of English Wikipedia articles")]
struct Cli {
    /// Article to convert (spaces or underscores accepted)
    #[arg(short, long)]
    article: Option<String>,

    /// Target language code (defaults to the configured default)
    #[arg(short, long)]
    lang: Option<String>,

    /// Print remaining translation quota
    #[arg(short, long)]
    usage: bool,

    /// Do not reinsert references
    #[arg(short, long)]
    xref: bool,

    /// Also translate and append category links
    #[arg(short, long)]
    kat: bool,

    /// Glossary file with fixed term translations (JSON object)
    #[arg(short, long)]
    glossary: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("wikiturn=debug,info")
    } else {
        EnvFilter::new("wikiturn=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = load_or_create_config()?;

    let target_lang = cli
        .lang
        .as_deref()
        .unwrap_or(&config.default_target_lang)
        .to_uppercase();

    let translator = DeeplTranslator::new(&config.auth_key)?;

    if cli.usage {
        let usage = translator.usage()?;
        println!(
            "Character usage: {} of {}. Characters left: {}.",
            usage.character_count,
            usage.character_limit,
            usage.remaining()
        );
        if cli.article.is_none() {
            return Ok(());
        }
    }

    let Some(article) = cli.article.as_deref() else {
        anyhow::bail!("no article for conversion provided");
    };

    let source = WikipediaSource::new()?;
    let mut pipeline = Pipeline::new(&source, &translator, target_lang)
        .with_references(!cli.xref)
        .with_categories(cli.kat);
    if let Some(path) = &cli.glossary {
        pipeline = pipeline.with_glossary(Glossary::load(path)?);
    }

    let prepared = pipeline.prepare(article)?;

    let with_references = match prepared.reference_mismatch() {
        Some((markers, definitions)) => {
            eprintln!(
                "{} reference list and reference pointers do not match ({} markers, {} definitions)",
                style("Error:").red().bold(),
                markers,
                definitions
            );
            let proceed = Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt("Continue without references?")
                .default(false)
                .interact()
                .map_err(|_| WikiturnError::ReferenceMismatch {
                    markers,
                    definitions,
                })?;
            if !proceed {
                anyhow::bail!("aborted on reference mismatch");
            }
            false
        }
        None => !cli.xref,
    };

    let result = pipeline.translate(&prepared, with_references)?;
    println!("{}", result);

    Ok(())
}

/// Load `~/.wikiturnrc`, or create it interactively on first run.
fn load_or_create_config() -> Result<Config> {
    if Config::exists() {
        return Ok(Config::load()?);
    }

    println!(
        "{}",
        style("No configuration found, setting up now.").bold()
    );

    let auth_key: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Your DeepL authorisation key")
        .interact_text()?;

    println!("Available target languages:");
    for chunk in KNOWN_TARGET_LANGUAGES.chunks(11) {
        println!("  {}", chunk.join(", "));
    }

    let default_lang: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Choose default target language")
        .default("CS".to_string())
        .interact_text()?;

    let config = Config::new(auth_key, default_lang);
    config.save()?;
    println!(
        "Configuration written to {}",
        Config::path()?.display()
    );

    Ok(config)
}
