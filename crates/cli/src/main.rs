//! CLI tool for turning a bilingual markdown slide deck into an English
//! PowerPoint deck.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use deck_core::{DeckConfig, DeckRenderer, EnglishExtractor, SlideParser};
use deck_pptx::{PptxReader, PptxWriter};
use std::path::{Path, PathBuf};

/// Bilingual markdown source read by `extract`.
const DEFAULT_SOURCE: &str = "PRESENTATION.md";

/// English-only markdown written by `extract` and read by `convert`.
const DEFAULT_ENGLISH: &str = "PRESENTATION_ENGLISH.md";

/// Deck written by `convert`.
const DEFAULT_DECK: &str = "CapitalEpoch_Presentation_English.pptx";

/// Convert a bilingual markdown slide deck into an English PowerPoint deck.
#[derive(Parser, Debug)]
#[command(name = "capdeck")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the English-only variant of a bilingual markdown deck
    Extract {
        /// Bilingual markdown input
        #[arg(short, long, default_value = DEFAULT_SOURCE)]
        input: PathBuf,

        /// English markdown output
        #[arg(short, long, default_value = DEFAULT_ENGLISH)]
        output: PathBuf,
    },

    /// Build a .pptx deck from English-only markdown
    Convert {
        /// English markdown input
        #[arg(short, long, default_value = DEFAULT_ENGLISH)]
        input: PathBuf,

        /// Deck output (overwritten if present)
        #[arg(short, long, default_value = DEFAULT_DECK)]
        output: PathBuf,

        /// JSON file overriding cover text and body font
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Cover slide title (overrides the config file)
        #[arg(long)]
        cover_title: Option<String>,

        /// Cover slide subtitle (overrides the config file)
        #[arg(long)]
        cover_subtitle: Option<String>,
    },

    /// List the slides of a written deck
    Inspect {
        /// Deck to read
        #[arg(default_value = DEFAULT_DECK)]
        deck: PathBuf,

        /// Print slides as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
            .init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
            .init();
    }

    match &args.command {
        Command::Extract { input, output } => run_extract(input, output),
        Command::Convert {
            input,
            output,
            config,
            cover_title,
            cover_subtitle,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(title) = cover_title {
                config = config.with_cover_title(title.as_str());
            }
            if let Some(subtitle) = cover_subtitle {
                config = config.with_cover_subtitle(subtitle.as_str());
            }
            run_convert(input, output, config)
        }
        Command::Inspect { deck, json } => run_inspect(deck, *json),
    }
}

/// Extract English content from the bilingual source.
fn run_extract(input: &Path, output: &Path) -> Result<()> {
    log::debug!("Extracting English from {}", input.display());

    EnglishExtractor::new()
        .extract_file(input, output)
        .with_context(|| format!("Failed to extract English from {}", input.display()))?;

    println!("English-only markdown saved as {}", output.display());
    println!("Successfully extracted English content from {}!", input.display());
    Ok(())
}

/// Load the deck config, falling back to defaults when no file is given.
fn load_config(path: Option<&Path>) -> Result<DeckConfig> {
    match path {
        Some(path) => DeckConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(DeckConfig::default()),
    }
}

/// Parse English markdown and render it as a deck.
fn run_convert(input: &Path, output: &Path, config: DeckConfig) -> Result<()> {
    let records = SlideParser::new()
        .parse_file(input)
        .with_context(|| format!("Failed to parse {}", input.display()))?;

    let renderer = DeckRenderer::with_config(config);
    log::debug!(
        "Rendering {} records with body font {} {}pt",
        records.len(),
        renderer.config().body_font,
        renderer.config().body_font_size
    );

    let mut writer = PptxWriter::new();
    let slide_count = renderer
        .render(&records, &mut writer, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    log::debug!("Writer holds {} slides", writer.slide_count());

    println!("Presentation saved as {}", output.display());
    println!(
        "Successfully converted {} slides to PowerPoint format from English-only markdown!",
        slide_count
    );
    Ok(())
}

/// Print a summary of a written deck.
fn run_inspect(deck: &Path, json: bool) -> Result<()> {
    let records = PptxReader::new()
        .read_file(deck)
        .with_context(|| format!("Failed to read {}", deck.display()))?;

    if json {
        let text =
            serde_json::to_string_pretty(&records).context("Failed to serialize slides")?;
        println!("{}", text);
        return Ok(());
    }

    for (idx, record) in records.iter().enumerate() {
        println!(
            "Slide {}: {} ({} lines)",
            idx + 1,
            record.title,
            record.content.len()
        );
    }
    println!("{} slides in {}", records.len(), deck.display());
    Ok(())
}
