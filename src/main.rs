//! ytformats - inspect and pick media format variants
//!
//! Reads a JSON array of format records and either lists them (optionally
//! filtered and ranked) or selects a single one.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use ytformats::{FormatList, FormatSelector, QualityPreference, SelectionSettings};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print formats, one per line
    List {
        #[command(flatten)]
        filters: Filters,

        /// Rank by width, widest first
        #[arg(long)]
        sort: bool,
    },
    /// Print the single format matching the selection as JSON
    Select {
        #[command(flatten)]
        filters: Filters,

        /// Settings file (defaults to the user config directory)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Quality or quality label, e.g. "medium" or "720p"
        #[arg(long, conflicts_with_all = ["itag", "worst"])]
        quality: Option<String>,

        /// Source identifier
        #[arg(long, conflicts_with = "worst")]
        itag: Option<i32>,

        /// Narrowest instead of widest
        #[arg(long)]
        worst: bool,
    },
}

#[derive(Args)]
struct Filters {
    /// JSON file with format records, or "-" for stdin
    input: String,

    /// Mime type prefix, e.g. "video" or "audio/webm"
    #[arg(long = "type")]
    mime_type: Option<String>,

    /// Only formats with an audio track
    #[arg(long)]
    with_audio: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::List { filters, sort } => run_list(&filters, sort),
        Command::Select {
            filters,
            settings,
            quality,
            itag,
            worst,
        } => {
            let mut selection = load_settings(settings)?;
            if filters.mime_type.is_some() {
                selection.mime_type = filters.mime_type.clone();
            }
            if filters.with_audio {
                selection.require_audio = true;
            }
            if let Some(name) = quality {
                selection.quality = QualityPreference::Named(name);
            } else if let Some(itag_no) = itag {
                selection.quality = QualityPreference::Itag(itag_no);
            } else if worst {
                selection.quality = QualityPreference::Worst;
            }
            run_select(&filters.input, &selection)
        }
    }
}

fn run_list(filters: &Filters, sort: bool) -> Result<()> {
    let mut formats = read_formats(&filters.input)?;

    if let Some(prefix) = &filters.mime_type {
        formats = formats.of_type(prefix);
    }
    if filters.with_audio {
        formats = formats.with_audio_channels();
    }
    if sort {
        formats.sort();
    }

    for format in &formats {
        println!("{}", format);
    }
    Ok(())
}

fn run_select(input: &str, settings: &SelectionSettings) -> Result<()> {
    let formats = read_formats(input)?;
    let chosen = FormatSelector::select_strict(&formats, settings)?;

    info!("Selected itag {} ({})", chosen.itag_no, settings.quality.as_str());
    println!(
        "{}",
        serde_json::to_string_pretty(chosen).context("Failed to serialize format")?
    );
    Ok(())
}

fn load_settings(explicit: Option<PathBuf>) -> Result<SelectionSettings> {
    if let Some(path) = explicit {
        return SelectionSettings::load(&path)
            .with_context(|| format!("Failed to load settings from {}", path.display()));
    }

    match SelectionSettings::default_path() {
        Some(path) if path.exists() => SelectionSettings::load(&path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        _ => {
            debug!("No settings file, using defaults");
            Ok(SelectionSettings::default())
        }
    }
}

fn read_formats(input: &str) -> Result<FormatList> {
    if input == "-" {
        let mut json = String::new();
        std::io::stdin()
            .read_to_string(&mut json)
            .context("Failed to read formats from stdin")?;
        return FormatList::from_json_str(&json).context("Failed to parse formats from stdin");
    }

    let path = PathBuf::from(input);
    FormatList::from_path(&path).with_context(|| format!("Failed to load formats from {}", input))
}
