use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use alerter::{AlertEngine, SnapshotRules};
use configuration::Config;
use enrichment::{create_scorer, sentiment_summary};
use heatmap::HeatmapEngine;
use tension::TensionEngine;

use crate::report::OutputFormat;

mod report;

/// The main entry point for the Argus risk monitor.
fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Score(args) => handle_score(args),
        Commands::Heatmap(args) => handle_heatmap(args),
        Commands::Sentiment(args) => handle_sentiment(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A composite risk monitor: rolling tension scoring, cross-sectional
/// heatmaps, and sentiment summaries over feed pipeline exports.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a set of component series into the composite tension index.
    Score(ScoreArgs),
    /// Rank category samples against each other on robust z-scores.
    Heatmap(HeatmapArgs),
    /// Summarize scored texts into the 7-day sentiment index.
    Sentiment(SentimentArgs),
}

#[derive(Parser)]
struct ScoreArgs {
    /// Path to the JSON document of component series.
    #[arg(long, short)]
    input: PathBuf,

    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<String>,

    /// Evaluate alert rules against the snapshot.
    #[arg(long)]
    alerts: bool,

    /// Output format for the report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Parser)]
struct HeatmapArgs {
    /// Path to the JSON document of category samples.
    #[arg(long, short)]
    input: PathBuf,

    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<String>,

    /// Evaluate alert rules against the ranked rows.
    #[arg(long)]
    alerts: bool,

    /// Output format for the report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Parser)]
struct SentimentArgs {
    /// Path to the JSON document of scored or raw texts.
    #[arg(long, short)]
    input: PathBuf,

    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<String>,

    /// Anchor of the 7-day window (RFC 3339). Defaults to the newest
    /// timestamp in the input.
    #[arg(long)]
    as_of: Option<DateTime<Utc>>,

    /// Output format for the report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

// ==============================================================================
// Command Handlers
// ==============================================================================

/// Handles the `score` command: component series in, tension snapshot out.
fn handle_score(args: ScoreArgs) -> Result<()> {
    let config = load_config_or_default(args.config.as_deref())?;
    let set = report::load_series(&args.input, &config)?;

    let engine = TensionEngine::new(config.tension.weight_table()?, config.tension.missing_policy);
    let snapshot = engine.score(&set)?;

    let alerts = if args.alerts {
        Some(alert_engine(&config).evaluate_snapshot(&snapshot))
    } else {
        None
    };
    report::print_snapshot(&snapshot, alerts.as_deref(), args.format)
}

/// Handles the `heatmap` command: category samples in, ranked rows out.
fn handle_heatmap(args: HeatmapArgs) -> Result<()> {
    let config = load_config_or_default(args.config.as_deref())?;
    let samples = report::load_samples(&args.input)?;

    let engine = HeatmapEngine::new(config.heatmap.weight_table()?);
    let rows = engine.rank(&samples);

    let alerts = if args.alerts {
        Some(alert_engine(&config).evaluate_rows(&rows))
    } else {
        None
    };
    report::print_rows(&rows, alerts.as_deref(), args.format)
}

/// Handles the `sentiment` command: scored or raw texts in, 7-day summary out.
fn handle_sentiment(args: SentimentArgs) -> Result<()> {
    let config = load_config_or_default(args.config.as_deref())?;
    let scorer = create_scorer(&config.enrichment.scorer_preference);
    let scored = report::load_scored(&args.input, scorer.as_ref())?;

    // Anchoring the window on the newest observation keeps a rerun over the
    // same export byte-identical.
    let as_of = args
        .as_of
        .or_else(|| scored.iter().map(|entry| entry.timestamp).max());
    let summary = as_of.and_then(|now| sentiment_summary(&scored, now));
    report::print_sentiment(summary.as_ref(), args.format)
}

/// Loads the configuration file when one was given, the production defaults
/// otherwise.
fn load_config_or_default(path: Option<&str>) -> Result<Config> {
    match path {
        Some(path) => configuration::load_config(path)
            .with_context(|| format!("Failed to load configuration from '{}'", path)),
        None => Ok(Config::default()),
    }
}

fn alert_engine(config: &Config) -> AlertEngine {
    AlertEngine::with_snapshot_rules(SnapshotRules {
        elevated_index: config.alerts.elevated_index,
        component_risk: config.alerts.component_risk,
    })
}
