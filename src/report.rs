//! Input decoding and terminal rendering for the `argus` binary.
//!
//! The library crates deal in validated types; this module is the boundary
//! where JSON documents from the feed pipeline become those types and where
//! results become tables or pretty-printed JSON.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use serde::{Deserialize, Serialize};

use alerter::Alert;
use configuration::Config;
use core_types::{ComponentSeries, RiskDirection, StaticSeriesSet};
use enrichment::{ScoredText, SentimentSummary, TensionBand, TextScorer, VolatilityBand};
use heatmap::{CategoryRow, CategorySample};
use tension::{ComponentBreakdown, TensionSnapshot};

/// How a command renders its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
        };
        write!(f, "{}", word)
    }
}

// ==============================================================================
// Input Documents
// ==============================================================================

/// One component series as the feed pipeline exports it.
///
/// `direction` may be omitted when the component is listed under
/// `[tension.directions]` in the configuration.
#[derive(Debug, Deserialize)]
pub struct SeriesInput {
    pub component_id: String,
    #[serde(default)]
    pub direction: Option<RiskDirection>,
    #[serde(deserialize_with = "values_with_gaps")]
    pub values: Vec<(DateTime<Utc>, f64)>,
}

/// Decodes `[timestamp, value]` pairs where a JSON `null` value marks a
/// missing observation. JSON cannot carry NaN, so gaps travel as `null` and
/// become NaN here for the scoring layer's missing-value policy to handle.
fn values_with_gaps<'de, D>(deserializer: D) -> Result<Vec<(DateTime<Utc>, f64)>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Vec<(DateTime<Utc>, Option<f64>)> = Vec::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(timestamp, value)| (timestamp, value.unwrap_or(f64::NAN)))
        .collect())
}

/// One entry of a sentiment input document. Entries carry either an already
/// computed `polarity` or the raw `text` to score locally.
#[derive(Debug, Deserialize)]
pub struct ScoredInput {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub polarity: Option<f64>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Reads and validates a component series document.
pub fn load_series(path: &Path, config: &Config) -> Result<StaticSeriesSet> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file at {:?}", path))?;
    parse_series(&raw, config).with_context(|| format!("Invalid series document at {:?}", path))
}

fn parse_series(raw: &str, config: &Config) -> Result<StaticSeriesSet> {
    let inputs: Vec<SeriesInput> = serde_json::from_str(raw)?;

    let mut set = StaticSeriesSet::new();
    for input in inputs {
        let Some(direction) = input
            .direction
            .or_else(|| config.tension.direction_for(&input.component_id))
        else {
            bail!(
                "No risk direction for component '{}': set one in the input file or under [tension.directions]",
                input.component_id
            );
        };
        let series = ComponentSeries::new(input.component_id, input.values, direction)?;
        if let Some(previous) = set.insert(series) {
            bail!(
                "Duplicate series for component '{}'",
                previous.component_id()
            );
        }
    }
    Ok(set)
}

/// Reads a category sample document for cross-sectional ranking.
pub fn load_samples(path: &Path) -> Result<Vec<CategorySample>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file at {:?}", path))?;
    let samples: Vec<CategorySample> =
        serde_json::from_str(&raw).with_context(|| format!("Invalid sample document at {:?}", path))?;
    Ok(samples)
}

/// Reads a sentiment input document, scoring any raw-text entries with the
/// supplied backend.
pub fn load_scored(path: &Path, scorer: &dyn TextScorer) -> Result<Vec<ScoredText>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file at {:?}", path))?;
    parse_scored(&raw, scorer).with_context(|| format!("Invalid sentiment document at {:?}", path))
}

fn parse_scored(raw: &str, scorer: &dyn TextScorer) -> Result<Vec<ScoredText>> {
    let inputs: Vec<ScoredInput> = serde_json::from_str(raw)?;

    let mut scored = Vec::with_capacity(inputs.len());
    for input in inputs {
        let polarity = match (input.polarity, input.text) {
            (Some(polarity), _) => polarity,
            (None, Some(text)) => {
                let polarity = scorer.score(&text);
                tracing::debug!(
                    "Scored text at {} with '{}' backend: {:.3}",
                    input.timestamp,
                    scorer.name(),
                    polarity
                );
                polarity
            }
            (None, None) => bail!(
                "Entry at {} carries neither a polarity nor a text to score",
                input.timestamp
            ),
        };
        scored.push(ScoredText {
            timestamp: input.timestamp,
            polarity,
        });
    }
    Ok(scored)
}

// ==============================================================================
// Output Documents
// ==============================================================================

#[derive(Serialize)]
struct ScoreDocument<'a> {
    index: f64,
    band: TensionBand,
    #[serde(skip_serializing_if = "Option::is_none")]
    volatility_band: Option<VolatilityBand>,
    components: &'a BTreeMap<String, ComponentBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    alerts: Option<&'a [Alert]>,
}

/// Component id whose raw level the volatility band labels.
const VOLATILITY_COMPONENT: &str = "volatility";

/// The volatility component's latest raw level with its qualitative band,
/// when the snapshot carries one.
fn volatility_level(snapshot: &TensionSnapshot) -> Option<(f64, VolatilityBand)> {
    let level = snapshot.components.get(VOLATILITY_COMPONENT)?.latest?;
    Some((level, VolatilityBand::from_level(level)))
}

#[derive(Serialize)]
struct HeatmapDocument<'a> {
    rows: &'a [CategoryRow],
    #[serde(skip_serializing_if = "Option::is_none")]
    alerts: Option<&'a [Alert]>,
}

/// Prints a tension snapshot in the requested format, with any alerts the
/// caller evaluated against it.
pub fn print_snapshot(
    snapshot: &TensionSnapshot,
    alerts: Option<&[Alert]>,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let band = TensionBand::from_index(snapshot.index);
            println!("Tension index: {:.2} ({})", snapshot.index, band);
            if let Some((level, volatility)) = volatility_level(snapshot) {
                println!("Volatility level: {:.2} ({})", level, volatility);
            }
            println!("{}", snapshot_table(snapshot));
            if let Some(alerts) = alerts {
                print_alerts_block(alerts);
            }
        }
        OutputFormat::Json => println!("{}", score_json(snapshot, alerts)?),
    }
    Ok(())
}

/// Prints ranked heatmap rows in the requested format.
pub fn print_rows(rows: &[CategoryRow], alerts: Option<&[Alert]>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{}", rows_table(rows));
            if let Some(alerts) = alerts {
                print_alerts_block(alerts);
            }
        }
        OutputFormat::Json => {
            let document = HeatmapDocument { rows, alerts };
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }
    Ok(())
}

/// Prints the 7-day sentiment summary, or a note when the window is empty.
pub fn print_sentiment(summary: Option<&SentimentSummary>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => match summary {
            Some(summary) => println!("{}", sentiment_table(summary)),
            None => println!("No scored texts inside the 7-day window."),
        },
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }
    Ok(())
}

fn print_alerts_block(alerts: &[Alert]) {
    if alerts.is_empty() {
        println!("No alerts fired.");
    } else {
        println!("{}", alerts_table(alerts));
    }
}

fn score_json(snapshot: &TensionSnapshot, alerts: Option<&[Alert]>) -> Result<String> {
    let document = ScoreDocument {
        index: snapshot.index,
        band: TensionBand::from_index(snapshot.index),
        volatility_band: volatility_level(snapshot).map(|(_, band)| band),
        components: &snapshot.components,
        alerts,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn snapshot_table(snapshot: &TensionSnapshot) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Component", "Latest", "Percentile", "Risk", "Weight"]);
    for (component_id, breakdown) in &snapshot.components {
        let latest = match breakdown.latest {
            Some(value) => format!("{}", value),
            None => "missing".to_string(),
        };
        table.add_row(vec![
            component_id.clone(),
            latest,
            format!("{:.4}", breakdown.percentile),
            format!("{:.2}", breakdown.risk),
            format!("{:.2}", breakdown.weight),
        ]);
    }
    table
}

fn rows_table(rows: &[CategoryRow]) -> Table {
    let mut table = new_table();

    // Every row carries the same weighted metrics, so the first row fixes
    // the column set.
    let metrics: Vec<String> = rows
        .first()
        .map(|row| row.normalized.keys().cloned().collect())
        .unwrap_or_default();
    let mut header = vec![
        "Rank".to_string(),
        "Category".to_string(),
        "Composite".to_string(),
    ];
    header.extend(metrics.iter().map(|metric| format!("{} (z)", metric)));
    table.set_header(header);

    for (position, row) in rows.iter().enumerate() {
        let mut cells = vec![
            (position + 1).to_string(),
            row.category_id.clone(),
            format!("{:+.2}", row.composite),
        ];
        for metric in &metrics {
            let z = row.normalized.get(metric).copied().unwrap_or(0.0);
            cells.push(format!("{:+.2}", z));
        }
        table.add_row(cells);
    }
    table
}

fn sentiment_table(summary: &SentimentSummary) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Sentiment", "7d Drift", "Mood"]);
    table.add_row(vec![
        format!("{:.2}", summary.current),
        format!("{:+.2}", summary.delta_7d),
        summary.level.to_string(),
    ]);
    table
}

fn alerts_table(alerts: &[Alert]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Severity", "Kind", "Subject", "Message"]);
    for alert in alerts {
        table.add_row(vec![
            alert.severity.to_string(),
            format!("{:?}", alert.kind),
            alert.subject.clone(),
            alert.message.clone(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::SeriesProvider;
    use enrichment::HeuristicScorer;

    #[test]
    fn series_direction_falls_back_to_the_config() {
        let raw = r#"[
            {"component_id": "tone", "values": [["2026-01-01T00:00:00Z", -0.2], ["2026-01-02T00:00:00Z", null]]}
        ]"#;
        let set = parse_series(raw, &Config::default()).expect("series parses");
        let series = set.series("tone").expect("series present");
        assert_eq!(series.direction(), RiskDirection::LowerIsWorse);
        assert_eq!(series.len(), 2);
        assert_eq!(series.latest_value(), None, "null decodes to a gap");
    }

    #[test]
    fn explicit_direction_overrides_the_config() {
        let raw = r#"[
            {"component_id": "tone", "direction": "HigherIsWorse", "values": [["2026-01-01T00:00:00Z", 0.1]]}
        ]"#;
        let set = parse_series(raw, &Config::default()).expect("series parses");
        let series = set.series("tone").expect("series present");
        assert_eq!(series.direction(), RiskDirection::HigherIsWorse);
    }

    #[test]
    fn component_without_any_direction_is_rejected() {
        let raw = r#"[{"component_id": "mystery", "values": []}]"#;
        let result = parse_series(raw, &Config::default());
        assert!(result.is_err(), "unknown component needs a direction");
    }

    #[test]
    fn duplicate_component_ids_are_rejected() {
        let raw = r#"[
            {"component_id": "tone", "direction": "LowerIsWorse", "values": []},
            {"component_id": "tone", "direction": "LowerIsWorse", "values": []}
        ]"#;
        let result = parse_series(raw, &Config::default());
        assert!(result.is_err());
    }

    #[test]
    fn scored_entries_pass_through_and_texts_are_scored() {
        let raw = r#"[
            {"timestamp": "2026-01-01T00:00:00Z", "polarity": 0.25},
            {"timestamp": "2026-01-02T00:00:00Z", "text": "calm recovery and growth"}
        ]"#;
        let scorer = HeuristicScorer::new();
        let scored = parse_scored(raw, &scorer).expect("document parses");
        assert_eq!(scored.len(), 2);
        assert!((scored[0].polarity - 0.25).abs() < 1e-9);
        assert!(scored[1].polarity > 0.0, "positive words score positive");
    }

    #[test]
    fn entry_without_polarity_or_text_is_rejected() {
        let raw = r#"[{"timestamp": "2026-01-01T00:00:00Z"}]"#;
        let result = parse_scored(raw, &HeuristicScorer::new());
        assert!(result.is_err());
    }

    #[test]
    fn score_document_carries_the_band() {
        let snapshot = TensionSnapshot {
            index: 72.5,
            components: BTreeMap::new(),
        };
        let json = score_json(&snapshot, None).expect("document serializes");
        assert!(json.contains("\"band\": \"Elevated\""), "got {}", json);
        assert!(!json.contains("\"alerts\""), "absent alerts are omitted");
        assert!(
            !json.contains("volatility_band"),
            "no volatility component, no band"
        );

        let json = score_json(&snapshot, Some(&[])).expect("document serializes");
        assert!(json.contains("\"alerts\": []"));
    }

    #[test]
    fn score_document_labels_the_volatility_level() {
        let breakdown = |latest| ComponentBreakdown {
            latest,
            percentile: 0.5,
            risk: 50.0,
            weight: 1.0,
        };

        let mut components = BTreeMap::new();
        components.insert("volatility".to_string(), breakdown(Some(24.0)));
        let snapshot = TensionSnapshot {
            index: 50.0,
            components,
        };
        let json = score_json(&snapshot, None).expect("document serializes");
        assert!(
            json.contains("\"volatility_band\": \"Strained\""),
            "got {}",
            json
        );

        let mut components = BTreeMap::new();
        components.insert("volatility".to_string(), breakdown(None));
        let snapshot = TensionSnapshot {
            index: 50.0,
            components,
        };
        let json = score_json(&snapshot, None).expect("document serializes");
        assert!(
            !json.contains("volatility_band"),
            "a gap has no level to band"
        );
    }
}
