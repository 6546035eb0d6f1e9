use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Number of calendar days in the sentiment window, including the query day.
const WINDOW_DAYS: i64 = 7;

/// Maps a polarity in `[-1, 1]` onto the 0-100 display scale.
///
/// Out-of-range polarities are clamped; a non-finite polarity reads as
/// neutral 50.
pub fn polarity_to_index(polarity: f64) -> f64 {
    if !polarity.is_finite() {
        return 50.0;
    }
    (polarity.clamp(-1.0, 1.0) + 1.0) * 50.0
}

/// One scored piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredText {
    pub timestamp: DateTime<Utc>,
    pub polarity: f64,
}

/// Qualitative bands over the 0-100 sentiment index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoodLevel {
    Optimistic,
    Steady,
    Cautious,
    Stressed,
}

impl MoodLevel {
    pub fn from_index(index: f64) -> Self {
        if index >= 65.0 {
            MoodLevel::Optimistic
        } else if index >= 50.0 {
            MoodLevel::Steady
        } else if index >= 40.0 {
            MoodLevel::Cautious
        } else {
            MoodLevel::Stressed
        }
    }
}

impl fmt::Display for MoodLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            MoodLevel::Optimistic => "optimistic",
            MoodLevel::Steady => "steady",
            MoodLevel::Cautious => "cautious",
            MoodLevel::Stressed => "stressed",
        };
        write!(f, "{}", word)
    }
}

/// The trailing-window sentiment summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    /// Mean index of the most recent day inside the window.
    pub current: f64,
    /// Drift of `current` against the earliest day inside the window.
    pub delta_7d: f64,
    pub level: MoodLevel,
}

/// Aggregates scored texts into the 7-day sentiment summary.
///
/// Scores are mapped onto the 0-100 scale, averaged per UTC calendar day,
/// and restricted to the window ending on `now`'s day. Returns `None` when
/// the window holds no usable scores.
pub fn sentiment_summary(scored: &[ScoredText], now: DateTime<Utc>) -> Option<SentimentSummary> {
    let end = now.date_naive();
    let start = end - chrono::Duration::days(WINDOW_DAYS - 1);

    let mut daily: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for entry in scored {
        if !entry.polarity.is_finite() {
            continue;
        }
        let day = entry.timestamp.date_naive();
        if day < start || day > end {
            continue;
        }
        daily
            .entry(day)
            .or_default()
            .push(polarity_to_index(entry.polarity));
    }
    if daily.is_empty() {
        tracing::debug!("No scored texts inside the {}-day window", WINDOW_DAYS);
        return None;
    }

    let means: Vec<f64> = daily
        .values()
        .map(|scores| scores.iter().sum::<f64>() / scores.len() as f64)
        .collect();
    let current = means.last().copied()?;
    let earliest = means.first().copied()?;

    Some(SentimentSummary {
        current,
        delta_7d: current - earliest,
        level: MoodLevel::from_index(current),
    })
}
