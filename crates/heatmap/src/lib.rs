use std::cmp::Ordering;
use std::collections::BTreeMap;

use core_types::WeightTable;
use serde::{Deserialize, Serialize};

/// Scale factor that makes the MAD consistent with the standard deviation of
/// a normal distribution.
const MAD_SCALE: f64 = 0.6745;

/// Normalized scores are clamped to this many robust deviations before
/// weighting, so one runaway metric cannot own a composite on its own.
const Z_CLAMP: f64 = 3.0;

/// One category's raw metric readings at a single point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySample {
    pub category_id: String,
    pub metrics: BTreeMap<String, f64>,
}

/// A category after cross-sectional normalization and scoring.
///
/// `raw` carries every supplied metric unchanged, including unweighted
/// display columns. `normalized` holds the unclamped robust z-score of each
/// weighted metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRow {
    pub category_id: String,
    pub raw: BTreeMap<String, f64>,
    pub normalized: BTreeMap<String, f64>,
    pub composite: f64,
}

/// The cross-sectional scoring engine.
///
/// Where the tension index ranks one component against its own history, this
/// engine compares many categories against each other at a single point in
/// time, which works even when no single category has much historical depth.
pub struct HeatmapEngine {
    weights: WeightTable,
}

impl HeatmapEngine {
    pub fn new(weights: WeightTable) -> Self {
        Self { weights }
    }

    /// Normalizes, scores, and ranks a snapshot of category samples.
    pub fn rank(&self, samples: &[CategorySample]) -> Vec<CategoryRow> {
        if samples.is_empty() {
            return vec![];
        }

        // 1. Normalize every weighted metric column across categories.
        //    Missing and non-finite cells are filled with 0.0 first, the
        //    same treatment an outer join gives an absent reading.
        let mut columns: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for (metric, _) in self.weights.iter() {
            let column: Vec<f64> = samples
                .iter()
                .map(|sample| {
                    sample
                        .metrics
                        .get(metric)
                        .copied()
                        .filter(|value| value.is_finite())
                        .unwrap_or(0.0)
                })
                .collect();
            columns.insert(metric, robust_z_scores(&column));
        }

        // 2. Score
        let mut rows: Vec<CategoryRow> = samples
            .iter()
            .enumerate()
            .map(|(row, sample)| {
                let mut normalized = BTreeMap::new();
                let mut composite = 0.0;
                for (metric, weight) in self.weights.iter() {
                    let z = columns[metric][row];
                    normalized.insert(metric.to_string(), z);
                    composite += weight * z.clamp(-Z_CLAMP, Z_CLAMP);
                }
                CategoryRow {
                    category_id: sample.category_id.clone(),
                    raw: sample.metrics.clone(),
                    normalized,
                    composite,
                }
            })
            .collect();

        // 3. Rank
        rows.sort_by(|a, b| {
            b.composite
                .partial_cmp(&a.composite)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.category_id.cmp(&b.category_id))
        });

        tracing::info!(
            "Ranked {} categories across {} weighted metrics",
            rows.len(),
            self.weights.len()
        );
        rows
    }
}

/// Computes median/MAD-based z-scores for one metric column.
///
/// With a usable MAD, scores are `0.6745 * (x - median) / mad`. A zero MAD
/// falls back to the ordinary standard z-score, and a zero spread yields all
/// zeros, so callers never see a division by zero.
pub fn robust_z_scores(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return vec![];
    }

    let center = median(values);
    let deviations: Vec<f64> = values.iter().map(|v| (v - center).abs()).collect();
    let mad = median(&deviations);
    if mad > 0.0 {
        return values
            .iter()
            .map(|v| MAD_SCALE * (v - center) / mad)
            .collect();
    }

    tracing::warn!("MAD is zero, falling back to standard z-scores");
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance =
        values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / values.len() as f64;
    let std = variance.sqrt();
    if std > 1e-9 {
        values.iter().map(|v| (v - mean) / std).collect()
    } else {
        vec![0.0; values.len()]
    }
}

/// Median by sorted copy, averaging the two middle elements for even counts.
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
