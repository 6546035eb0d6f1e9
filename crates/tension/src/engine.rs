use std::collections::BTreeMap;

use core_types::{MissingValuePolicy, SeriesProvider, WeightTable};

use crate::error::TensionError;
use crate::normalize::{percentile_rank, risk_contribution};
use crate::snapshot::{ComponentBreakdown, TensionSnapshot};

/// Risk assigned to a component that could not be scored.
const NEUTRAL_RISK: f64 = 50.0;

/// A stateless calculator for the composite tension index.
#[derive(Debug, Clone)]
pub struct TensionEngine {
    weights: WeightTable,
    missing_policy: MissingValuePolicy,
}

impl TensionEngine {
    /// Builds an engine from a validated weight table and a missing-value
    /// policy. The policy is fixed here so that every snapshot the engine
    /// produces treats gaps the same way.
    pub fn new(weights: WeightTable, missing_policy: MissingValuePolicy) -> Self {
        Self {
            weights,
            missing_policy,
        }
    }

    /// The main entry point for scoring a set of component series.
    ///
    /// # Arguments
    ///
    /// * `provider` - The source of one series per weighted component.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `TensionSnapshot` or a `TensionError` when
    /// the provider and the weight table disagree on component ids.
    pub fn score(&self, provider: &dyn SeriesProvider) -> Result<TensionSnapshot, TensionError> {
        self.check_series_coverage(provider)?;

        let mut components: BTreeMap<String, ComponentBreakdown> = BTreeMap::new();
        for (component_id, weight) in self.weights.iter() {
            let series = provider
                .series(component_id)
                .ok_or_else(|| TensionError::UnknownComponent(component_id.to_string()))?;

            let breakdown = match series.latest_value() {
                Some(current) => {
                    let history = series.finite_values();
                    let percentile = percentile_rank(&history, current);
                    let risk = risk_contribution(series.direction(), percentile);
                    tracing::debug!(
                        "Component '{}' scored: latest={}, percentile={:.4}, risk={:.2}",
                        component_id,
                        current,
                        percentile,
                        risk
                    );
                    ComponentBreakdown {
                        latest: Some(current),
                        percentile,
                        risk,
                        weight,
                    }
                }
                None => {
                    tracing::warn!(
                        "Component '{}' has no usable latest observation, applying {:?}",
                        component_id,
                        self.missing_policy
                    );
                    ComponentBreakdown {
                        latest: None,
                        percentile: 0.5,
                        risk: NEUTRAL_RISK,
                        weight,
                    }
                }
            };
            components.insert(component_id.to_string(), breakdown);
        }

        self.apply_missing_policy(&mut components);

        // With every component missing and excluded there is nothing left to
        // weight, so the index itself falls back to neutral.
        let weight_total: f64 = components.values().map(|c| c.weight).sum();
        let raw_index = if weight_total > 0.0 {
            components.values().map(|c| c.risk * c.weight).sum()
        } else {
            NEUTRAL_RISK
        };
        let index = round_index(raw_index.clamp(0.0, 100.0));
        tracing::info!(
            "Tension index {:.2} across {} components",
            index,
            components.len()
        );

        Ok(TensionSnapshot { index, components })
    }

    /// Fails when the provider holds a series no weight refers to. The
    /// reverse direction, a weight without a series, is caught during
    /// scoring. A typo in either table must never silently reshape the
    /// composite.
    fn check_series_coverage(&self, provider: &dyn SeriesProvider) -> Result<(), TensionError> {
        for component_id in provider.component_ids() {
            if !self.weights.contains(&component_id) {
                return Err(TensionError::UnweightedComponent(component_id));
            }
        }
        Ok(())
    }

    /// Rewrites effective weights for missing components according to the
    /// engine's policy. `NeutralRisk` keeps the configured weights as they
    /// are; exclusion zeroes the gaps and renormalizes the survivors.
    fn apply_missing_policy(&self, components: &mut BTreeMap<String, ComponentBreakdown>) {
        if self.missing_policy != MissingValuePolicy::ExcludeAndRenormalize {
            return;
        }
        let surviving: f64 = components
            .values()
            .filter(|c| c.latest.is_some())
            .map(|c| c.weight)
            .sum();
        for breakdown in components.values_mut() {
            if breakdown.latest.is_none() {
                breakdown.weight = 0.0;
            } else if surviving > 0.0 {
                breakdown.weight /= surviving;
            }
        }
    }
}

/// Rounds to the two decimal places the published index carries.
fn round_index(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
