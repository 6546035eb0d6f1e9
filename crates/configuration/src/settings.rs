use std::collections::BTreeMap;

use core_types::{MissingValuePolicy, RiskDirection, ScorerKind, WeightTable};
use serde::Deserialize;

use crate::error::ConfigError;

/// The root configuration structure for the entire application.
///
/// Every section and field is optional in the file; anything missing falls
/// back to the production defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tension: TensionConfig,
    #[serde(default)]
    pub heatmap: HeatmapConfig,
    #[serde(default)]
    pub alerts: AlertConfig,
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
}

impl Config {
    /// Checks the cross-field invariants a plain deserialize cannot see:
    /// both weight maps must form valid tables, every weighted tension
    /// component needs a declared risk direction, and alert thresholds
    /// must be finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tension.weight_table()?;
        self.heatmap.weight_table()?;

        for component_id in self.tension.weights.keys() {
            if !self.tension.directions.contains_key(component_id) {
                return Err(ConfigError::ValidationError(format!(
                    "component '{}' has a weight but no risk direction",
                    component_id
                )));
            }
        }

        if !self.alerts.elevated_index.is_finite() || !self.alerts.component_risk.is_finite() {
            return Err(ConfigError::ValidationError(
                "alert thresholds must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parameters for the rolling-history tension index.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TensionConfig {
    /// Component weights for the composite. Must sum to 1.0.
    pub weights: BTreeMap<String, f64>,
    /// Risk direction per weighted component.
    pub directions: BTreeMap<String, RiskDirection>,
    /// How a component with no usable latest observation is treated.
    pub missing_policy: MissingValuePolicy,
}

impl TensionConfig {
    /// Builds the validated weight table this section describes.
    pub fn weight_table(&self) -> Result<WeightTable, ConfigError> {
        Ok(WeightTable::new(self.weights.clone())?)
    }

    pub fn direction_for(&self, component_id: &str) -> Option<RiskDirection> {
        self.directions.get(component_id).copied()
    }
}

impl Default for TensionConfig {
    fn default() -> Self {
        Self {
            weights: BTreeMap::from([
                ("tone".to_string(), 0.30),
                ("volume".to_string(), 0.10),
                ("advisories".to_string(), 0.15),
                ("disasters".to_string(), 0.10),
                ("volatility".to_string(), 0.25),
                ("mobility".to_string(), 0.10),
            ]),
            directions: BTreeMap::from([
                ("tone".to_string(), RiskDirection::LowerIsWorse),
                ("volume".to_string(), RiskDirection::HigherIsWorse),
                ("advisories".to_string(), RiskDirection::HigherIsWorse),
                ("disasters".to_string(), RiskDirection::HigherIsWorse),
                ("volatility".to_string(), RiskDirection::HigherIsWorse),
                ("mobility".to_string(), RiskDirection::LowerIsWorse),
            ]),
            missing_policy: MissingValuePolicy::NeutralRisk,
        }
    }
}

/// Parameters for the cross-sectional category heatmap.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// Metric weights for the category composite. Must sum to 1.0.
    pub weights: BTreeMap<String, f64>,
}

impl HeatmapConfig {
    /// Builds the validated weight table this section describes.
    pub fn weight_table(&self) -> Result<WeightTable, ConfigError> {
        Ok(WeightTable::new(self.weights.clone())?)
    }
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            weights: BTreeMap::from([
                ("momentum".to_string(), 0.35),
                ("tone".to_string(), 0.25),
                ("market".to_string(), 0.20),
                ("interest".to_string(), 0.20),
            ]),
        }
    }
}

/// Thresholds for snapshot-level alerting.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Composite index at or above this is worth an alert.
    pub elevated_index: f64,
    /// Per-component risk at or above this is worth an alert.
    pub component_risk: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            elevated_index: 60.0,
            component_risk: 60.0,
        }
    }
}

/// Settings for the text enrichment layer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Scoring backends in preference order; the first available one wins.
    pub scorer_preference: Vec<ScorerKind>,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            scorer_preference: vec![
                ScorerKind::Transformer,
                ScorerKind::Lexicon,
                ScorerKind::Heuristic,
            ],
        }
    }
}
