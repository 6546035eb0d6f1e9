use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The result of one tension scoring pass.
///
/// This struct is the final output of the `TensionEngine` and serves as the
/// data transfer object for composite scores throughout the entire system.
/// The breakdown always reconstructs the index: summing `risk * weight` over
/// all components gives the pre-rounding composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensionSnapshot {
    /// The composite index, clipped to `[0, 100]` and rounded to two
    /// decimal places.
    pub index: f64,
    /// Per-component audit record, keyed by component id.
    pub components: BTreeMap<String, ComponentBreakdown>,
}

/// How one component entered the composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentBreakdown {
    /// The value that was scored, absent when the latest observation was
    /// missing.
    pub latest: Option<f64>,
    /// Rank of the latest value against the component's own history.
    pub percentile: f64,
    /// Direction-aware risk contribution on the 0-100 scale.
    pub risk: f64,
    /// The weight actually applied in the sum. Differs from the configured
    /// weight only when a missing component was excluded and the survivors
    /// were renormalized.
    pub weight: f64,
}
