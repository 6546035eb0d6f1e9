use serde::{Deserialize, Serialize};

/// How a component's raw level relates to risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskDirection {
    HigherIsWorse,
    LowerIsWorse,
}

impl RiskDirection {
    /// Returns a short label for reports and log lines.
    pub fn label(&self) -> &'static str {
        match self {
            RiskDirection::HigherIsWorse => "higher is worse",
            RiskDirection::LowerIsWorse => "lower is worse",
        }
    }
}

/// How a composite score treats a component whose latest observation is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissingValuePolicy {
    /// Score the component at the neutral midpoint, keeping its weight.
    NeutralRisk,
    /// Drop the component and renormalize the surviving weights.
    ExcludeAndRenormalize,
}

/// Identifies a text scoring backend, ordered here only by convention:
/// configs usually list the heaviest first and the heuristic floor last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScorerKind {
    Transformer,
    Lexicon,
    Heuristic,
}
