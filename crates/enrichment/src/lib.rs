//! # Argus Enrichment Library
//!
//! This crate derives the auxiliary signals that feed the scoring engines:
//! text polarity, the 0-100 sentiment index with its 7-day drift, price and
//! interest momentum, mobility deviation from a fixed baseline, and the
//! qualitative bands reports print next to raw numbers.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   feeds or models on disk. It depends only on `core-types`.
//! - **Scorer Agnostic Consumers:** By using the `TextScorer` trait, callers
//!   operate on any scoring backend without knowing its internal details.
//! - **Extensibility:** Adding a new scorer involves creating a new module,
//!   implementing the `TextScorer` trait, and adding it to the `ScorerKind`
//!   enum and `factory`.
//!
//! ## Public API
//!
//! The primary public components are:
//! - `TextScorer`: The core trait all scoring backends implement.
//! - `ScorerKind`: A simple enum to identify which backend to create.
//! - `create_scorer`: The factory function resolving a ranked preference list.
//! - The metric functions themselves (`sentiment_summary`, `momentum_pct`,
//!   `baseline_deviation_pct`) and the display bands.

// Declare all the modules that constitute this crate.
pub mod bands;
pub mod factory;
pub mod heuristic;
pub mod mobility;
pub mod momentum;
pub mod sentiment;

// Re-export the key components to create a clean, public-facing API.
pub use bands::{TensionBand, VolatilityBand};
pub use factory::create_scorer;
pub use heuristic::HeuristicScorer;
pub use mobility::baseline_deviation_pct;
pub use momentum::{MOMENTUM_WINDOW, momentum_pct};
pub use sentiment::{MoodLevel, ScoredText, SentimentSummary, polarity_to_index, sentiment_summary};

// Re-export ScorerKind from core_types
pub use core_types::enums::ScorerKind;

/// The trait all text scoring backends implement.
///
/// A scorer maps free text to a polarity in `[-1, 1]`, where -1 is maximally
/// negative and +1 maximally positive. The `Send + Sync` bounds allow one
/// boxed scorer to be shared by parallel enrichment workers.
pub trait TextScorer: Send + Sync {
    /// Scores a single piece of text.
    fn score(&self, text: &str) -> f64;

    /// A stable, lowercase backend name for logs and reports.
    fn name(&self) -> &'static str;
}
