//! # Argus Tension Engine
//!
//! This crate turns a set of component series into a single bounded tension
//! index. Each component's current value is ranked against its own history,
//! mapped to a 0-100 risk contribution according to its risk direction, and
//! folded into a weighted composite with a full audit breakdown.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `TensionEngine` is a stateless calculator.
//!   It takes component series as input and produces a `TensionSnapshot` as
//!   output. This makes it highly reliable and easy to test.
//!
//! ## Public API
//!
//! - `TensionEngine`: The main struct that contains the scoring logic.
//! - `TensionSnapshot`: The composite index plus its per-component breakdown.
//! - `TensionError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod normalize;
pub mod snapshot;

// Re-export the key components to create a clean, public-facing API.
pub use engine::TensionEngine;
pub use error::TensionError;
pub use normalize::{MIN_HISTORY, percentile_rank, risk_contribution};
pub use snapshot::{ComponentBreakdown, TensionSnapshot};
