pub mod enums;
pub mod error;
pub mod provider;
pub mod structs;
pub mod weights;

// Re-export the core types to provide a clean public API.
pub use enums::{MissingValuePolicy, RiskDirection, ScorerKind};
pub use error::{CoreError, WeightError};
pub use provider::{SeriesProvider, StaticSeriesSet};
pub use structs::ComponentSeries;
pub use weights::WeightTable;
