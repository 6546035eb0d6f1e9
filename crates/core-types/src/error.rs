use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),
}

/// Raised when a weight table fails validation at construction time.
#[derive(Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight table is empty")]
    Empty,

    #[error("Weight for component '{component}' is invalid: {weight}")]
    InvalidWeight { component: String, weight: f64 },

    #[error("Weights must sum to 1.0, got {sum}")]
    NotNormalized { sum: f64 },
}
