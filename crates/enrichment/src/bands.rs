use std::fmt;

use serde::{Deserialize, Serialize};

/// Qualitative bands over the 0-100 tension index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TensionBand {
    Calm,
    Balanced,
    Elevated,
}

impl TensionBand {
    pub fn from_index(index: f64) -> Self {
        if index < 40.0 {
            TensionBand::Calm
        } else if index < 60.0 {
            TensionBand::Balanced
        } else {
            TensionBand::Elevated
        }
    }
}

impl fmt::Display for TensionBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            TensionBand::Calm => "calm",
            TensionBand::Balanced => "balanced",
            TensionBand::Elevated => "elevated",
        };
        write!(f, "{}", word)
    }
}

/// Qualitative bands over a raw volatility level, not a percentile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolatilityBand {
    Subdued,
    Normal,
    Strained,
}

impl VolatilityBand {
    pub fn from_level(level: f64) -> Self {
        if level < 15.0 {
            VolatilityBand::Subdued
        } else if level < 22.0 {
            VolatilityBand::Normal
        } else {
            VolatilityBand::Strained
        }
    }
}

impl fmt::Display for VolatilityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            VolatilityBand::Subdued => "subdued",
            VolatilityBand::Normal => "normal",
            VolatilityBand::Strained => "strained",
        };
        write!(f, "{}", word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tension_bands_sit_on_their_documented_edges() {
        assert_eq!(TensionBand::from_index(0.0), TensionBand::Calm);
        assert_eq!(TensionBand::from_index(39.99), TensionBand::Calm);
        assert_eq!(TensionBand::from_index(40.0), TensionBand::Balanced);
        assert_eq!(TensionBand::from_index(59.99), TensionBand::Balanced);
        assert_eq!(TensionBand::from_index(60.0), TensionBand::Elevated);
        assert_eq!(TensionBand::from_index(100.0), TensionBand::Elevated);
    }

    #[test]
    fn volatility_bands_sit_on_their_documented_edges() {
        assert_eq!(VolatilityBand::from_level(10.0), VolatilityBand::Subdued);
        assert_eq!(VolatilityBand::from_level(14.99), VolatilityBand::Subdued);
        assert_eq!(VolatilityBand::from_level(15.0), VolatilityBand::Normal);
        assert_eq!(VolatilityBand::from_level(21.99), VolatilityBand::Normal);
        assert_eq!(VolatilityBand::from_level(22.0), VolatilityBand::Strained);
    }

    #[test]
    fn bands_render_as_lowercase_words() {
        assert_eq!(TensionBand::Elevated.to_string(), "elevated");
        assert_eq!(VolatilityBand::Subdued.to_string(), "subdued");
    }
}
