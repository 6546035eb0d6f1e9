use std::collections::BTreeMap;

use crate::error::WeightError;

/// Tolerance for the unit-sum check. Weights typically arrive from TOML
/// config files, so exact binary equality with 1.0 cannot be demanded.
const SUM_TOLERANCE: f64 = 1e-6;

/// A validated set of component weights.
///
/// Construction is the only entry point, so a `WeightTable` in hand is proof
/// that every weight is finite and non-negative and that the total is 1.0
/// within tolerance. The backing map is ordered, which keeps iteration and
/// everything derived from it deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    weights: BTreeMap<String, f64>,
}

impl WeightTable {
    pub fn new(weights: BTreeMap<String, f64>) -> Result<Self, WeightError> {
        if weights.is_empty() {
            return Err(WeightError::Empty);
        }
        for (component, &weight) in &weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(WeightError::InvalidWeight {
                    component: component.clone(),
                    weight,
                });
            }
        }
        let sum: f64 = weights.values().sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(WeightError::NotNormalized { sum });
        }
        Ok(Self { weights })
    }

    pub fn get(&self, component_id: &str) -> Option<f64> {
        self.weights.get(component_id).copied()
    }

    pub fn contains(&self, component_id: &str) -> bool {
        self.weights.contains_key(component_id)
    }

    /// Iterates components in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights
            .iter()
            .map(|(component, &weight)| (component.as_str(), weight))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.weights.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
