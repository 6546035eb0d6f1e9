use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::enums::RiskDirection;
use crate::error::CoreError;

/// The observation history of a single signal component.
///
/// Values are ordered oldest first and may contain NaN entries, which mark
/// observations that upstream joins could not fill. Construction validates
/// the ordering invariant; the value channel is deliberately left open so
/// gaps survive until scoring applies its missing-value policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentSeries {
    component_id: String,
    values: Vec<(DateTime<Utc>, f64)>,
    direction: RiskDirection,
}

impl ComponentSeries {
    /// Builds a series, rejecting empty ids and non-increasing timestamps.
    pub fn new(
        component_id: impl Into<String>,
        values: Vec<(DateTime<Utc>, f64)>,
        direction: RiskDirection,
    ) -> Result<Self, CoreError> {
        let component_id = component_id.into();
        if component_id.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "component_id".to_string(),
                "must not be empty".to_string(),
            ));
        }
        if let Some(pair) = values.windows(2).find(|pair| pair[0].0 >= pair[1].0) {
            return Err(CoreError::InvalidInput(
                "values".to_string(),
                format!(
                    "timestamps must be strictly increasing, found {} followed by {}",
                    pair[0].0, pair[1].0
                ),
            ));
        }
        Ok(Self {
            component_id,
            values,
            direction,
        })
    }

    pub fn component_id(&self) -> &str {
        &self.component_id
    }

    pub fn direction(&self) -> RiskDirection {
        self.direction
    }

    pub fn values(&self) -> &[(DateTime<Utc>, f64)] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The final observation, if any.
    pub fn latest(&self) -> Option<(DateTime<Utc>, f64)> {
        self.values.last().copied()
    }

    /// The value of the final observation, when present and finite.
    ///
    /// A trailing NaN means the most recent join produced no usable value,
    /// so the component counts as missing for scoring purposes.
    pub fn latest_value(&self) -> Option<f64> {
        self.values
            .last()
            .map(|(_, value)| *value)
            .filter(|value| value.is_finite())
    }

    /// The observation values with NaN and infinite entries removed,
    /// preserving order.
    pub fn finite_values(&self) -> Vec<f64> {
        self.values
            .iter()
            .map(|(_, value)| *value)
            .filter(|value| value.is_finite())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(day: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(day * 86_400, 0).expect("valid timestamp")
    }

    #[test]
    fn rejects_out_of_order_timestamps() {
        let result = ComponentSeries::new(
            "tone",
            vec![(ts(2), 1.0), (ts(1), 2.0)],
            RiskDirection::LowerIsWorse,
        );
        assert!(result.is_err(), "descending timestamps must be rejected");
    }

    #[test]
    fn rejects_duplicate_timestamps() {
        let result = ComponentSeries::new(
            "tone",
            vec![(ts(1), 1.0), (ts(1), 2.0)],
            RiskDirection::LowerIsWorse,
        );
        assert!(result.is_err(), "duplicate timestamps must be rejected");
    }

    #[test]
    fn rejects_empty_component_id() {
        let result = ComponentSeries::new("  ", vec![], RiskDirection::HigherIsWorse);
        assert!(
            matches!(result, Err(CoreError::InvalidInput(ref field, _)) if field == "component_id"),
            "blank component id must be rejected"
        );
    }

    #[test]
    fn finite_values_drops_gaps() {
        let series = ComponentSeries::new(
            "volume",
            vec![
                (ts(1), 1.0),
                (ts(2), f64::NAN),
                (ts(3), 3.0),
                (ts(4), f64::INFINITY),
            ],
            RiskDirection::HigherIsWorse,
        )
        .expect("valid series");
        assert_eq!(series.finite_values(), vec![1.0, 3.0]);
        assert_eq!(series.len(), 4);
    }

    #[test]
    fn latest_value_treats_trailing_nan_as_missing() {
        let present = ComponentSeries::new(
            "volume",
            vec![(ts(1), 1.0), (ts(2), 2.0)],
            RiskDirection::HigherIsWorse,
        )
        .expect("valid series");
        assert_eq!(present.latest_value(), Some(2.0));

        let missing = ComponentSeries::new(
            "volume",
            vec![(ts(1), 1.0), (ts(2), f64::NAN)],
            RiskDirection::HigherIsWorse,
        )
        .expect("valid series");
        assert_eq!(missing.latest_value(), None);

        let empty =
            ComponentSeries::new("volume", vec![], RiskDirection::HigherIsWorse).expect("valid");
        assert_eq!(empty.latest_value(), None);
    }
}
