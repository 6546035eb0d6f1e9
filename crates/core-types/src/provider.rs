use std::collections::BTreeMap;

use crate::structs::ComponentSeries;

/// The seam between data acquisition and scoring.
///
/// Engines only ever ask a provider for series by component id, so how the
/// observations were obtained (files, caches, a feed layer) stays out of the
/// scoring crates entirely.
pub trait SeriesProvider: Send + Sync {
    /// Looks up the series for a component, if the provider holds one.
    fn series(&self, component_id: &str) -> Option<&ComponentSeries>;

    /// All component ids the provider holds, in id order.
    fn component_ids(&self) -> Vec<String>;
}

/// An in-memory provider over a fixed set of series.
#[derive(Debug, Clone, Default)]
pub struct StaticSeriesSet {
    series: BTreeMap<String, ComponentSeries>,
}

impl StaticSeriesSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_series(series: Vec<ComponentSeries>) -> Self {
        let mut set = Self::new();
        for entry in series {
            set.insert(entry);
        }
        set
    }

    /// Adds a series, replacing and returning any previous entry with the
    /// same component id.
    pub fn insert(&mut self, series: ComponentSeries) -> Option<ComponentSeries> {
        self.series
            .insert(series.component_id().to_string(), series)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl SeriesProvider for StaticSeriesSet {
    fn series(&self, component_id: &str) -> Option<&ComponentSeries> {
        self.series.get(component_id)
    }

    fn component_ids(&self) -> Vec<String> {
        self.series.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::RiskDirection;

    fn series(id: &str) -> ComponentSeries {
        ComponentSeries::new(id, vec![], RiskDirection::HigherIsWorse).expect("valid series")
    }

    #[test]
    fn insert_replaces_by_component_id() {
        let mut set = StaticSeriesSet::new();
        assert!(set.insert(series("tone")).is_none());
        let previous = set.insert(series("tone"));
        assert!(previous.is_some(), "second insert must return the first");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn component_ids_come_back_sorted() {
        let set = StaticSeriesSet::from_series(vec![
            series("volume"),
            series("tone"),
            series("advisories"),
        ]);
        assert_eq!(set.component_ids(), vec!["advisories", "tone", "volume"]);
        assert!(set.series("tone").is_some());
        assert!(set.series("vix").is_none());
    }
}
