use serde::Serialize;

use heatmap::CategoryRow;
use tension::TensionSnapshot;

/// What a fired rule was watching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlertKind {
    Momentum,
    Tone,
    Market,
    Interest,
    Tension,
    Component,
}

/// A single fired alert. Alerts carry no timestamp: evaluation is a pure
/// function of its inputs, and identical inputs must produce identical
/// alert lists. Callers that need a clock attach one at the edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    /// 1 (lowest) to 5 (highest).
    pub severity: u8,
    pub kind: AlertKind,
    /// The category or component the alert is about.
    pub subject: String,
    pub message: String,
}

/// The comparison a metric rule applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    Above(f64),
    Below(f64),
    MagnitudeAbove(f64),
}

/// One threshold rule over a ranked category row.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRule {
    pub metric: String,
    /// Watch the normalized z-score column instead of the raw one.
    pub normalized: bool,
    pub trigger: Trigger,
    pub severity: u8,
    pub kind: AlertKind,
}

/// Thresholds applied to a tension snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotRules {
    /// Index at or above this raises a tension alert.
    pub elevated_index: f64,
    /// Per-component risk at or above this raises a component alert.
    pub component_risk: f64,
}

impl Default for SnapshotRules {
    fn default() -> Self {
        Self {
            elevated_index: 60.0,
            component_risk: 60.0,
        }
    }
}

/// Evaluates threshold rules over engine outputs.
#[derive(Debug, Clone)]
pub struct AlertEngine {
    rules: Vec<MetricRule>,
    snapshot: SnapshotRules,
}

impl AlertEngine {
    pub fn new(rules: Vec<MetricRule>, snapshot: SnapshotRules) -> Self {
        Self { rules, snapshot }
    }

    /// The stock rule set with caller-supplied snapshot thresholds.
    pub fn with_snapshot_rules(snapshot: SnapshotRules) -> Self {
        Self::new(default_rules(), snapshot)
    }

    /// Runs every metric rule over every ranked row.
    pub fn evaluate_rows(&self, rows: &[CategoryRow]) -> Vec<Alert> {
        let mut alerts = Vec::new();
        for row in rows {
            for rule in &self.rules {
                let column = if rule.normalized {
                    &row.normalized
                } else {
                    &row.raw
                };
                let Some(&value) = column.get(&rule.metric) else {
                    continue;
                };
                if !value.is_finite() || !rule.trigger.fires(value) {
                    continue;
                }
                alerts.push(Alert {
                    severity: rule.severity,
                    kind: rule.kind,
                    subject: row.category_id.clone(),
                    message: format!(
                        "Category '{}': {} {} {:.2}",
                        row.category_id,
                        rule.metric,
                        rule.trigger.verb(),
                        value
                    ),
                });
            }
        }
        sort_alerts(&mut alerts);
        tracing::info!("{} alerts raised over {} categories", alerts.len(), rows.len());
        alerts
    }

    /// Raises alerts for an elevated index and for hot components.
    pub fn evaluate_snapshot(&self, snapshot: &TensionSnapshot) -> Vec<Alert> {
        let mut alerts = Vec::new();
        if snapshot.index >= self.snapshot.elevated_index {
            alerts.push(Alert {
                severity: 4,
                kind: AlertKind::Tension,
                subject: "index".to_string(),
                message: format!(
                    "Tension index at {:.2} is in the elevated band",
                    snapshot.index
                ),
            });
        }
        for (component_id, breakdown) in &snapshot.components {
            if breakdown.risk >= self.snapshot.component_risk {
                alerts.push(Alert {
                    severity: 3,
                    kind: AlertKind::Component,
                    subject: component_id.clone(),
                    message: format!(
                        "Component '{}' risk at {:.2} carries weight {:.2}",
                        component_id, breakdown.risk, breakdown.weight
                    ),
                });
            }
        }
        sort_alerts(&mut alerts);
        alerts
    }
}

impl Default for AlertEngine {
    fn default() -> Self {
        Self::new(default_rules(), SnapshotRules::default())
    }
}

impl Trigger {
    fn fires(&self, value: f64) -> bool {
        match *self {
            Trigger::Above(limit) => value >= limit,
            Trigger::Below(limit) => value <= limit,
            Trigger::MagnitudeAbove(limit) => value.abs() >= limit,
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            Trigger::Above(_) => "reached",
            Trigger::Below(_) => "fell to",
            Trigger::MagnitudeAbove(_) => "swung to",
        }
    }
}

/// The stock thresholds: a momentum spike on the normalized column, deeply
/// negative raw tone, a large market move in either direction, and elevated
/// search interest.
pub fn default_rules() -> Vec<MetricRule> {
    vec![
        MetricRule {
            metric: "momentum".to_string(),
            normalized: true,
            trigger: Trigger::Above(1.5),
            severity: 3,
            kind: AlertKind::Momentum,
        },
        MetricRule {
            metric: "tone".to_string(),
            normalized: false,
            trigger: Trigger::Below(-0.30),
            severity: 4,
            kind: AlertKind::Tone,
        },
        MetricRule {
            metric: "market".to_string(),
            normalized: false,
            trigger: Trigger::MagnitudeAbove(2.0),
            severity: 3,
            kind: AlertKind::Market,
        },
        MetricRule {
            metric: "interest".to_string(),
            normalized: false,
            trigger: Trigger::Above(70.0),
            severity: 2,
            kind: AlertKind::Interest,
        },
    ]
}

/// Highest severity first, then subject order. Ties beyond that keep their
/// evaluation order.
fn sort_alerts(alerts: &mut [Alert]) {
    alerts.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| a.subject.cmp(&b.subject))
    });
}
