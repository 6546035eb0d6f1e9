/// Observations in the trailing window compared against the baseline.
const MOBILITY_WINDOW: usize = 7;

/// Deviation of recent mobility from a fixed pre-period baseline, in percent.
///
/// Averages the last seven finite observations and compares them to the
/// baseline level. `None` when the window is too shallow or the baseline is
/// zero or non-finite, since a ratio against either says nothing.
pub fn baseline_deviation_pct(values: &[f64], baseline: f64) -> Option<f64> {
    if !baseline.is_finite() || baseline.abs() < 1e-9 {
        return None;
    }
    let usable: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if usable.len() < MOBILITY_WINDOW {
        return None;
    }

    let window = &usable[usable.len() - MOBILITY_WINDOW..];
    let mean = window.iter().sum::<f64>() / MOBILITY_WINDOW as f64;
    Some(((mean / baseline) - 1.0) * 100.0)
}
