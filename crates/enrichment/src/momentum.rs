/// Observations in the trailing mean that momentum compares against.
pub const MOMENTUM_WINDOW: usize = 20;

/// Deviation of the latest observation from its trailing mean, in percent.
///
/// Needs one observation more than the window so the mean has depth behind
/// the value it anchors; with fewer, or with a vanishing trailing mean,
/// momentum reads 0.0. Non-finite observations are ignored.
pub fn momentum_pct(values: &[f64]) -> f64 {
    let usable: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if usable.len() < MOMENTUM_WINDOW + 1 {
        return 0.0;
    }

    let last = usable[usable.len() - 1];
    let window = &usable[usable.len() - MOMENTUM_WINDOW..];
    let mean = window.iter().sum::<f64>() / MOMENTUM_WINDOW as f64;
    if mean.abs() < 1e-9 {
        return 0.0;
    }
    ((last / mean) - 1.0) * 100.0
}
