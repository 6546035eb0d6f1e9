use core_types::RiskDirection;

/// Minimum number of usable observations a history must hold before
/// percentile ranking engages. Below this, every query is neutral.
pub const MIN_HISTORY: usize = 8;

/// Percentile returned whenever a history carries no ranking information.
const NEUTRAL: f64 = 0.5;

/// Ranks `current` against a component's own observation history.
///
/// The rank is the share of strictly smaller observations over `n - 1`, so a
/// history's minimum lands at 0.0 and a unique maximum at 1.0. Non-finite
/// history entries are ignored; the result is clipped to `[0, 1]` because a
/// query above every observation would otherwise overshoot.
///
/// Neutral 0.5 is returned when the query is non-finite, fewer than
/// [`MIN_HISTORY`] usable observations exist, or the history has zero spread.
pub fn percentile_rank(history: &[f64], current: f64) -> f64 {
    if !current.is_finite() {
        return NEUTRAL;
    }

    let mut usable = 0usize;
    let mut below = 0usize;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &value in history {
        if !value.is_finite() {
            continue;
        }
        usable += 1;
        if value < current {
            below += 1;
        }
        if value < min {
            min = value;
        }
        if value > max {
            max = value;
        }
    }

    if usable < MIN_HISTORY || min == max {
        return NEUTRAL;
    }

    let rank = below as f64 / (usable - 1) as f64;
    rank.clamp(0.0, 1.0)
}

/// Maps a percentile rank to a 0-100 risk contribution.
///
/// For `HigherIsWorse` components a high rank means a high risk; for
/// `LowerIsWorse` components the mapping is mirrored.
pub fn risk_contribution(direction: RiskDirection, percentile: f64) -> f64 {
    match direction {
        RiskDirection::HigherIsWorse => 100.0 * percentile,
        RiskDirection::LowerIsWorse => 100.0 * (1.0 - percentile),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn short_history_is_neutral() {
        let history = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        assert!((percentile_rank(&history, 7.0) - 0.5).abs() < EPS);
        assert!((percentile_rank(&history, 1.0) - 0.5).abs() < EPS);
    }

    #[test]
    fn historical_minimum_ranks_zero() {
        let history = [-1.0, -0.5, 0.0, 0.5, 1.0, -1.0, -0.5, 0.0];
        let rank = percentile_rank(&history, -1.0);
        assert!(rank.abs() < EPS, "minimum must rank 0.0, got {}", rank);
    }

    #[test]
    fn historical_maximum_ranks_one() {
        let history = [10.0, 12.0, 14.0, 16.0, 18.0, 20.0, 22.0, 24.0];
        let rank = percentile_rank(&history, 24.0);
        assert!((rank - 1.0).abs() < EPS, "maximum must rank 1.0, got {}", rank);
    }

    #[test]
    fn rank_is_monotone_in_the_query() {
        let history = [10.0, 12.0, 14.0, 16.0, 18.0, 20.0, 22.0, 24.0];
        let mut previous = -1.0;
        for current in [10.0, 13.0, 16.0, 19.0, 24.0, 30.0] {
            let rank = percentile_rank(&history, current);
            assert!(
                rank >= previous,
                "rank must not decrease as the query grows, {} < {}",
                rank,
                previous
            );
            previous = rank;
        }
    }

    #[test]
    fn rank_clips_when_query_exceeds_history() {
        let history = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let rank = percentile_rank(&history, 100.0);
        assert!((rank - 1.0).abs() < EPS, "overshoot must clip to 1.0");
    }

    #[test]
    fn zero_spread_history_is_neutral() {
        let history = [5.0; 8];
        assert!((percentile_rank(&history, 5.0) - 0.5).abs() < EPS);
        assert!((percentile_rank(&history, 9.0) - 0.5).abs() < EPS);
    }

    #[test]
    fn non_finite_query_is_neutral() {
        let history = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        assert!((percentile_rank(&history, f64::NAN) - 0.5).abs() < EPS);
        assert!((percentile_rank(&history, f64::INFINITY) - 0.5).abs() < EPS);
    }

    #[test]
    fn history_gaps_are_ignored() {
        let full = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let gappy = [
            1.0,
            f64::NAN,
            2.0,
            3.0,
            4.0,
            5.0,
            6.0,
            7.0,
            f64::NAN,
            8.0,
        ];
        assert!((percentile_rank(&gappy, 6.0) - percentile_rank(&full, 6.0)).abs() < EPS);

        // Seven usable values once the gap is dropped, so back to neutral.
        let short = [1.0, 2.0, 3.0, f64::NAN, 4.0, 5.0, 6.0, 7.0];
        assert!((percentile_rank(&short, 7.0) - 0.5).abs() < EPS);
    }

    #[test]
    fn duplicated_minimum_still_ranks_zero() {
        let history = [-1.0, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        assert!(percentile_rank(&history, -1.0).abs() < EPS);
    }

    #[test]
    fn polarity_mapping_follows_direction() {
        let hi = risk_contribution(RiskDirection::HigherIsWorse, 0.25);
        let lo = risk_contribution(RiskDirection::LowerIsWorse, 0.25);
        assert!((hi - 25.0).abs() < EPS);
        assert!((lo - 75.0).abs() < EPS);
    }

    #[test]
    fn polarity_mapping_is_symmetric() {
        for percentile in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let hi = risk_contribution(RiskDirection::HigherIsWorse, percentile);
            let lo = risk_contribution(RiskDirection::LowerIsWorse, 1.0 - percentile);
            assert!(
                (hi - lo).abs() < EPS,
                "mirrored percentiles must agree at p={}",
                percentile
            );
            let sum = risk_contribution(RiskDirection::HigherIsWorse, percentile)
                + risk_contribution(RiskDirection::LowerIsWorse, percentile);
            assert!((sum - 100.0).abs() < EPS);
        }
    }
}
