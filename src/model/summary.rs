use super::draws::RankDraws;
use crate::constants::summary::{LOWER_PERCENTILE, MEDIAN_PERCENTILE, UPPER_PERCENTILE};

/// Percentile of sorted values, interpolating linearly between the two
/// nearest order statistics. `p` is in `[0, 100]`.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let rank = (p.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = rank.ceil() as usize;
            let weight = rank - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * weight
        }
    }
}

/// Posterior rank summary of one team.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankSummary {
    /// 1-based model index of the team.
    pub const_id: usize,
    pub ci_low: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub ci_high: f64,
}

/// Summarizes every team's draws, in model index order.
pub fn summarize(draws: &RankDraws) -> Vec<RankSummary> {
    draws
        .columns()
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let mut sorted = column.clone();
            sorted.sort_by(f64::total_cmp);
            RankSummary {
                const_id: i + 1,
                ci_low: percentile(&sorted, LOWER_PERCENTILE),
                q25: percentile(&sorted, 25.0),
                median: percentile(&sorted, MEDIAN_PERCENTILE),
                q75: percentile(&sorted, 75.0),
                ci_high: percentile(&sorted, UPPER_PERCENTILE),
            }
        })
        .collect()
}
