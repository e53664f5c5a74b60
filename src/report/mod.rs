//! Terminal outputs of a fit: the estimates table and the rank chart.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use crate::model::{ModelVariant, RankSummary, TeamIndex};
use crate::storage::SeasonTeam;

pub mod chart;
pub mod estimates;

pub use chart::{render_chart, write_chart};
pub use estimates::{EstimateRow, write_estimates};

/// A team joined to its posterior rank summary.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamRank {
    pub team: SeasonTeam,
    pub summary: RankSummary,
}

/// Joins summaries back to team metadata, ordered by median, then lower
/// and upper bound. Summaries without a matching team are dropped.
pub fn team_ranks(summaries: &[RankSummary], index: &TeamIndex) -> Vec<TeamRank> {
    let mut ranks: Vec<TeamRank> = summaries
        .iter()
        .filter_map(|summary| {
            index.team(summary.const_id).map(|team| TeamRank {
                team: team.clone(),
                summary: *summary,
            })
        })
        .collect();
    ranks.sort_by(|a, b| compare_summaries(&a.summary, &b.summary));
    ranks
}

fn compare_summaries(a: &RankSummary, b: &RankSummary) -> Ordering {
    a.median
        .total_cmp(&b.median)
        .then(a.ci_low.total_cmp(&b.ci_low))
        .then(a.ci_high.total_cmp(&b.ci_high))
}

/// Output file paths of one season and model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub estimates: PathBuf,
    pub chart: PathBuf,
}

impl ReportPaths {
    pub fn new(output_dir: &Path, season: i32, variant: ModelVariant) -> Self {
        Self {
            estimates: output_dir.join(format!("{season}_{variant}_estimates.csv")),
            chart: output_dir.join(format!("{season}_{variant}.svg")),
        }
    }
}
