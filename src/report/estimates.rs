use serde::Serialize;
use std::path::Path;
use tracing::info;

use super::TeamRank;
use crate::error::AppError;

/// One line of the estimates CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateRow {
    pub team_abbr: String,
    pub team_id: i64,
    pub ci_low: f64,
    pub median: f64,
    pub ci_high: f64,
}

impl From<&TeamRank> for EstimateRow {
    fn from(rank: &TeamRank) -> Self {
        Self {
            team_abbr: rank.team.team_abbr.clone(),
            team_id: rank.team.team_id,
            ci_low: rank.summary.ci_low,
            median: rank.summary.median,
            ci_high: rank.summary.ci_high,
        }
    }
}

/// Writes the ranks, in the given order, as CSV with a header line.
pub async fn write_estimates(path: &Path, ranks: &[TeamRank]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for rank in ranks {
        writer.serialize(EstimateRow::from(rank))?;
    }
    let contents = writer
        .into_inner()
        .map_err(|e| AppError::Io(e.into_error()))?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, contents).await?;
    info!("Wrote estimates for {} teams to {}", ranks.len(), path.display());
    Ok(())
}
