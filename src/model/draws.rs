//! Reading rank draws out of CmdStan's per-chain CSV files.

use csv::{ReaderBuilder, StringRecord};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::AppError;

/// Posterior draws of `rank`, one column per team in model index order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankDraws {
    columns: Vec<Vec<f64>>,
}

impl RankDraws {
    pub fn from_columns(columns: Vec<Vec<f64>>) -> Self {
        Self { columns }
    }

    pub fn teams(&self) -> usize {
        self.columns.len()
    }

    /// Draws of the team at a 1-based model index.
    pub fn team(&self, const_id: usize) -> Option<&[f64]> {
        const_id
            .checked_sub(1)
            .and_then(|i| self.columns.get(i))
            .map(Vec::as_slice)
    }

    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }

    /// Draws per team across all chains.
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn rank_positions(header: &StringRecord, teams: usize, path: &Path) -> Result<Vec<usize>, AppError> {
    (1..=teams)
        .map(|j| {
            let name = format!("rank.{j}");
            header.iter().position(|h| h == name).ok_or_else(|| {
                AppError::draws_missing(format!("column {name} not in {}", path.display()))
            })
        })
        .collect()
}

/// Collects `rank.1..rank.{teams}` from every chain file. Comment lines
/// (adaptation info, timing) start with `#` and are skipped.
pub async fn read_draws(paths: &[PathBuf], teams: usize) -> Result<RankDraws, AppError> {
    let mut columns = vec![Vec::new(); teams];

    for path in paths {
        let contents = tokio::fs::read(path).await?;
        let mut reader = ReaderBuilder::new()
            .comment(Some(b'#'))
            .flexible(true)
            .from_reader(contents.as_slice());
        let positions = rank_positions(reader.headers()?, teams, path)?;

        let mut rows = 0usize;
        for record in reader.records() {
            let record = record?;
            for (column, &pos) in columns.iter_mut().zip(&positions) {
                let raw = record.get(pos).unwrap_or_default();
                let value = raw.trim().parse::<f64>().map_err(|_| {
                    AppError::draws_missing(format!(
                        "unparsable rank value '{raw}' in {}",
                        path.display()
                    ))
                })?;
                column.push(value);
            }
            rows += 1;
        }
        debug!("Read {rows} draws from {}", path.display());
    }

    let draws = RankDraws::from_columns(columns);
    if draws.is_empty() {
        return Err(AppError::draws_missing("sampler produced no draws"));
    }
    Ok(draws)
}
