//! Projection of stored games into the engine's JSON input.

use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use super::variant::ModelVariant;
use crate::constants::margin::BLOWOUT_RUNS;
use crate::error::AppError;
use crate::storage::{ScoredGame, SeasonTeam};

/// Maps the teams of one season to the 1-based indices used by the model.
/// Teams are numbered in ascending team id order.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamIndex {
    teams: Vec<SeasonTeam>,
    by_id: HashMap<i64, usize>,
}

impl TeamIndex {
    pub fn new(mut teams: Vec<SeasonTeam>) -> Self {
        teams.sort_by_key(|t| t.team_id);
        teams.dedup_by_key(|t| t.team_id);
        let by_id = teams
            .iter()
            .enumerate()
            .map(|(i, t)| (t.team_id, i + 1))
            .collect();
        Self { teams, by_id }
    }

    /// Number of teams, `J` in the model.
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn const_id(&self, team_id: i64) -> Option<usize> {
        self.by_id.get(&team_id).copied()
    }

    /// Team at a 1-based model index.
    pub fn team(&self, const_id: usize) -> Option<&SeasonTeam> {
        const_id.checked_sub(1).and_then(|i| self.teams.get(i))
    }

    pub fn teams(&self) -> &[SeasonTeam] {
        &self.teams
    }
}

/// Ordinal category of a home run margin: 1 is a blowout loss, 3 a tie,
/// 5 a blowout win.
pub fn margin_category(home_runs: i64, away_runs: i64) -> u8 {
    let d = home_runs - away_runs;
    match d {
        d if d < -BLOWOUT_RUNS => 1,
        d if d < 0 => 2,
        0 => 3,
        d if d <= BLOWOUT_RUNS => 4,
        _ => 5,
    }
}

/// Input of every model: `N` games between `J` teams, `X[n] = [home, away]`
/// as 1-based team indices and the response `y`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StanData {
    #[serde(rename = "N")]
    pub n: usize,
    #[serde(rename = "J")]
    pub j: usize,
    #[serde(rename = "X")]
    pub x: Vec<[usize; 2]>,
    pub y: Vec<u8>,
}

/// Builds the model input for one season. Games involving a team missing
/// from the index are dropped.
pub fn build_stan_data(
    season: i32,
    games: &[ScoredGame],
    index: &TeamIndex,
    variant: ModelVariant,
) -> Result<StanData, AppError> {
    let mut x = Vec::with_capacity(games.len());
    let mut y = Vec::with_capacity(games.len());

    for game in games {
        let (Some(home), Some(away)) = (index.const_id(game.home_team), index.const_id(game.away_team))
        else {
            debug!(
                "Dropping game {}: team {} or {} not in the {} team list",
                game.game_id, game.home_team, game.away_team, season
            );
            continue;
        };
        x.push([home, away]);
        y.push(if variant.uses_margin() {
            margin_category(game.home_runs, game.away_runs)
        } else {
            u8::from(game.home_runs > game.away_runs)
        });
    }

    if x.is_empty() {
        return Err(AppError::NoGames { season });
    }

    Ok(StanData {
        n: x.len(),
        j: index.len(),
        x,
        y,
    })
}

/// Writes the model input as JSON.
pub async fn write_stan_json(path: &Path, data: &StanData) -> Result<(), AppError> {
    let json = serde_json::to_string(data)?;
    tokio::fs::write(path, json).await?;
    debug!("Wrote {} games to {}", data.n, path.display());
    Ok(())
}
