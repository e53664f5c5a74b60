use serde::{Deserialize, Serialize};

use crate::constants::game::{OUTS_PER_HALF_INNING, REGULATION_INNINGS};

/// Response of `GET /game/{gamePk}/linescore`.
///
/// Games that were postponed or have not started carry no run totals.
/// Games in progress carry the totals so far.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LinescoreResponse {
    #[serde(rename = "currentInning", default)]
    pub current_inning: Option<u32>,
    #[serde(rename = "scheduledInnings", default)]
    pub scheduled_innings: Option<u32>,
    /// One of `Top`, `Middle`, `Bottom` or `End`.
    #[serde(rename = "inningState", default)]
    pub inning_state: Option<String>,
    #[serde(rename = "isTopInning", default)]
    pub is_top_inning: Option<bool>,
    #[serde(default)]
    pub outs: Option<u32>,
    #[serde(default)]
    pub teams: Option<LinescoreTeams>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinescoreTeams {
    #[serde(default)]
    pub home: LinescoreSide,
    #[serde(default)]
    pub away: LinescoreSide,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LinescoreSide {
    #[serde(default)]
    pub runs: Option<i32>,
    #[serde(default)]
    pub hits: Option<i32>,
    #[serde(default)]
    pub errors: Option<i32>,
}

impl LinescoreResponse {
    /// `(home_runs, away_runs)` so far, when both totals are present.
    pub fn run_totals(&self) -> Option<(i32, i32)> {
        let teams = self.teams.as_ref()?;
        Some((teams.home.runs?, teams.away.runs?))
    }

    /// Whether the game has been decided.
    ///
    /// A game ends once the scheduled innings are reached with one side
    /// ahead and that side's lead can no longer change: the home team leads
    /// after the top half, the home team goes ahead in the bottom half, or
    /// the bottom half is over. Shortened and tied games stay open.
    pub fn is_complete(&self) -> bool {
        let (Some((home, away)), Some(inning)) = (self.run_totals(), self.current_inning) else {
            return false;
        };
        if inning < self.scheduled_innings.unwrap_or(REGULATION_INNINGS) || home == away {
            return false;
        }

        let half_over = self.outs == Some(OUTS_PER_HALF_INNING);
        match self.inning_state.as_deref() {
            Some("End") => true,
            Some("Middle") => home > away,
            _ if self.is_top_inning.unwrap_or(false) => home > away && half_over,
            Some("Bottom") => home > away || half_over,
            _ => false,
        }
    }

    /// Final `(home_runs, away_runs)` of a completed game.
    pub fn final_runs(&self) -> Option<(i32, i32)> {
        self.run_totals().filter(|_| self.is_complete())
    }
}
