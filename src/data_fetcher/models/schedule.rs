use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Response of `GET /schedule?sportId=1&season={season}`.
///
/// Seasons without recorded games come back without `dates`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub dates: Vec<ScheduleDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleDate {
    pub date: NaiveDate,
    #[serde(default)]
    pub games: Vec<ScheduleGame>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleGame {
    #[serde(rename = "gamePk")]
    pub game_pk: i64,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(rename = "gameType", default)]
    pub game_type: Option<String>,
    #[serde(rename = "doubleHeader", default)]
    pub double_header: Option<String>,
    pub teams: GameTeams,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameTeams {
    pub away: GameTeamSide,
    pub home: GameTeamSide,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameTeamSide {
    pub team: TeamRef,
    #[serde(rename = "leagueRecord", default)]
    pub league_record: Option<LeagueRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LeagueRecord {
    pub wins: i32,
    pub losses: i32,
}

impl ScheduleResponse {
    /// Total number of games over all dates.
    pub fn game_count(&self) -> usize {
        self.dates.iter().map(|d| d.games.len()).sum()
    }
}
