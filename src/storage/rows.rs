//! Flat row types for the four tables and for the model projections.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct SeasonRow {
    pub season_id: String,
    pub has_wildcard: bool,
    pub preseason_start: Option<NaiveDate>,
    pub season_start: Option<NaiveDate>,
    pub regular_season_start: Option<NaiveDate>,
    pub regular_season_end: Option<NaiveDate>,
    pub season_end: Option<NaiveDate>,
    pub offseason_start: Option<NaiveDate>,
    pub offseason_end: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamRow {
    pub season_id: String,
    pub team_id: String,
    pub team_name: String,
    pub team_abbr: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRow {
    pub season_id: String,
    pub game_date: NaiveDate,
    pub game_id: String,
    pub double_header: String,
    pub away_team: String,
    pub away_team_wins: Option<i32>,
    pub away_team_losses: Option<i32>,
    pub home_team: String,
    pub home_team_wins: Option<i32>,
    pub home_team_losses: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRow {
    pub game_id: String,
    pub home_runs: i32,
    pub away_runs: i32,
}

/// A schedule entry still waiting for its box score.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ScoreCandidate {
    pub game_id: String,
    pub season_id: String,
    pub game_date: NaiveDate,
}

/// A scored game of one season, as fed to the model driver.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ScoredGame {
    pub game_id: String,
    pub away_team: i64,
    pub home_team: i64,
    pub away_runs: i64,
    pub home_runs: i64,
}

/// A team of one season with its numeric id.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct SeasonTeam {
    pub team_id: i64,
    pub team_abbr: String,
    pub team_name: String,
}

/// Row counts of the four tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub seasons: i64,
    pub teams: i64,
    pub schedule: i64,
    pub scores: i64,
}
