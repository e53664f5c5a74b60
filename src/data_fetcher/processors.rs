//! Reshape nested API responses into flat table rows.

use crate::data_fetcher::models::{
    LinescoreResponse, ScheduleResponse, SeasonsResponse, TeamsResponse,
};
use crate::storage::rows::{ScheduleRow, ScoreRow, SeasonRow, TeamRow};
use tracing::debug;

/// One row per season entry.
pub fn season_rows(response: SeasonsResponse) -> Vec<SeasonRow> {
    response
        .seasons
        .into_iter()
        .map(|s| SeasonRow {
            season_id: s.season_id,
            has_wildcard: s.has_wildcard,
            preseason_start: s.pre_season_start_date,
            season_start: s.season_start_date,
            regular_season_start: s.regular_season_start_date,
            regular_season_end: s.regular_season_end_date,
            season_end: s.season_end_date,
            offseason_start: s.offseason_start_date,
            offseason_end: s.off_season_end_date,
        })
        .collect()
}

/// One row per team. Rows are keyed on the requested season so they always
/// satisfy the foreign key to `seasons`.
pub fn team_rows(response: TeamsResponse, season_id: &str) -> Vec<TeamRow> {
    response
        .teams
        .into_iter()
        .map(|t| {
            if let Some(team_season) = t.season
                && team_season.to_string() != season_id
            {
                debug!(
                    "Team {} reports season {} while ingesting {}",
                    t.id, team_season, season_id
                );
            }
            TeamRow {
                season_id: season_id.to_string(),
                team_id: t.id.to_string(),
                team_name: t.name,
                team_abbr: t.abbreviation.unwrap_or_default(),
            }
        })
        .collect()
}

/// Flattens `dates[].games[]` into one row per listed game. The game date is
/// taken from the enclosing date entry, so a postponed game yields one row
/// per date it was listed on.
pub fn schedule_rows(response: ScheduleResponse, season_id: &str) -> Vec<ScheduleRow> {
    let mut rows = Vec::with_capacity(response.game_count());
    for date in response.dates {
        for game in date.games {
            let away = game.teams.away;
            let home = game.teams.home;
            rows.push(ScheduleRow {
                season_id: game.season.unwrap_or_else(|| season_id.to_string()),
                game_date: date.date,
                game_id: game.game_pk.to_string(),
                double_header: game.double_header.unwrap_or_else(|| "N".to_string()),
                away_team: away.team.id.to_string(),
                away_team_wins: away.league_record.map(|r| r.wins),
                away_team_losses: away.league_record.map(|r| r.losses),
                home_team: home.team.id.to_string(),
                home_team_wins: home.league_record.map(|r| r.wins),
                home_team_losses: home.league_record.map(|r| r.losses),
            });
        }
    }
    rows
}

/// Box score row for a finished game. Games that are postponed or still
/// being played give `None`.
pub fn score_row(game_id: &str, response: &LinescoreResponse) -> Option<ScoreRow> {
    response
        .final_runs()
        .map(|(home_runs, away_runs)| ScoreRow {
            game_id: game_id.to_string(),
            home_runs,
            away_runs,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn schedule_json() -> &'static str {
        r#"{
            "dates": [
                {
                    "date": "2024-04-01",
                    "games": [
                        {
                            "gamePk": 1001, "season": "2024", "doubleHeader": "N",
                            "teams": {
                                "away": {"team": {"id": 119}, "leagueRecord": {"wins": 3, "losses": 1}},
                                "home": {"team": {"id": 135}, "leagueRecord": {"wins": 2, "losses": 2}}
                            }
                        },
                        {
                            "gamePk": 1002, "season": "2024", "doubleHeader": "S",
                            "teams": {
                                "away": {"team": {"id": 147}},
                                "home": {"team": {"id": 111}}
                            }
                        }
                    ]
                },
                {
                    "date": "2024-04-02",
                    "games": [
                        {
                            "gamePk": 1001, "season": "2024",
                            "teams": {
                                "away": {"team": {"id": 119}},
                                "home": {"team": {"id": 135}}
                            }
                        }
                    ]
                }
            ]
        }"#
    }

    #[test]
    fn test_schedule_rows_flatten_every_date() {
        let response: ScheduleResponse = serde_json::from_str(schedule_json()).unwrap();
        let rows = schedule_rows(response, "2024");

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].game_id, "1001");
        assert_eq!(rows[0].away_team, "119");
        assert_eq!(rows[0].away_team_wins, Some(3));
        assert_eq!(rows[0].home_team_losses, Some(2));
        assert_eq!(rows[1].double_header, "S");
        assert_eq!(rows[1].home_team_wins, None);
        // The re-listed game keeps its own date and a default double header code
        assert_eq!(rows[2].game_id, "1001");
        assert_eq!(rows[2].game_date, NaiveDate::from_ymd_opt(2024, 4, 2).unwrap());
        assert_eq!(rows[2].double_header, "N");
    }

    #[test]
    fn test_schedule_rows_empty_season() {
        let rows = schedule_rows(ScheduleResponse::default(), "1877");
        assert!(rows.is_empty());
    }

    #[test]
    fn test_team_rows_use_requested_season() {
        let response: TeamsResponse = serde_json::from_str(
            r#"{"teams": [{"id": 108, "name": "Los Angeles Angels", "abbreviation": "LAA", "season": 2024},
                          {"id": 999, "name": "Old Club"}]}"#,
        )
        .unwrap();
        let rows = team_rows(response, "2024");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].team_id, "108");
        assert_eq!(rows[0].team_abbr, "LAA");
        assert_eq!(rows[1].season_id, "2024");
        assert_eq!(rows[1].team_abbr, "");
    }

    #[test]
    fn test_season_rows_map_dates() {
        let response: SeasonsResponse = serde_json::from_str(
            r#"{"seasons": [{"seasonId": "2023", "hasWildcard": true,
                             "regularSeasonStartDate": "2023-03-30",
                             "regularSeasonEndDate": "2023-10-01"}]}"#,
        )
        .unwrap();
        let rows = season_rows(response);
        assert_eq!(rows[0].season_id, "2023");
        assert!(rows[0].has_wildcard);
        assert_eq!(
            rows[0].regular_season_end,
            NaiveDate::from_ymd_opt(2023, 10, 1)
        );
        assert_eq!(rows[0].offseason_end, None);
    }

    #[test]
    fn test_score_row() {
        let played: LinescoreResponse = serde_json::from_str(
            r#"{"currentInning": 9, "inningState": "End", "outs": 3,
                "teams": {"home": {"runs": 3}, "away": {"runs": 4}}}"#,
        )
        .unwrap();
        assert_eq!(
            score_row("1001", &played),
            Some(ScoreRow {
                game_id: "1001".to_string(),
                home_runs: 3,
                away_runs: 4
            })
        );
        assert_eq!(score_row("1002", &LinescoreResponse::default()), None);
    }

    #[test]
    fn test_score_row_skips_game_in_progress() {
        let live: LinescoreResponse = serde_json::from_str(
            r#"{"currentInning": 5, "inningState": "Middle", "scheduledInnings": 9,
                "teams": {"home": {"runs": 1}, "away": {"runs": 0}}}"#,
        )
        .unwrap();
        assert_eq!(score_row("1001", &live), None);
    }
}
