use super::Database;
use super::rows::{ScoreCandidate, ScoredGame, SeasonTeam, TableCounts};
use crate::error::AppError;
use chrono::NaiveDate;
use std::collections::HashSet;

impl Database {
    /// All stored season ids, oldest first.
    pub async fn list_seasons(&self) -> Result<Vec<String>, AppError> {
        let seasons = sqlx::query_scalar(
            "select season_id from seasons order by cast(season_id as integer)",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(seasons)
    }

    pub async fn season_exists(&self, season: i32) -> Result<bool, AppError> {
        let count: i64 = sqlx::query_scalar("select count(*) from seasons where season_id = ?")
            .bind(season.to_string())
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    /// Seasons that already have at least one team row.
    pub async fn seasons_with_teams(&self) -> Result<HashSet<String>, AppError> {
        let seasons: Vec<String> = sqlx::query_scalar("select distinct season_id from teams")
            .fetch_all(&self.pool)
            .await?;
        Ok(seasons.into_iter().collect())
    }

    /// Seasons that already have at least one schedule row.
    pub async fn seasons_with_schedule(&self) -> Result<HashSet<String>, AppError> {
        let seasons: Vec<String> = sqlx::query_scalar("select distinct season_id from schedule")
            .fetch_all(&self.pool)
            .await?;
        Ok(seasons.into_iter().collect())
    }

    /// Game ids that already have a box score.
    pub async fn stored_score_ids(&self) -> Result<HashSet<String>, AppError> {
        let ids: Vec<String> = sqlx::query_scalar("select game_id from scores")
            .fetch_all(&self.pool)
            .await?;
        Ok(ids.into_iter().collect())
    }

    /// Regular season games played on or before `today` in seasons from
    /// `earliest_season` on. A game listed on several dates appears once,
    /// with its first date.
    pub async fn score_candidates(
        &self,
        today: NaiveDate,
        earliest_season: i32,
    ) -> Result<Vec<ScoreCandidate>, AppError> {
        let candidates = sqlx::query_as::<_, ScoreCandidate>(
            r#"
            select
                schedule.game_id as game_id
                , schedule.season_id as season_id
                , min(schedule.game_date) as game_date
            from schedule
                join seasons
                on schedule.season_id = seasons.season_id
            where
                schedule.game_date <= ?
                and cast(schedule.season_id as integer) >= ?
                and schedule.game_date
                    between seasons.regular_season_start
                        and seasons.regular_season_end
            group by schedule.game_id, schedule.season_id
            order by min(schedule.game_date), cast(schedule.game_id as integer)
            "#,
        )
        .bind(today)
        .bind(earliest_season)
        .fetch_all(&self.pool)
        .await?;
        Ok(candidates)
    }

    /// Distinct teams of a season ordered by numeric team id.
    pub async fn season_teams(&self, season: i32) -> Result<Vec<SeasonTeam>, AppError> {
        let teams = sqlx::query_as::<_, SeasonTeam>(
            r#"
            select distinct
                cast(team_id as integer) as team_id
                , coalesce(team_abbr, '') as team_abbr
                , coalesce(team_name, '') as team_name
            from teams
            where season_id = ?
            order by cast(team_id as integer)
            "#,
        )
        .bind(season.to_string())
        .fetch_all(&self.pool)
        .await?;
        Ok(teams)
    }

    /// Scored games of a season. Re-listed games collapse to one row since
    /// the selected columns are identical.
    pub async fn season_games(&self, season: i32) -> Result<Vec<ScoredGame>, AppError> {
        let games = sqlx::query_as::<_, ScoredGame>(
            r#"
            select *
            from (
                select distinct
                    scores.game_id as game_id
                    , cast(schedule.away_team as integer) as away_team
                    , cast(schedule.home_team as integer) as home_team
                    , scores.away_runs as away_runs
                    , scores.home_runs as home_runs
                from scores
                    join schedule
                    on scores.game_id = schedule.game_id
                where schedule.season_id = ?
            )
            order by cast(game_id as integer)
            "#,
        )
        .bind(season.to_string())
        .fetch_all(&self.pool)
        .await?;
        Ok(games)
    }

    pub async fn table_counts(&self) -> Result<TableCounts, AppError> {
        let (seasons, teams, schedule, scores): (i64, i64, i64, i64) = sqlx::query_as(
            r#"
            select
                (select count(*) from seasons)
                , (select count(*) from teams)
                , (select count(*) from schedule)
                , (select count(*) from scores)
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(TableCounts {
            seasons,
            teams,
            schedule,
            scores,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::rows::{ScheduleRow, ScoreRow, SeasonRow, TeamRow};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn game(season: &str, day: NaiveDate, id: &str, away: &str, home: &str) -> ScheduleRow {
        ScheduleRow {
            season_id: season.to_string(),
            game_date: day,
            game_id: id.to_string(),
            double_header: "N".to_string(),
            away_team: away.to_string(),
            away_team_wins: None,
            away_team_losses: None,
            home_team: home.to_string(),
            home_team_wins: None,
            home_team_losses: None,
        }
    }

    async fn seeded_db() -> Database {
        let db = Database::open_in_memory().await.unwrap();
        db.init_tables(false).await.unwrap();
        let seasons = ["2018", "2024"].map(|id| {
            let year: i32 = id.parse().unwrap();
            SeasonRow {
                season_id: id.to_string(),
                has_wildcard: true,
                preseason_start: None,
                season_start: None,
                regular_season_start: Some(date(year, 3, 28)),
                regular_season_end: Some(date(year, 9, 30)),
                season_end: None,
                offseason_start: None,
                offseason_end: None,
            }
        });
        db.insert_seasons(&seasons).await.unwrap();
        db.insert_teams(&[
            TeamRow {
                season_id: "2024".to_string(),
                team_id: "135".to_string(),
                team_name: "San Diego Padres".to_string(),
                team_abbr: "SD".to_string(),
            },
            TeamRow {
                season_id: "2024".to_string(),
                team_id: "119".to_string(),
                team_name: "Los Angeles Dodgers".to_string(),
                team_abbr: "LAD".to_string(),
            },
            TeamRow {
                season_id: "2024".to_string(),
                team_id: "1000".to_string(),
                team_name: "Numeric Ordering".to_string(),
                team_abbr: "NUM".to_string(),
            },
        ])
        .await
        .unwrap();
        db.insert_schedule(&[
            game("2018", date(2018, 5, 1), "500", "119", "135"),
            game("2024", date(2024, 3, 1), "900", "119", "135"), // spring training
            game("2024", date(2024, 4, 1), "1001", "119", "135"),
            game("2024", date(2024, 4, 9), "1001", "119", "135"), // re-listed
            game("2024", date(2024, 4, 2), "1002", "135", "119"),
            game("2024", date(2024, 8, 2), "1003", "135", "119"), // future
        ])
        .await
        .unwrap();
        db
    }

    #[tokio::test]
    async fn test_score_candidates_filters_window_season_and_date() {
        let db = seeded_db().await;

        let candidates = db.score_candidates(date(2024, 6, 1), 2019).await.unwrap();
        let ids: Vec<&str> = candidates.iter().map(|c| c.game_id.as_str()).collect();

        assert_eq!(ids, vec!["1001", "1002"]);
        assert_eq!(candidates[0].game_date, date(2024, 4, 1));
    }

    #[tokio::test]
    async fn test_season_teams_ordered_numerically() {
        let db = seeded_db().await;
        let teams = db.season_teams(2024).await.unwrap();
        let ids: Vec<i64> = teams.iter().map(|t| t.team_id).collect();
        assert_eq!(ids, vec![119, 135, 1000]);
        assert_eq!(teams[0].team_abbr, "LAD");
    }

    #[tokio::test]
    async fn test_season_games_collapse_relisted_games() {
        let db = seeded_db().await;
        for (id, home, away) in [("1001", 3, 1), ("1002", 2, 2), ("500", 1, 0)] {
            db.insert_score(&ScoreRow {
                game_id: id.to_string(),
                home_runs: home,
                away_runs: away,
            })
            .await
            .unwrap();
        }

        let games = db.season_games(2024).await.unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].game_id, "1001");
        assert_eq!(games[0].home_team, 135);
        assert_eq!(games[0].away_team, 119);
        assert_eq!(games[0].home_runs, 3);
    }

    #[tokio::test]
    async fn test_listing_helpers() {
        let db = seeded_db().await;
        assert_eq!(db.list_seasons().await.unwrap(), vec!["2018", "2024"]);
        assert!(db.season_exists(2024).await.unwrap());
        assert!(!db.season_exists(1999).await.unwrap());
        assert!(db.seasons_with_teams().await.unwrap().contains("2024"));
        assert!(!db.seasons_with_teams().await.unwrap().contains("2018"));
        assert_eq!(db.seasons_with_schedule().await.unwrap().len(), 2);
        assert!(db.stored_score_ids().await.unwrap().is_empty());

        let counts = db.table_counts().await.unwrap();
        assert_eq!(counts.seasons, 2);
        assert_eq!(counts.teams, 3);
        assert_eq!(counts.schedule, 6);
        assert_eq!(counts.scores, 0);
    }
}
