//! Insert-or-ignore writers. Each returns the number of rows actually added.

use super::Database;
use super::rows::{ScheduleRow, ScoreRow, SeasonRow, TeamRow};
use crate::error::AppError;
use tracing::debug;

impl Database {
    pub async fn insert_seasons(&self, rows: &[SeasonRow]) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;
        for row in rows {
            let result = sqlx::query(
                r#"
                insert or ignore into seasons (
                    season_id, has_wildcard, preseason_start, season_start
                    , regular_season_start, regular_season_end, season_end
                    , offseason_start, offseason_end
                )
                values (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&row.season_id)
            .bind(row.has_wildcard)
            .bind(row.preseason_start)
            .bind(row.season_start)
            .bind(row.regular_season_start)
            .bind(row.regular_season_end)
            .bind(row.season_end)
            .bind(row.offseason_start)
            .bind(row.offseason_end)
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }
        tx.commit().await?;
        debug!("Inserted {inserted} of {} season rows", rows.len());
        Ok(inserted)
    }

    pub async fn insert_teams(&self, rows: &[TeamRow]) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;
        for row in rows {
            let result = sqlx::query(
                r#"
                insert or ignore into teams (season_id, team_id, team_name, team_abbr)
                values (?, ?, ?, ?)
                "#,
            )
            .bind(&row.season_id)
            .bind(&row.team_id)
            .bind(&row.team_name)
            .bind(&row.team_abbr)
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }
        tx.commit().await?;
        debug!("Inserted {inserted} of {} team rows", rows.len());
        Ok(inserted)
    }

    pub async fn insert_schedule(&self, rows: &[ScheduleRow]) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;
        for row in rows {
            let result = sqlx::query(
                r#"
                insert or ignore into schedule (
                    season_id, game_date, game_id, double_header
                    , away_team, away_team_wins, away_team_losses
                    , home_team, home_team_wins, home_team_losses
                )
                values (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&row.season_id)
            .bind(row.game_date)
            .bind(&row.game_id)
            .bind(&row.double_header)
            .bind(&row.away_team)
            .bind(row.away_team_wins)
            .bind(row.away_team_losses)
            .bind(&row.home_team)
            .bind(row.home_team_wins)
            .bind(row.home_team_losses)
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }
        tx.commit().await?;
        debug!("Inserted {inserted} of {} schedule rows", rows.len());
        Ok(inserted)
    }

    /// Stores one box score. Returns `false` when the game already had one.
    pub async fn insert_score(&self, row: &ScoreRow) -> Result<bool, AppError> {
        let result = sqlx::query(
            "insert or ignore into scores (game_id, home_runs, away_runs) values (?, ?, ?)",
        )
        .bind(&row.game_id)
        .bind(row.home_runs)
        .bind(row.away_runs)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}
