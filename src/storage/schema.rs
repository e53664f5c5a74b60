//! Table initializer: fixed schema statements for the four tables.

use super::Database;
use crate::error::AppError;
use tracing::info;

/// Table names in creation order (parents before children).
pub const TABLES: [&str; 4] = ["seasons", "teams", "schedule", "scores"];

fn create_prefix(if_not_exists: bool) -> &'static str {
    if if_not_exists {
        "create table if not exists"
    } else {
        "create table"
    }
}

fn seasons_ddl(if_not_exists: bool) -> String {
    format!(
        r#"
        {} seasons (
            season_id varchar(4)
            , has_wildcard boolean
            , preseason_start date
            , season_start date
            , regular_season_start date
            , regular_season_end date
            , season_end date
            , offseason_start date
            , offseason_end date
            , primary key (season_id)
        );
        "#,
        create_prefix(if_not_exists)
    )
}

fn teams_ddl(if_not_exists: bool) -> String {
    format!(
        r#"
        {} teams (
            season_id varchar(4) not null
            , team_id varchar(4) not null
            , team_name varchar(50)
            , team_abbr varchar(4)
            , foreign key (season_id) references seasons(season_id)
            , primary key (season_id, team_id)
        );
        "#,
        create_prefix(if_not_exists)
    )
}

// No foreign keys to teams: the API lists games for teams it does not
// return from the teams endpoint.
fn schedule_ddl(if_not_exists: bool) -> String {
    format!(
        r#"
        {} schedule (
            season_id varchar(4) not null
            , game_date date not null
            , game_id varchar(10) not null
            , double_header varchar(1)
            , away_team varchar(4)
            , away_team_wins integer
            , away_team_losses integer
            , home_team varchar(4)
            , home_team_wins integer
            , home_team_losses integer
            , foreign key (season_id) references seasons(season_id)
            , primary key (season_id, game_id, game_date)
        );
        "#,
        create_prefix(if_not_exists)
    )
}

fn scores_ddl(if_not_exists: bool) -> String {
    format!(
        r#"
        {} scores (
            game_id varchar(10) not null
            , home_runs integer not null
            , away_runs integer not null
            , primary key (game_id)
        );
        "#,
        create_prefix(if_not_exists)
    )
}

impl Database {
    /// Creates the seasons, teams, schedule and scores tables.
    ///
    /// Without `if_not_exists` any existing table is an error and nothing
    /// is created.
    pub async fn init_tables(&self, if_not_exists: bool) -> Result<(), AppError> {
        info!("Table initialization beginning.");
        if !if_not_exists
            && let Some(table) = self.existing_tables().await?.into_iter().next()
        {
            return Err(AppError::TableExists { table });
        }
        sqlx::query(&seasons_ddl(if_not_exists))
            .execute(&self.pool)
            .await?;
        info!("Seasons table initialized.");
        sqlx::query(&teams_ddl(if_not_exists))
            .execute(&self.pool)
            .await?;
        info!("Teams table initialized.");
        sqlx::query(&schedule_ddl(if_not_exists))
            .execute(&self.pool)
            .await?;
        info!("Schedule table initialized.");
        sqlx::query(&scores_ddl(if_not_exists))
            .execute(&self.pool)
            .await?;
        info!("Score table initialized.");
        Ok(())
    }

    /// Names of the expected tables that exist in the database.
    pub async fn existing_tables(&self) -> Result<Vec<String>, AppError> {
        let names: Vec<String> = sqlx::query_scalar(
            "select name from sqlite_master where type = 'table' order by name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(names
            .into_iter()
            .filter(|n| TABLES.contains(&n.as_str()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_creates_all_tables() {
        let db = Database::open_in_memory().await.unwrap();
        db.init_tables(false).await.unwrap();

        let mut tables = db.existing_tables().await.unwrap();
        tables.sort();
        assert_eq!(tables, vec!["schedule", "scores", "seasons", "teams"]);
    }

    #[tokio::test]
    async fn test_init_twice_fails_without_if_not_exists() {
        let db = Database::open_in_memory().await.unwrap();
        db.init_tables(false).await.unwrap();

        let result = db.init_tables(false).await;
        assert!(matches!(result, Err(AppError::TableExists { table }) if table == "schedule"));
        assert!(db.init_tables(true).await.is_ok());
    }

    #[tokio::test]
    async fn test_init_refuses_partially_initialized_database() {
        let db = Database::open_in_memory().await.unwrap();
        sqlx::query(&scores_ddl(false))
            .execute(&db.pool)
            .await
            .unwrap();

        let result = db.init_tables(false).await;
        assert!(matches!(result, Err(AppError::TableExists { table }) if table == "scores"));
        assert_eq!(db.existing_tables().await.unwrap(), vec!["scores"]);
    }
}
