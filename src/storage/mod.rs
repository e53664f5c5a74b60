//! Relational store for the ingested seasons, teams, schedule and scores.
//!
//! Backed by a single SQLite file through `sqlx`. Foreign keys are enforced,
//! and every insert ignores rows whose key is already present so that
//! re-running ingestion never duplicates data.

use crate::error::AppError;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;
use tracing::info;

pub mod reads;
pub mod rows;
pub mod schema;
pub mod writes;

pub use rows::{
    ScheduleRow, ScoreCandidate, ScoreRow, ScoredGame, SeasonRow, SeasonTeam, TableCounts,
    TeamRow,
};

/// Handle to the database. Cloning shares the underlying pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the database file, creating it (and its directory) if needed.
    pub async fn open(path: &str) -> Result<Self, AppError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await?;
        info!("Connected to the DB at: {path}");
        Ok(Self { pool })
    }

    /// Opens a private in-memory database. The pool is pinned to a single
    /// connection that never expires, since each SQLite memory connection
    /// is its own database.
    pub async fn open_in_memory() -> Result<Self, AppError> {
        let options = SqliteConnectOptions::new()
            .in_memory(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// Closes every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
