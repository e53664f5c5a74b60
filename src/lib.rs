//! MLB team rankings from paired comparisons models.
//!
//! This library ingests seasons, teams, schedules and box scores from the
//! MLB Stats API into SQLite, projects a season's games into the input of a
//! Bradley-Terry family model, runs CmdStan, and writes posterior rank
//! summaries as CSV and SVG.
//!
//! # Examples
//!
//! ```rust,no_run
//! use mlbpred::config::Config;
//! use mlbpred::data_fetcher::MlbClient;
//! use mlbpred::error::AppError;
//! use mlbpred::ingest::{IngestOptions, Ingestor};
//! use mlbpred::model::{CmdStan, FitSettings, ModelDriver, ModelVariant};
//! use mlbpred::storage::Database;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let db = Database::open(&config.database_path).await?;
//!     db.init_tables(true).await?;
//!
//!     // Pull everything new from the Stats API
//!     let ingestor = Ingestor::new(MlbClient::new(&config)?, db.clone(), 2019);
//!     let today = chrono::Local::now().date_naive();
//!     ingestor.run(&IngestOptions::new(today)).await?;
//!
//!     // Fit the home advantage model to one season
//!     let engine = CmdStan::from_config(&config)?;
//!     let driver = ModelDriver::new(&db, &engine, FitSettings::from_config(&config));
//!     let outcome = driver.run(2024, ModelVariant::Home).await?;
//!     println!("Estimates written to {}", outcome.paths.estimates.display());
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod ingest;
pub mod model;
pub mod report;
pub mod storage;

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::AppError;
pub use ingest::{IngestOptions, IngestReport, Ingestor};
pub use model::{ModelDriver, ModelVariant};
pub use storage::Database;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
