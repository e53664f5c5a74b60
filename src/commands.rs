use chrono::Local;
use mlbpred::config::Config;
use mlbpred::data_fetcher::MlbClient;
use mlbpred::error::AppError;
use mlbpred::ingest::{IngestOptions, Ingestor};
use mlbpred::model::{CmdStan, FitSettings, ModelDriver, ModelVariant};
use mlbpred::storage::Database;
use std::path::Path;
use tracing::{info, warn};

/// Handles `init`: creates the four tables.
pub async fn handle_init_command(config: &Config, if_not_exists: bool) -> Result<(), AppError> {
    let db = Database::open(&config.database_path).await?;
    let result = db.init_tables(if_not_exists).await;
    db.close().await;
    result?;
    println!("Tables ready in {}", config.database_path);
    Ok(())
}

/// Handles `ingest`: pulls new seasons, teams, schedules and box scores.
pub async fn handle_ingest_command(
    config: &Config,
    full: bool,
    skip_scores: bool,
    seasons: Option<Vec<String>>,
) -> Result<(), AppError> {
    let db = Database::open(&config.database_path).await?;
    let api = MlbClient::new(config)?;
    let ingestor = Ingestor::new(api, db.clone(), config.earliest_score_season);

    let options = IngestOptions {
        full,
        skip_scores,
        seasons,
        ..IngestOptions::new(Local::now().date_naive())
    };
    let report = ingestor.run(&options).await;
    db.close().await;
    let report = report?;

    println!("Ingest finished: {report}");
    if report.scores_failed > 0 {
        warn!(
            "{} box scores could not be fetched and will be retried next run",
            report.scores_failed
        );
    }
    Ok(())
}

/// Handles `fit`: runs every requested season and model combination.
pub async fn handle_fit_command(
    config: &Config,
    seasons: &[i32],
    variants: &[ModelVariant],
    output_dir: Option<String>,
) -> Result<(), AppError> {
    let engine = CmdStan::from_config(config)?;
    let mut settings = FitSettings::from_config(config);
    if let Some(dir) = output_dir {
        settings.output_dir = dir.into();
    }

    let db = Database::open(&config.database_path).await?;
    let driver = ModelDriver::new(&db, &engine, settings);
    let results = driver.run_batch(seasons, variants).await;
    db.close().await;

    let mut failed = 0;
    for (season, variant, result) in &results {
        match result {
            Ok(outcome) => println!(
                "{season} {variant}: {} games -> {}, {}",
                outcome.games,
                outcome.paths.estimates.display(),
                outcome.paths.chart.display()
            ),
            Err(e) => {
                failed += 1;
                println!("{season} {variant}: failed: {e}");
            }
        }
    }

    // Report the first failure once every combination has had its turn.
    match results.into_iter().find_map(|(_, _, r)| r.err()) {
        Some(e) => {
            warn!("{failed} of {} fits failed", seasons.len() * variants.len());
            Err(e)
        }
        None => {
            info!("All fits complete");
            Ok(())
        }
    }
}

/// Handles `config --list`.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    Config::display().await
}

/// Settings changes requested on the command line.
#[derive(Debug, Default)]
pub struct ConfigUpdate {
    pub api_domain: Option<String>,
    pub database: Option<String>,
    pub cmdstan: Option<String>,
    pub log_file: Option<String>,
    pub clear_log_file: bool,
}

impl ConfigUpdate {
    pub fn is_empty(&self) -> bool {
        self.api_domain.is_none()
            && self.database.is_none()
            && self.cmdstan.is_none()
            && self.log_file.is_none()
            && !self.clear_log_file
    }

    fn apply(self, config: &mut Config) {
        if let Some(new_domain) = self.api_domain {
            config.api_domain = new_domain;
        }
        if let Some(database) = self.database {
            config.database_path = database;
        }
        if let Some(cmdstan) = self.cmdstan {
            config.cmdstan_path = Some(cmdstan);
        }
        if let Some(new_log_path) = self.log_file {
            config.log_file_path = Some(new_log_path);
        } else if self.clear_log_file {
            config.log_file_path = None;
            println!("Custom log file path cleared. Using default location.");
        }
    }
}

/// Handles config updates. Edits the stored file, so environment
/// overrides never leak into it.
pub async fn handle_config_update_command(update: ConfigUpdate) -> Result<(), AppError> {
    let path = Config::get_config_path();
    let mut config = if Path::new(&path).exists() {
        Config::load_from_path(&path).await?
    } else {
        Config::default()
    };

    update.apply(&mut config);
    config.validate()?;
    config.save().await?;
    println!("Config updated successfully!");
    Ok(())
}
