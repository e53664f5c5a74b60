// src/main.rs
mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Args, Command, model_variants};
use commands::ConfigUpdate;
use mlbpred::config::Config;
use mlbpred::error::AppError;

/// Loads the config and applies the `--db` override.
async fn load_config(database: Option<String>) -> Result<Config, AppError> {
    let mut config = Config::load().await?;
    if let Some(database) = database {
        config.database_path = database;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    let (log_file_path, _guard) = logging::setup_logging(&args).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    match args.command {
        Command::Init { if_not_exists } => {
            let config = load_config(args.database).await?;
            commands::handle_init_command(&config, if_not_exists).await
        }
        Command::Ingest {
            full,
            skip_scores,
            seasons,
        } => {
            let config = load_config(args.database).await?;
            commands::handle_ingest_command(&config, full, skip_scores, seasons).await
        }
        Command::Fit {
            season,
            model,
            output_dir,
        } => {
            let config = load_config(args.database).await?;
            commands::handle_fit_command(&config, &season, &model_variants(&model), output_dir)
                .await
        }
        // Config edits work on the stored file and never need a database.
        Command::Config {
            list,
            set_api_domain,
            set_database,
            set_cmdstan,
            set_log_file,
            clear_log_file,
        } => {
            let update = ConfigUpdate {
                api_domain: set_api_domain,
                database: set_database,
                cmdstan: set_cmdstan,
                log_file: set_log_file,
                clear_log_file,
            };
            // A bare `config` lists the settings.
            let show = list || update.is_empty();
            if !update.is_empty() {
                commands::handle_config_update_command(update).await?;
            }
            if show {
                commands::handle_list_config_command().await?;
            }
            Ok(())
        }
    }
}
