use crate::constants;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_default_database_path, get_log_dir_path};
use validation::validate_config;

/// Settings forwarded to the CmdStan sampler.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SamplerConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_warmup")]
    pub warmup: u32,
    #[serde(default = "default_samples")]
    pub samples: u32,
    #[serde(default = "default_chains")]
    pub chains: u32,
}

fn default_seed() -> u64 {
    constants::sampler::SEED
}

fn default_warmup() -> u32 {
    constants::sampler::WARMUP
}

fn default_samples() -> u32 {
    constants::sampler::SAMPLES
}

fn default_chains() -> u32 {
    constants::sampler::CHAINS
}

impl Default for SamplerConfig {
    fn default() -> Self {
        SamplerConfig {
            seed: default_seed(),
            warmup: default_warmup(),
            samples: default_samples(),
            chains: default_chains(),
        }
    }
}

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the Stats API, including the version segment.
    #[serde(default = "default_api_domain")]
    pub api_domain: String,
    /// SQLite database file holding the ingested tables.
    #[serde(default = "get_default_database_path")]
    pub database_path: String,
    /// Directory receiving estimate CSVs and charts.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Directory holding `bt.stan`, `bt_home.stan` and `bt_mag.stan`.
    #[serde(default = "default_model_dir")]
    pub model_dir: String,
    /// CmdStan installation directory. Falls back to the `CMDSTAN` variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmdstan_path: Option<String>,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for API requests. Defaults to 30 seconds if not specified.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// First season for which box scores are ingested.
    #[serde(default = "default_earliest_score_season")]
    pub earliest_score_season: i32,
    #[serde(default)]
    pub sampler: SamplerConfig,
}

fn default_api_domain() -> String {
    constants::DEFAULT_API_DOMAIN.to_string()
}

fn default_output_dir() -> String {
    constants::DEFAULT_OUTPUT_DIR.to_string()
}

fn default_model_dir() -> String {
    constants::DEFAULT_MODEL_DIR.to_string()
}

/// Default HTTP timeout in seconds
fn default_http_timeout() -> u64 {
    constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

fn default_earliest_score_season() -> i32 {
    constants::DEFAULT_EARLIEST_SCORE_SEASON
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_domain: default_api_domain(),
            database_path: get_default_database_path(),
            output_dir: default_output_dir(),
            model_dir: default_model_dir(),
            cmdstan_path: None,
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
            earliest_score_season: default_earliest_score_season(),
            sampler: SamplerConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// A missing file yields the defaults. Environment variables
    /// override config file values.
    ///
    /// # Environment Variables
    /// - `MLBPRED_API_DOMAIN` - Override API domain
    /// - `MLBPRED_DATABASE` - Override database path
    /// - `MLBPRED_LOG_FILE` - Override log file path
    /// - `MLBPRED_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 30)
    /// - `CMDSTAN` - CmdStan installation, used when the config file sets none
    pub async fn load() -> Result<Self, AppError> {
        Self::load_with_overrides(&get_config_path()).await
    }

    /// Loads the file at `path` (or defaults when it does not exist),
    /// applies environment overrides and validates the result.
    pub async fn load_with_overrides(path: &str) -> Result<Self, AppError> {
        let mut config = if Path::new(path).exists() {
            Self::load_from_path(path).await?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(api_domain) = std::env::var("MLBPRED_API_DOMAIN") {
            self.api_domain = api_domain;
        }

        if let Ok(database_path) = std::env::var("MLBPRED_DATABASE") {
            self.database_path = database_path;
        }

        if let Ok(log_file_path) = std::env::var("MLBPRED_LOG_FILE") {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var("MLBPRED_HTTP_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }

        if self.cmdstan_path.is_none()
            && let Ok(cmdstan) = std::env::var("CMDSTAN")
        {
            self.cmdstan_path = Some(cmdstan);
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(self)
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays current configuration settings to stdout.
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();
        let config = Config::load().await?;

        if !Path::new(&config_path).exists() {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
            println!("(Showing defaults)");
        }

        println!("\nCurrent Configuration");
        println!("────────────────────────────────────");
        println!("Config Location:");
        println!("{config_path}");
        println!("────────────────────────────────────");
        println!("API Domain:");
        println!("{}", config.api_domain);
        println!("────────────────────────────────────");
        println!("Database:");
        println!("{}", config.database_path);
        println!("────────────────────────────────────");
        println!("Output / Models:");
        println!("{} / {}", config.output_dir, config.model_dir);
        println!("────────────────────────────────────");
        println!("CmdStan:");
        println!("{}", config.cmdstan_path.as_deref().unwrap_or("(not set)"));
        println!("────────────────────────────────────");
        println!("HTTP Timeout:");
        println!("{} seconds", config.http_timeout_seconds);
        println!("────────────────────────────────────");
        println!("Sampler:");
        println!(
            "seed={} warmup={} samples={} chains={}",
            config.sampler.seed,
            config.sampler.warmup,
            config.sampler.samples,
            config.sampler.chains
        );
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &config.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{log_dir}/{}.log", constants::APP_NAME);
            println!("(Default location)");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if it doesn't exist and normalizes
    /// the API domain (scheme added when missing, trailing slash removed).
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.as_os_str().is_empty() && !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let content = toml::to_string_pretty(&Config {
            api_domain: normalize_api_domain(&self.api_domain),
            ..self.clone()
        })?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path without overrides.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Adds `https://` when no scheme is present and strips trailing slashes.
pub fn normalize_api_domain(domain: &str) -> String {
    let trimmed = domain.trim().trim_end_matches('/');
    if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_config_load_existing_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();

        let config_content = r#"
api_domain = "https://statsapi.example.com/api/v1"
database_path = "/data/mlb.db"
log_file_path = "/custom/log/path"

[sampler]
seed = 7
chains = 2
"#;
        tokio::fs::write(&config_path, config_content)
            .await
            .unwrap();

        let config = Config::load_from_path(&config_path_str).await.unwrap();

        assert_eq!(config.api_domain, "https://statsapi.example.com/api/v1");
        assert_eq!(config.database_path, "/data/mlb.db");
        assert_eq!(config.log_file_path, Some("/custom/log/path".to_string()));
        assert_eq!(config.sampler.seed, 7);
        assert_eq!(config.sampler.chains, 2);
        assert_eq!(config.sampler.warmup, constants::sampler::WARMUP);
        assert_eq!(config.earliest_score_season, 2019);
    }

    #[tokio::test]
    async fn test_config_load_empty_file_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(&config_path, "").await.unwrap();

        let config = Config::load_from_path(&config_path.to_string_lossy())
            .await
            .unwrap();

        assert_eq!(config.api_domain, constants::DEFAULT_API_DOMAIN);
        assert_eq!(config.output_dir, "_output");
        assert_eq!(config.model_dir, "stan");
        assert_eq!(config.cmdstan_path, None);
        assert_eq!(config.sampler, SamplerConfig::default());
    }

    #[tokio::test]
    #[serial]
    async fn test_missing_file_yields_defaults_with_env_overrides() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("nope.toml");

        unsafe {
            std::env::set_var("MLBPRED_DATABASE", "/tmp/override.db");
            std::env::set_var("MLBPRED_HTTP_TIMEOUT", "5");
        }
        let config = Config::load_with_overrides(&missing.to_string_lossy()).await;
        unsafe {
            std::env::remove_var("MLBPRED_DATABASE");
            std::env::remove_var("MLBPRED_HTTP_TIMEOUT");
        }

        let config = config.unwrap();
        assert_eq!(config.database_path, "/tmp/override.db");
        assert_eq!(config.http_timeout_seconds, 5);
        assert_eq!(config.api_domain, constants::DEFAULT_API_DOMAIN);
    }

    #[tokio::test]
    #[serial]
    async fn test_cmdstan_env_does_not_replace_configured_path() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(&config_path, "cmdstan_path = \"/opt/cmdstan\"\n")
            .await
            .unwrap();

        unsafe {
            std::env::set_var("CMDSTAN", "/elsewhere/cmdstan");
        }
        let config = Config::load_with_overrides(&config_path.to_string_lossy()).await;
        unsafe {
            std::env::remove_var("CMDSTAN");
        }

        assert_eq!(config.unwrap().cmdstan_path.as_deref(), Some("/opt/cmdstan"));
    }

    #[tokio::test]
    async fn test_config_save_without_scheme() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();
        let config = Config {
            api_domain: "statsapi.mlb.com/api/v1/".to_string(),
            ..Config::default()
        };
        config.save_to_path(&config_path_str).await.unwrap();

        let loaded_config = Config::load_from_path(&config_path_str).await.unwrap();
        assert_eq!(loaded_config.api_domain, "https://statsapi.mlb.com/api/v1");
    }

    #[tokio::test]
    async fn test_config_save_creates_directory() {
        let temp_dir = tempdir().unwrap();
        let config_dir = temp_dir.path().join("mlbpred");
        let config_path = config_dir.join("config.toml");
        let config = Config::default();
        config
            .save_to_path(&config_path.to_string_lossy())
            .await
            .unwrap();
        assert!(config_dir.exists());
        assert!(config_path.exists());
    }

    #[tokio::test]
    async fn test_config_save_and_load_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();
        let original_config = Config {
            cmdstan_path: Some("/opt/cmdstan-2.36.0".to_string()),
            log_file_path: Some("/custom/log/path".to_string()),
            sampler: SamplerConfig {
                seed: 42,
                warmup: 500,
                samples: 500,
                chains: 1,
            },
            ..Config::default()
        };
        original_config
            .save_to_path(&config_path_str)
            .await
            .unwrap();
        let loaded_config = Config::load_from_path(&config_path_str).await.unwrap();
        assert_eq!(original_config.api_domain, loaded_config.api_domain);
        assert_eq!(original_config.cmdstan_path, loaded_config.cmdstan_path);
        assert_eq!(original_config.log_file_path, loaded_config.log_file_path);
        assert_eq!(original_config.sampler, loaded_config.sampler);
    }

    #[test]
    fn test_normalize_api_domain() {
        assert_eq!(
            normalize_api_domain("http://127.0.0.1:8080/"),
            "http://127.0.0.1:8080"
        );
        assert_eq!(
            normalize_api_domain(" statsapi.mlb.com/api/v1 "),
            "https://statsapi.mlb.com/api/v1"
        );
    }

    #[test]
    fn test_get_config_path() {
        let config_path = Config::get_config_path();
        assert!(config_path.contains("mlbpred"));
        assert!(config_path.ends_with("config.toml"));
    }
}
