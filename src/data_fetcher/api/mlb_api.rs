//! Typed access to the four Stats API endpoints the ingestor uses.

use reqwest::Client;
use tracing::instrument;

use super::fetch_utils::fetch;
use super::http_client::create_http_client_with_timeout;
use super::urls::{build_linescore_url, build_schedule_url, build_seasons_url, build_teams_url};
use crate::config::Config;
use crate::data_fetcher::models::{
    LinescoreResponse, ScheduleResponse, SeasonsResponse, TeamsResponse,
};
use crate::error::AppError;

/// Stats API client bound to one API domain. Cloning shares the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub struct MlbClient {
    client: Client,
    api_domain: String,
}

impl MlbClient {
    /// Builds a client from the configured domain and timeout.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
        Ok(Self::with_client(client, &config.api_domain))
    }

    pub fn with_client(client: Client, api_domain: &str) -> Self {
        Self {
            client,
            api_domain: api_domain.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_domain(&self) -> &str {
        &self.api_domain
    }

    #[instrument(skip(self))]
    pub async fn fetch_seasons(&self) -> Result<SeasonsResponse, AppError> {
        fetch(&self.client, &build_seasons_url(&self.api_domain)).await
    }

    #[instrument(skip(self))]
    pub async fn fetch_teams(&self, season: &str) -> Result<TeamsResponse, AppError> {
        fetch(&self.client, &build_teams_url(&self.api_domain, season)).await
    }

    #[instrument(skip(self))]
    pub async fn fetch_schedule(&self, season: &str) -> Result<ScheduleResponse, AppError> {
        fetch(&self.client, &build_schedule_url(&self.api_domain, season)).await
    }

    #[instrument(skip(self))]
    pub async fn fetch_linescore(&self, game_id: &str) -> Result<LinescoreResponse, AppError> {
        fetch(&self.client, &build_linescore_url(&self.api_domain, game_id)).await
    }
}
