//! URL building utilities for Stats API endpoints

use crate::constants::MLB_SPORT_ID;

/// Builds the URL listing every MLB season.
///
/// # Example
/// ```
/// use mlbpred::data_fetcher::api::build_seasons_url;
///
/// let url = build_seasons_url("https://statsapi.mlb.com/api/v1");
/// assert_eq!(url, "https://statsapi.mlb.com/api/v1/seasons?all=true&sportId=1");
/// ```
pub fn build_seasons_url(api_domain: &str) -> String {
    format!("{api_domain}/seasons?all=true&sportId={MLB_SPORT_ID}")
}

/// Builds the URL listing the teams active in a season.
///
/// # Example
/// ```
/// use mlbpred::data_fetcher::api::build_teams_url;
///
/// let url = build_teams_url("https://statsapi.mlb.com/api/v1", "2024");
/// assert_eq!(url, "https://statsapi.mlb.com/api/v1/teams?sportId=1&season=2024");
/// ```
pub fn build_teams_url(api_domain: &str, season: &str) -> String {
    format!("{api_domain}/teams?sportId={MLB_SPORT_ID}&season={season}")
}

/// Builds the URL for a full season schedule.
///
/// # Example
/// ```
/// use mlbpred::data_fetcher::api::build_schedule_url;
///
/// let url = build_schedule_url("https://statsapi.mlb.com/api/v1", "2024");
/// assert_eq!(url, "https://statsapi.mlb.com/api/v1/schedule?sportId=1&season=2024");
/// ```
pub fn build_schedule_url(api_domain: &str, season: &str) -> String {
    format!("{api_domain}/schedule?sportId={MLB_SPORT_ID}&season={season}")
}

/// Builds the linescore (box score totals) URL for one game.
///
/// # Example
/// ```
/// use mlbpred::data_fetcher::api::build_linescore_url;
///
/// let url = build_linescore_url("https://statsapi.mlb.com/api/v1", "745444");
/// assert_eq!(url, "https://statsapi.mlb.com/api/v1/game/745444/linescore");
/// ```
pub fn build_linescore_url(api_domain: &str, game_id: &str) -> String {
    format!("{api_domain}/game/{game_id}/linescore")
}
