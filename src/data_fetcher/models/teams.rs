use serde::{Deserialize, Serialize};

/// Response of `GET /teams?sportId=1&season={season}`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TeamsResponse {
    #[serde(default)]
    pub teams: Vec<ApiTeam>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiTeam {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub abbreviation: Option<String>,
    #[serde(default)]
    pub season: Option<i32>,
}
