use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Response of `GET /seasons?all=true&sportId=1`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SeasonsResponse {
    #[serde(default)]
    pub seasons: Vec<ApiSeason>,
}

/// One season entry. Early seasons omit most of the calendar dates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSeason {
    #[serde(rename = "seasonId")]
    pub season_id: String,
    #[serde(rename = "hasWildcard", default)]
    pub has_wildcard: bool,
    #[serde(rename = "preSeasonStartDate", default)]
    pub pre_season_start_date: Option<NaiveDate>,
    #[serde(rename = "seasonStartDate", default)]
    pub season_start_date: Option<NaiveDate>,
    #[serde(rename = "regularSeasonStartDate", default)]
    pub regular_season_start_date: Option<NaiveDate>,
    #[serde(rename = "regularSeasonEndDate", default)]
    pub regular_season_end_date: Option<NaiveDate>,
    #[serde(rename = "seasonEndDate", default)]
    pub season_end_date: Option<NaiveDate>,
    #[serde(rename = "offseasonStartDate", default)]
    pub offseason_start_date: Option<NaiveDate>,
    // The API spells this one with a capital S.
    #[serde(rename = "offSeasonEndDate", default)]
    pub off_season_end_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_season() {
        let json = r#"{
            "seasons": [{
                "seasonId": "2024",
                "hasWildcard": true,
                "preSeasonStartDate": "2024-01-01",
                "seasonStartDate": "2024-02-22",
                "regularSeasonStartDate": "2024-03-20",
                "regularSeasonEndDate": "2024-09-30",
                "seasonEndDate": "2024-10-30",
                "offseasonStartDate": "2024-10-31",
                "offSeasonEndDate": "2024-12-31",
                "gameLevelGamedayType": "P"
            }]
        }"#;
        let response: SeasonsResponse = serde_json::from_str(json).unwrap();
        let season = &response.seasons[0];
        assert_eq!(season.season_id, "2024");
        assert!(season.has_wildcard);
        assert_eq!(
            season.regular_season_start_date,
            NaiveDate::from_ymd_opt(2024, 3, 20)
        );
        assert_eq!(
            season.off_season_end_date,
            NaiveDate::from_ymd_opt(2024, 12, 31)
        );
    }

    #[test]
    fn test_deserialize_sparse_historical_season() {
        let json = r#"{"seasons": [{"seasonId": "1876", "regularSeasonStartDate": "1876-04-22"}]}"#;
        let response: SeasonsResponse = serde_json::from_str(json).unwrap();
        let season = &response.seasons[0];
        assert!(!season.has_wildcard);
        assert_eq!(season.pre_season_start_date, None);
        assert_eq!(season.regular_season_end_date, None);
    }
}
