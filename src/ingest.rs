//! HTTP ingestion of seasons, teams, schedules and box scores.
//!
//! Each step fetches one entity per HTTP call, flattens it into table rows
//! and inserts the rows with insert-or-ignore semantics. Steps run in
//! dependency order: seasons, teams, schedule, scores.

use chrono::NaiveDate;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info, instrument, warn};

use crate::data_fetcher::MlbClient;
use crate::data_fetcher::processors::{schedule_rows, score_row, season_rows, team_rows};
use crate::error::AppError;
use crate::storage::Database;

/// What a single ingest run should cover.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Refetch teams and schedules for every stored season.
    pub full: bool,
    /// Stop after the schedule step.
    pub skip_scores: bool,
    /// Restrict teams, schedule and score work to these seasons.
    pub seasons: Option<Vec<String>>,
    /// Games dated after this day are not considered for box scores.
    pub today: NaiveDate,
}

impl IngestOptions {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            full: false,
            skip_scores: false,
            seasons: None,
            today,
        }
    }
}

/// Counts gathered during one ingest run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub seasons_added: u64,
    pub teams_added: u64,
    pub schedule_added: u64,
    pub scores_added: u64,
    /// Seasons whose teams and schedule were fetched this run.
    pub seasons_refreshed: Vec<String>,
    /// Candidate games whose linescore had no final runs yet.
    pub scores_pending: u64,
    /// Candidate games whose linescore request failed.
    pub scores_failed: u64,
}

impl fmt::Display for IngestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "seasons +{}, teams +{}, schedule +{}, scores +{} ({} pending, {} failed)",
            self.seasons_added,
            self.teams_added,
            self.schedule_added,
            self.scores_added,
            self.scores_pending,
            self.scores_failed
        )
    }
}

/// Picks the seasons whose teams and schedule should be fetched.
///
/// Without `full`, a season is picked when it has no stored rows yet, and
/// the most recent stored season is always picked since its schedule and
/// records keep changing. `only` narrows the result to the named seasons.
pub fn seasons_to_refresh(
    stored: &[String],
    populated: &HashSet<String>,
    full: bool,
    only: Option<&[String]>,
) -> Vec<String> {
    let latest = stored.last();
    stored
        .iter()
        .filter(|season| only.is_none_or(|wanted| wanted.contains(season)))
        .filter(|season| full || !populated.contains(*season) || Some(*season) == latest)
        .cloned()
        .collect()
}

/// Drives the ingest steps against one API client and one database.
pub struct Ingestor {
    api: MlbClient,
    db: Database,
    earliest_score_season: i32,
}

impl Ingestor {
    pub fn new(api: MlbClient, db: Database, earliest_score_season: i32) -> Self {
        Self {
            api,
            db,
            earliest_score_season,
        }
    }

    /// Runs every step in order and returns the combined counts.
    #[instrument(skip(self, options), fields(full = options.full))]
    pub async fn run(&self, options: &IngestOptions) -> Result<IngestReport, AppError> {
        let mut report = IngestReport {
            seasons_added: self.ingest_seasons().await?,
            ..IngestReport::default()
        };

        let stored = self.db.list_seasons().await?;
        if let Some(wanted) = &options.seasons {
            for season in wanted.iter().filter(|s| !stored.contains(s)) {
                warn!("Season {season} is not listed by the API, skipping it");
            }
        }
        let only = options.seasons.as_deref();

        let team_seasons = seasons_to_refresh(
            &stored,
            &self.db.seasons_with_teams().await?,
            options.full,
            only,
        );
        for season in &team_seasons {
            report.teams_added += self.ingest_teams(season).await?;
        }

        let schedule_seasons = seasons_to_refresh(
            &stored,
            &self.db.seasons_with_schedule().await?,
            options.full,
            only,
        );
        for season in &schedule_seasons {
            report.schedule_added += self.ingest_schedule(season).await?;
        }

        let mut refreshed: Vec<String> = team_seasons;
        for season in schedule_seasons {
            if !refreshed.contains(&season) {
                refreshed.push(season);
            }
        }
        report.seasons_refreshed = refreshed;

        if options.skip_scores {
            info!("Skipping box scores");
        } else {
            self.ingest_scores(options.today, only, &mut report).await?;
        }

        info!("Ingest complete: {report}");
        Ok(report)
    }

    /// Fetches the full season list and stores unseen seasons.
    pub async fn ingest_seasons(&self) -> Result<u64, AppError> {
        let response = self.api.fetch_seasons().await?;
        let rows = season_rows(response);
        let added = self.db.insert_seasons(&rows).await?;
        info!("Seasons: {} listed, {} new", rows.len(), added);
        Ok(added)
    }

    pub async fn ingest_teams(&self, season: &str) -> Result<u64, AppError> {
        let response = self.api.fetch_teams(season).await?;
        let rows = team_rows(response, season);
        let added = self.db.insert_teams(&rows).await?;
        info!("Teams {season}: {} listed, {} new", rows.len(), added);
        Ok(added)
    }

    pub async fn ingest_schedule(&self, season: &str) -> Result<u64, AppError> {
        let response = self.api.fetch_schedule(season).await?;
        let rows = schedule_rows(response, season);
        if rows.is_empty() {
            debug!("No games listed for season {season}");
            return Ok(0);
        }
        let added = self.db.insert_schedule(&rows).await?;
        info!("Schedule {season}: {} listed, {} new", rows.len(), added);
        Ok(added)
    }

    /// Fetches linescores for played regular season games that have no
    /// stored box score. A failed request skips that game only.
    async fn ingest_scores(
        &self,
        today: NaiveDate,
        only: Option<&[String]>,
        report: &mut IngestReport,
    ) -> Result<(), AppError> {
        let stored = self.db.stored_score_ids().await?;
        let missing: Vec<_> = self
            .db
            .score_candidates(today, self.earliest_score_season)
            .await?
            .into_iter()
            .filter(|c| only.is_none_or(|wanted| wanted.contains(&c.season_id)))
            .filter(|c| !stored.contains(&c.game_id))
            .collect();
        info!("Box scores: {} games to fetch", missing.len());

        for candidate in missing {
            let linescore = match self.api.fetch_linescore(&candidate.game_id).await {
                Ok(linescore) => linescore,
                Err(e) if e.is_not_found() => {
                    debug!("No linescore for game {}: {e}", candidate.game_id);
                    report.scores_failed += 1;
                    continue;
                }
                Err(e) if e.is_retryable() => {
                    warn!(
                        "Linescore for game {} ({}) still unavailable after retries: {e}",
                        candidate.game_id, candidate.game_date
                    );
                    report.scores_failed += 1;
                    continue;
                }
                Err(e) => {
                    warn!(
                        "Failed to fetch linescore for game {} ({}): {e}",
                        candidate.game_id, candidate.game_date
                    );
                    report.scores_failed += 1;
                    continue;
                }
            };

            match score_row(&candidate.game_id, &linescore) {
                Some(row) => {
                    if self.db.insert_score(&row).await? {
                        report.scores_added += 1;
                    }
                }
                None => {
                    debug!(
                        "Game {} on {} has no final runs yet",
                        candidate.game_id, candidate.game_date
                    );
                    report.scores_pending += 1;
                }
            }
        }
        Ok(())
    }
}
