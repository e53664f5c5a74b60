//! The fit pipeline: project a season's games, sample, summarize, report.

use std::path::PathBuf;
use tracing::{error, info, instrument};

use super::data::{TeamIndex, build_stan_data, write_stan_json};
use super::draws::read_draws;
use super::engine::{SampleRequest, SamplingEngine};
use super::summary::summarize;
use super::variant::ModelVariant;
use crate::config::{Config, SamplerConfig};
use crate::error::AppError;
use crate::report::{ReportPaths, TeamRank, team_ranks, write_chart, write_estimates};
use crate::storage::Database;

/// Locations and sampler settings shared by every fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FitSettings {
    pub model_dir: PathBuf,
    pub output_dir: PathBuf,
    pub sampler: SamplerConfig,
}

impl FitSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            model_dir: PathBuf::from(&config.model_dir),
            output_dir: PathBuf::from(&config.output_dir),
            sampler: config.sampler.clone(),
        }
    }

    /// Engine input and chain files live below the output directory.
    pub fn work_dir(&self) -> PathBuf {
        self.output_dir.join("fits")
    }
}

/// Result of one successful fit.
#[derive(Debug, Clone)]
pub struct FitOutcome {
    pub season: i32,
    pub variant: ModelVariant,
    pub games: usize,
    pub ranks: Vec<TeamRank>,
    pub paths: ReportPaths,
}

pub struct ModelDriver<'a, E> {
    db: &'a Database,
    engine: &'a E,
    settings: FitSettings,
}

impl<'a, E: SamplingEngine> ModelDriver<'a, E> {
    pub fn new(db: &'a Database, engine: &'a E, settings: FitSettings) -> Self {
        Self {
            db,
            engine,
            settings,
        }
    }

    /// Fits one model to one season and writes its CSV and chart.
    #[instrument(skip(self))]
    pub async fn run(&self, season: i32, variant: ModelVariant) -> Result<FitOutcome, AppError> {
        info!("Model fitting beginning");
        if !self.db.season_exists(season).await? {
            return Err(AppError::SeasonNotFound { season });
        }

        let index = TeamIndex::new(self.db.season_teams(season).await?);
        let games = self.db.season_games(season).await?;
        let data = build_stan_data(season, &games, &index, variant)?;

        let work_dir = self.settings.work_dir();
        tokio::fs::create_dir_all(&work_dir).await?;
        let prefix = format!("{season}_{variant}");
        let data_file = work_dir.join(format!("{prefix}.json"));
        write_stan_json(&data_file, &data).await?;
        info!("Prepared {} games between {} teams", data.n, data.j);

        let request = SampleRequest {
            stan_file: self.settings.model_dir.join(variant.stan_file()),
            data_file,
            output_dir: work_dir,
            output_prefix: prefix,
            sampler: self.settings.sampler.clone(),
        };
        let chain_files = self.engine.sample(&request).await?;
        info!("Sampled {} chains", chain_files.len());

        let draws = read_draws(&chain_files, index.len()).await?;
        let ranks = team_ranks(&summarize(&draws), &index);
        info!("Summarized {} draws per team", draws.len());

        let paths = ReportPaths::new(&self.settings.output_dir, season, variant);
        write_estimates(&paths.estimates, &ranks).await?;
        write_chart(&paths.chart, &format!("{season} {variant}"), &ranks).await?;
        info!("Model fitting complete");

        Ok(FitOutcome {
            season,
            variant,
            games: data.n,
            ranks,
            paths,
        })
    }

    /// Fits every season and model combination. A failed combination is
    /// logged and does not stop the others.
    pub async fn run_batch(
        &self,
        seasons: &[i32],
        variants: &[ModelVariant],
    ) -> Vec<(i32, ModelVariant, Result<FitOutcome, AppError>)> {
        let mut results = Vec::with_capacity(seasons.len() * variants.len());
        for &season in seasons {
            for &variant in variants {
                let result = self.run(season, variant).await;
                if let Err(e) = &result {
                    error!("Fit of {variant} for {season} failed: {e}");
                }
                results.push((season, variant, result));
            }
        }
        results
    }
}
