//! Paired comparisons model driver.
//!
//! Projects the stored games of a season into the engine's input, hands it
//! to a [`SamplingEngine`], and reduces the rank draws to per-team
//! percentiles.

pub mod data;
pub mod draws;
pub mod engine;
pub mod pipeline;
pub mod summary;
pub mod variant;

pub use data::{StanData, TeamIndex, build_stan_data, margin_category, write_stan_json};
pub use draws::{RankDraws, read_draws};
pub use engine::{CmdStan, SampleRequest, SamplingEngine};
pub use pipeline::{FitOutcome, FitSettings, ModelDriver};
pub use summary::{RankSummary, percentile, summarize};
pub use variant::ModelVariant;
