//! Application-wide constants and configuration values
//!
//! This module centralizes magic numbers and default settings so the
//! config layer, the ingestor and the model driver agree on them.

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 16;

/// Base URL of the public MLB Stats API
pub const DEFAULT_API_DOMAIN: &str = "https://statsapi.mlb.com/api/v1";

/// Sport identifier for Major League Baseball in the Stats API
pub const MLB_SPORT_ID: u32 = 1;

/// Box scores are only pulled for seasons from this year onward
pub const DEFAULT_EARLIEST_SCORE_SEASON: i32 = 2019;

/// Default location for CSV and chart output
pub const DEFAULT_OUTPUT_DIR: &str = "_output";

/// Default directory holding the `.stan` model files
pub const DEFAULT_MODEL_DIR: &str = "stan";

/// Name used for the config directory, log directory and log file
pub const APP_NAME: &str = "mlbpred";

/// Retry policy for transient HTTP failures
pub mod retry {
    /// Number of retries after the first attempt
    pub const MAX_RETRIES: u32 = 3;

    /// Initial backoff, doubled after every retry
    pub const INITIAL_BACKOFF_MS: u64 = 250;
}

/// Sampler defaults passed to CmdStan
pub mod sampler {
    pub const SEED: u64 = 123;
    pub const WARMUP: u32 = 1000;
    pub const SAMPLES: u32 = 3000;
    pub const CHAINS: u32 = 4;
}

/// Posterior percentiles reported per team
pub mod summary {
    pub const LOWER_PERCENTILE: f64 = 5.0;
    pub const MEDIAN_PERCENTILE: f64 = 50.0;
    pub const UPPER_PERCENTILE: f64 = 95.0;
}

/// Run-margin bucket edges for the ordinal model
pub mod margin {
    /// Margins strictly beyond this many runs count as blowouts
    pub const BLOWOUT_RUNS: i64 = 4;
}

/// Game rules used to tell a finished linescore from a live one
pub mod game {
    /// Innings scheduled when the linescore omits `scheduledInnings`
    pub const REGULATION_INNINGS: u32 = 9;

    pub const OUTS_PER_HALF_INNING: u32 = 3;
}
