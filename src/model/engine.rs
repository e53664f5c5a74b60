//! External sampling engine. CmdStan compiles each `.stan` file into an
//! executable and runs one process per chain.

use futures::future::join_all;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::SystemTime;
use tokio::process::Command;
use tracing::{debug, info, instrument};

use crate::config::{Config, SamplerConfig};
use crate::error::AppError;

/// Everything an engine needs to draw posterior samples for one fit.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRequest {
    pub stan_file: PathBuf,
    pub data_file: PathBuf,
    /// Directory receiving one CSV per chain.
    pub output_dir: PathBuf,
    /// Chain files are named `{output_prefix}-{chain}.csv`.
    pub output_prefix: String,
    pub sampler: SamplerConfig,
}

impl SampleRequest {
    pub fn chain_output(&self, chain: u32) -> PathBuf {
        self.output_dir
            .join(format!("{}-{}.csv", self.output_prefix, chain))
    }
}

/// A sampler that turns a model and its data into per-chain draw files.
pub trait SamplingEngine {
    /// Runs every chain and returns the paths of the chain CSV files.
    fn sample(
        &self,
        request: &SampleRequest,
    ) -> impl Future<Output = Result<Vec<PathBuf>, AppError>> + Send;
}

/// CmdStan installation used through its command line interface.
#[derive(Debug, Clone)]
pub struct CmdStan {
    home: PathBuf,
}

impl CmdStan {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        config
            .cmdstan_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(Self::new)
            .ok_or(AppError::CmdStanNotConfigured)
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Compiles the model unless an executable newer than the `.stan` file
    /// already exists. Returns the executable path.
    #[instrument(skip(self))]
    pub async fn compile(&self, stan_file: &Path) -> Result<PathBuf, AppError> {
        if !tokio::fs::metadata(stan_file).await.is_ok_and(|m| m.is_file()) {
            return Err(AppError::stan_file_not_found(stan_file.display().to_string()));
        }
        let stan_file = std::path::absolute(stan_file)?;
        let exe = executable_path(&stan_file);

        if is_up_to_date(&exe, &stan_file).await {
            debug!("Executable {} is up to date", exe.display());
            return Ok(exe);
        }

        info!("Compiling {}", stan_file.display());
        let output = Command::new("make")
            .arg(&exe)
            .current_dir(&self.home)
            .output()
            .await?;
        check_status("compile", &output)?;
        Ok(exe)
    }

    async fn run_chain(
        &self,
        exe: &Path,
        request: &SampleRequest,
        chain: u32,
    ) -> Result<PathBuf, AppError> {
        let output_file = request.chain_output(chain);
        let args = chain_args(request, chain, &output_file);
        debug!("Chain {chain}: {} {}", exe.display(), args.join(" "));

        let output = Command::new(exe).args(&args).output().await?;
        check_status(&format!("sampling chain {chain}"), &output)?;
        info!("Chain {chain} finished");
        Ok(output_file)
    }
}

impl SamplingEngine for CmdStan {
    #[instrument(skip(self, request), fields(stan_file = %request.stan_file.display()))]
    async fn sample(&self, request: &SampleRequest) -> Result<Vec<PathBuf>, AppError> {
        let exe = self.compile(&request.stan_file).await?;
        tokio::fs::create_dir_all(&request.output_dir).await?;

        let chains = (1..=request.sampler.chains).map(|chain| self.run_chain(&exe, request, chain));
        join_all(chains).await.into_iter().collect()
    }
}

/// CmdStan builds the executable next to the model, without the extension.
fn executable_path(stan_file: &Path) -> PathBuf {
    let exe = stan_file.with_extension("");
    if cfg!(windows) {
        exe.with_extension("exe")
    } else {
        exe
    }
}

async fn modified(path: &Path) -> Option<SystemTime> {
    tokio::fs::metadata(path).await.and_then(|m| m.modified()).ok()
}

async fn is_up_to_date(exe: &Path, stan_file: &Path) -> bool {
    match (modified(exe).await, modified(stan_file).await) {
        (Some(built), Some(source)) => built >= source,
        _ => false,
    }
}

fn chain_args(request: &SampleRequest, chain: u32, output_file: &Path) -> Vec<String> {
    vec![
        format!("id={chain}"),
        "random".to_string(),
        format!("seed={}", request.sampler.seed),
        "data".to_string(),
        format!("file={}", request.data_file.display()),
        "output".to_string(),
        format!("file={}", output_file.display()),
        "method=sample".to_string(),
        format!("num_samples={}", request.sampler.samples),
        format!("num_warmup={}", request.sampler.warmup),
    ]
}

fn check_status(stage: &str, output: &Output) -> Result<(), AppError> {
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = if stderr.trim().is_empty() {
        String::from_utf8_lossy(&output.stdout).into_owned()
    } else {
        stderr.into_owned()
    };
    Err(AppError::model_engine(
        stage,
        output.status.to_string(),
        stderr.trim(),
    ))
}
