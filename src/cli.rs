use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand, ValueEnum};
use mlbpred::model::ModelVariant;

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// MLB team rankings from paired comparisons models
///
/// Ingests seasons, teams, schedules and box scores from the MLB Stats API
/// into a local SQLite database, then fits Bradley-Terry style models with
/// CmdStan and writes posterior rank estimates as CSV and SVG.
///
/// Typical first run:
///   mlbpred init
///   mlbpred ingest
///   mlbpred fit --season 2024 --model all
#[derive(Parser, Debug)]
#[command(version, about, long_about)]
#[command(styles = get_styles())]
pub struct Args {
    /// Database file to use instead of the configured one.
    #[arg(long = "db", global = true, value_name = "PATH")]
    pub database: Option<String>,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", global = true, help_heading = "Logging")]
    pub log_file: Option<String>,

    /// Log debug messages, including every HTTP request.
    #[arg(long = "debug", global = true, help_heading = "Logging")]
    pub debug: bool,

    /// Write logs to the log file only.
    #[arg(long = "quiet", short = 'q', global = true, help_heading = "Logging")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the seasons, teams, schedule and scores tables.
    Init {
        /// Leave existing tables alone instead of failing.
        #[arg(long)]
        if_not_exists: bool,
    },

    /// Pull new data from the Stats API into the database.
    Ingest {
        /// Refetch teams and schedules for every stored season.
        #[arg(long)]
        full: bool,

        /// Stop after the schedule step.
        #[arg(long)]
        skip_scores: bool,

        /// Only work on these seasons (teams, schedule and scores).
        #[arg(long, num_args = 1.., value_name = "YEAR")]
        seasons: Option<Vec<String>>,
    },

    /// Fit one or more models to one or more seasons.
    Fit {
        /// Season to fit. Repeat or list several to fit each one.
        #[arg(long, required = true, num_args = 1.., value_name = "YEAR")]
        season: Vec<i32>,

        /// Models to fit.
        #[arg(long, value_enum, num_args = 1.., default_value = "all")]
        model: Vec<ModelArg>,

        /// Directory for the estimate CSVs and charts.
        #[arg(long, value_name = "DIR")]
        output_dir: Option<String>,
    },

    /// Show or change persistent settings.
    Config {
        /// List current configuration settings
        #[arg(long, short = 'l')]
        list: bool,

        /// Update API domain in config.
        #[arg(long, value_name = "API_DOMAIN")]
        set_api_domain: Option<String>,

        /// Update the database path in config.
        #[arg(long, value_name = "PATH")]
        set_database: Option<String>,

        /// Update the CmdStan installation directory in config.
        #[arg(long, value_name = "DIR")]
        set_cmdstan: Option<String>,

        /// Update log file path in config. This sets a persistent custom log file location.
        #[arg(long, value_name = "PATH")]
        set_log_file: Option<String>,

        /// Clear the custom log file path from config. This reverts to using the default log location.
        #[arg(long)]
        clear_log_file: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelArg {
    Btl,
    Home,
    Mag,
    All,
}

/// Expands the requested models, keeping first-seen order and dropping
/// repeats.
pub fn model_variants(args: &[ModelArg]) -> Vec<ModelVariant> {
    let mut variants = Vec::new();
    for arg in args {
        let expanded: &[ModelVariant] = match arg {
            ModelArg::Btl => &[ModelVariant::Btl],
            ModelArg::Home => &[ModelVariant::Home],
            ModelArg::Mag => &[ModelVariant::Mag],
            ModelArg::All => &ModelVariant::ALL,
        };
        for variant in expanded {
            if !variants.contains(variant) {
                variants.push(*variant);
            }
        }
    }
    variants
}

/// Whether the command only touches the config file, where stdout logging
/// would clutter the output.
pub fn is_config_command(args: &Args) -> bool {
    matches!(args.command, Command::Config { .. })
}
