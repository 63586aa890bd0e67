#![deny(clippy::expect_used)]
//! qrbench: time double-precision Householder QR against an extended-precision oracle.
//!
//! Usage:
//!   qrbench                               # 192x120 random matrix, 100 digits
//!   qrbench --rows 4 --cols 4             # fixed 4x4 test matrix
//!   qrbench --config bench.toml --json    # settings from file, JSON report

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::error;

use householder_qr::{compare_engines, BenchConfig, MatrixSource, Parallelism};

#[derive(Parser)]
#[command(
    name = "qrbench",
    version,
    about = "Compare double-precision Householder QR against an extended-precision oracle"
)]
struct Cli {
    /// TOML file with benchmark settings; flags override its values
    #[arg(short, long, env = "QRBENCH_CONFIG")]
    config: Option<PathBuf>,

    /// Number of rows
    #[arg(short, long)]
    rows: Option<usize>,

    /// Number of columns
    #[arg(short = 'n', long)]
    cols: Option<usize>,

    /// Significant decimal digits of the extended-precision engine
    #[arg(short, long)]
    precision: Option<u32>,

    /// Seed for random matrix entries
    #[arg(short, long)]
    seed: Option<u64>,

    /// Where the input matrix comes from
    #[arg(long, value_enum)]
    source: Option<SourceArg>,

    /// Run the two engines one after the other
    #[arg(long)]
    sequential: bool,

    /// Update trailing columns on the rayon pool
    #[arg(long)]
    parallel_columns: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Set log level; overrides RUST_LOG when given
    #[arg(long, value_enum, env = "QRBENCH_LOG_LEVEL")]
    log_level: Option<LogLevel>,
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceArg {
    Auto,
    Fixed,
    Random,
}

impl From<SourceArg> for MatrixSource {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Auto => MatrixSource::Auto,
            SourceArg::Fixed => MatrixSource::Fixed,
            SourceArg::Random => MatrixSource::Random,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl Cli {
    /// Start from the config file (or defaults) and layer the flags on top.
    fn bench_config(&self) -> Result<BenchConfig> {
        let mut config = match &self.config {
            Some(path) => BenchConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => BenchConfig::default(),
        };
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(digits) = self.precision {
            config.precision_digits = digits;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(source) = self.source {
            config.source = source.into();
        }
        if self.sequential {
            config.concurrent = false;
        }
        if self.parallel_columns {
            config.parallelism = Parallelism::Rayon;
        }
        config.validate().context("invalid benchmark settings")?;
        Ok(config)
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.bench_config()?;
    let options = config.compare_options()?;
    let a = config.matrix();

    let report = compare_engines(&a, &options).context("factorization failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("failed to encode report")?;
        println!("{}", json);
    } else {
        println!("{}", report);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    if let Some(level) = cli.log_level {
        logger.filter_level(level.into());
    }
    logger.init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
