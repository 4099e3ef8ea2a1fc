//! station-grade - grade production stations from daily quality metrics
//!
//! - `run`: normalize, weight, score and grade, writing the full report
//! - `normalize`: print the normalized indicator table
//! - `weights`: print the per-day indicator weights

use anyhow::Context;
use clap::{Parser, Subcommand};
use quality_pipeline::{read_rows, LoggingConfig, PipelineConfig, QualityPipeline};
use quality_types::MetricTable;
use serde::Serialize;
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// station-grade CLI
#[derive(Parser)]
#[command(name = "station-grade")]
#[command(about = "Grade production stations from daily quality metrics", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path (TOML, YAML or JSON)
    #[arg(short, long, env = "STATION_GRADE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level; overrides the configured level, overridden by RUST_LOG
    #[arg(long, env = "STATION_GRADE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and write the grade report
    Run {
        /// JSON array of daily station metrics
        #[arg(short, long)]
        input: PathBuf,

        /// Report destination (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the per-day diagnostics table here
        #[arg(long)]
        diagnostics: Option<PathBuf>,
    },

    /// Print the normalized indicator table
    Normalize {
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print the per-day indicator weights
    Weights {
        #[arg(short, long)]
        input: PathBuf,
    },
}

/// Run using the current process arguments.
pub fn run() -> anyhow::Result<()> {
    run_with_args(std::env::args_os())
}

/// Run using the provided argument iterator.
pub fn run_with_args<I, T>(args: I) -> anyhow::Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    let mut config =
        PipelineConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.logging.json |= cli.json_logs;
    init_tracing(&config.logging);

    let pipeline = QualityPipeline::new(&config)?;

    match cli.command {
        Commands::Run {
            input,
            output,
            diagnostics,
        } => {
            let table = load_table(&input)?;
            let report = pipeline.run(&table)?;
            info!(
                rows = report.rows.len(),
                flagged = report.degeneracies.len(),
                "grading complete"
            );
            let writer = open_output(output.as_deref())?;
            report.write_json(writer).context("failed to write report")?;
            if let Some(path) = diagnostics {
                let writer = open_output(Some(path.as_path()))?;
                report
                    .write_diagnostics(writer)
                    .context("failed to write diagnostics")?;
            }
            Ok(())
        }
        Commands::Normalize { input } => {
            let table = load_table(&input)?;
            print_json(&pipeline.normalize(&table)?)
        }
        Commands::Weights { input } => {
            let table = load_table(&input)?;
            print_json(&pipeline.weigh(&table)?)
        }
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging.level.clone().into());

    // Ignore a subscriber that is already installed.
    let _ = if logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .try_init()
    };
}

fn load_table(path: &Path) -> anyhow::Result<MetricTable> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    read_rows(BufReader::new(file)).with_context(|| format!("cannot read {}", path.display()))
}

fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    })
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
