//! Command-line interface components.

use crate::config::PipelineConfig;
use crate::constants::{DEFAULT_COMBINE_END, DEFAULT_SPLIT_END, FIRST_YEAR, LOG_TARGET};
use crate::models::{PipelineStats, YearRange};
use crate::processor::{Pipeline, report};
use crate::station_registry::StationRegistry;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "metro")]
#[command(about = "Split yearly subway ridership files into per-station time series")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Project directory containing raw_data/ and data/
    #[arg(short, long, default_value = ".", global = true)]
    pub root: PathBuf,

    /// First raw year to split
    #[arg(long, default_value_t = FIRST_YEAR, global = true)]
    pub split_start: i32,

    /// Raw year at which splitting stops (exclusive)
    #[arg(long, default_value_t = DEFAULT_SPLIT_END, global = true)]
    pub split_end: i32,

    /// First year included in combined files
    #[arg(long, default_value_t = FIRST_YEAR, global = true)]
    pub combine_start: i32,

    /// Year at which combining stops (exclusive)
    #[arg(long, default_value_t = DEFAULT_COMBINE_END, global = true)]
    pub combine_end: i32,

    /// Raw year whose stations are combined (defaults to the latest raw year)
    #[arg(long, global = true)]
    pub registry_year: Option<i32>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log warnings and errors, no progress bars
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Split raw yearly files into per-station partitions
    Split,
    /// Combine yearly partitions into one file per station
    Combine,
    /// Split, then combine (default)
    Run,
    /// List the stations of the registry year
    Stations,
}

impl Args {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Run)
    }

    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Build the pipeline configuration from the parsed flags
    pub fn to_config(&self) -> PipelineConfig {
        let mut config = PipelineConfig::with_root(&self.root)
            .with_split_years(YearRange::new(self.split_start, self.split_end))
            .with_combine_years(YearRange::new(self.combine_start, self.combine_end));
        if let Some(year) = self.registry_year {
            config = config.with_registry_year(year);
        }
        if self.quiet {
            config = config.without_progress();
        }
        config
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}

/// Dispatch the selected subcommand
pub fn run(args: &Args) -> Result<()> {
    let config = args.to_config();
    debug!("Configuration: {:?}", config);
    let pipeline = Pipeline::new(config).context("Invalid configuration")?;

    match args.command() {
        Command::Run => {
            let stats = pipeline.run().context("Pipeline failed")?;
            report(&stats);
        }
        Command::Split => {
            let split = pipeline.split().context("Splitting failed")?;
            report(&PipelineStats {
                split,
                ..Default::default()
            });
        }
        Command::Combine => {
            let combine = pipeline.combine().context("Combining failed")?;
            report(&PipelineStats {
                combine: Some(combine),
                ..Default::default()
            });
        }
        Command::Stations => {
            let (year, registry) = StationRegistry::resolve(pipeline.config())
                .context("Failed to load station registry")?;
            print_stations(year, &registry);
        }
    }
    Ok(())
}

fn print_stations(year: i32, registry: &StationRegistry) {
    println!(
        "{} {} ({})",
        "Stations in".bright_green().bold(),
        year.to_string().bright_white().bold(),
        registry.len()
    );
    for station in registry {
        println!("  {}", station);
    }
}
