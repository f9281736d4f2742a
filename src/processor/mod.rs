//! Main processing engine.
//!
//! Orchestrates the ridership pipeline: raw yearly files are split into
//! per-station partitions, the station registry is resolved from the
//! reference raw year, and each registry station's partitions are
//! combined across the configured year range.

pub mod combiner;
pub mod discovery;
pub mod splitter;
pub mod writer;

#[cfg(test)]
pub mod tests;

use self::combiner::combine_all;
use self::splitter::split_year;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::{CombineStats, PipelineStats, SplitStats};
use crate::station_registry::StationRegistry;

use colored::*;
use std::time::Instant;
use tracing::info;

/// Runs the pipeline stages over a project directory
#[derive(Debug)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline after validating its configuration
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Split every raw year in the split range; the first failure aborts
    pub fn split(&self) -> Result<Vec<SplitStats>> {
        println!(
            "\n{} {}",
            "Splitting raw files".bright_yellow(),
            self.config.split_years.to_string().bright_white()
        );

        let mut all_stats = Vec::with_capacity(self.config.split_years.len());
        for year in self.config.split_years.years() {
            let stats = split_year(&self.config, year)?;
            println!(
                "  {} {} stations, {} rows",
                format!("{}:", year).bright_cyan(),
                stats.stations.to_string().bright_white(),
                stats.rows_written.to_string().bright_white()
            );
            all_stats.push(stats);
        }
        Ok(all_stats)
    }

    /// Resolve the station registry used by the combiner
    pub fn registry(&self) -> Result<StationRegistry> {
        let (year, registry) = StationRegistry::resolve(&self.config)?;
        println!(
            "  {} {} stations from {}",
            "Registry:".bright_cyan(),
            registry.len().to_string().bright_white().bold(),
            year
        );
        Ok(registry)
    }

    /// Combine the yearly partitions of every registry station
    pub fn combine(&self) -> Result<CombineStats> {
        println!(
            "\n{} {}",
            "Combining station partitions".bright_yellow(),
            self.config.combine_years.to_string().bright_white()
        );
        let registry = self.registry()?;
        combine_all(&self.config, &registry)
    }

    /// Split, then combine
    pub fn run(&self) -> Result<PipelineStats> {
        let start_time = Instant::now();
        println!("{}", "Starting ridership processing".bright_green().bold());
        println!(
            "  {} {}",
            "Raw data:".bright_cyan(),
            self.config.raw_dir.display()
        );
        println!(
            "  {} {}",
            "Output:".bright_cyan(),
            self.config.data_dir.display()
        );

        let split = self.split()?;
        let combine = self.combine()?;

        let stats = PipelineStats {
            split,
            combine: Some(combine),
            processing_time: start_time.elapsed(),
        };
        info!(
            "Pipeline finished: {} files in {}ms",
            stats.files_written(),
            stats.processing_time.as_millis()
        );
        Ok(stats)
    }
}

/// Print the end-of-run summary
pub fn report(stats: &PipelineStats) {
    println!("\n{}", "Processing Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time.as_millis().to_string().bright_white()
    );
    if !stats.split.is_empty() {
        println!(
            "  {} {}",
            "Years split:".bright_cyan(),
            stats.split.len().to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Rows split:".bright_cyan(),
            stats.rows_split().to_string().bright_white()
        );
    }
    if let Some(combine) = &stats.combine {
        println!(
            "  {} {}",
            "Stations combined:".bright_cyan(),
            combine.stations.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Rows combined:".bright_cyan(),
            combine.rows_written.to_string().bright_white()
        );
        if combine.years_skipped > 0 {
            println!(
                "  {} {}",
                "Missing yearly partitions:".bright_yellow(),
                combine.years_skipped.to_string().bright_yellow()
            );
        }
    }
    println!(
        "  {} {}",
        "Files written:".bright_cyan(),
        stats.files_written().to_string().bright_white().bold()
    );
}
