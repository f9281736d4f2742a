//! Multi-year concatenation of station partitions.
//!
//! For each station and direction the yearly partitions inside the
//! configured range are appended in ascending year order. A year whose
//! partition is absent or unreadable contributes no rows; only failures
//! writing the combined file are errors.

use super::writer::write_partition;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::{CombineStats, Direction, StationId};
use crate::schema::{empty_hourly_frame, has_hourly_schema, read_text_csv};
use crate::station_registry::StationRegistry;

use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Result of combining one station and direction
#[derive(Debug, Clone)]
pub struct CombineOutcome {
    pub path: PathBuf,
    pub rows: usize,
    pub years_read: Vec<i32>,
    pub years_skipped: Vec<i32>,
}

/// Read a yearly partition if it exists and carries the hourly schema
pub fn read_partition(path: &Path) -> Option<DataFrame> {
    if !path.is_file() {
        debug!("No partition at {}", path.display());
        return None;
    }

    match read_text_csv(path) {
        Ok(frame) if has_hourly_schema(&frame) => Some(frame),
        Ok(frame) => {
            debug!(
                "Skipping {}: unexpected columns {:?}",
                path.display(),
                frame.get_column_names()
            );
            None
        }
        Err(e) => {
            debug!("Skipping {}: {}", path.display(), e);
            None
        }
    }
}

/// Concatenate every available year for one station and direction
pub fn combine_station(
    config: &PipelineConfig,
    station: &StationId,
    direction: Direction,
) -> Result<CombineOutcome> {
    let mut combined = empty_hourly_frame()?;
    let mut years_read = Vec::new();
    let mut years_skipped = Vec::new();

    for year in config.combine_years.years() {
        match read_partition(&config.yearly_file(direction, station, year)) {
            Some(frame) => {
                combined.vstack_mut(&frame)?;
                years_read.push(year);
            }
            None => years_skipped.push(year),
        }
    }

    let path = config.combined_file(direction, station);
    let rows = write_partition(&path, &mut combined)?;

    Ok(CombineOutcome {
        path,
        rows,
        years_read,
        years_skipped,
    })
}

/// Combine every registry station in both directions
pub fn combine_all(config: &PipelineConfig, registry: &StationRegistry) -> Result<CombineStats> {
    info!(
        "Combining {} stations over {}",
        registry.len(),
        config.combine_years
    );

    let progress = progress_bar(config, (registry.len() * Direction::ALL.len()) as u64);
    let mut stats = CombineStats {
        stations: registry.len(),
        ..Default::default()
    };

    for station in registry {
        for direction in Direction::ALL {
            progress.set_message(format!("{} {}", direction, station));
            let outcome = combine_station(config, station, direction)?;

            if outcome.years_read.is_empty() {
                debug!("{} {}: no yearly partitions found", direction, station);
            }
            stats.files_written += 1;
            stats.rows_written += outcome.rows;
            stats.years_read += outcome.years_read.len();
            stats.years_skipped += outcome.years_skipped.len();
            progress.inc(1);
        }
    }

    progress.finish_and_clear();
    Ok(stats)
}

fn progress_bar(config: &PipelineConfig, len: u64) -> ProgressBar {
    if !config.show_progress {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::HOURLY_COLUMNS;
    use crate::models::YearRange;
    use std::fs;
    use tempfile::TempDir;

    fn hourly_csv(rows: &[&str]) -> String {
        let mut content = HOURLY_COLUMNS.join(",");
        content.push('\n');
        for first in rows {
            let mut values = vec!["0"; HOURLY_COLUMNS.len()];
            values[0] = first;
            content.push_str(&values.join(","));
            content.push('\n');
        }
        content
    }

    fn test_config(temp_dir: &TempDir) -> PipelineConfig {
        PipelineConfig::with_root(temp_dir.path())
            .with_combine_years(YearRange::new(2008, 2011))
            .without_progress()
    }

    #[test]
    fn test_read_partition_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        assert!(read_partition(&temp_dir.path().join("150_2009.csv")).is_none());
    }

    #[test]
    fn test_read_partition_rejects_foreign_schema() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("150_2009.csv");
        fs::write(&path, "a,b\n1,2\n").unwrap();
        assert!(read_partition(&path).is_none());
    }

    #[test]
    fn test_read_partition_rejects_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("150_2009.csv");
        fs::write(&path, "").unwrap();
        assert!(read_partition(&path).is_none());
    }

    #[test]
    fn test_combine_skips_missing_years() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let station = StationId::new("150");

        let dir = config.direction_dir(Direction::Boarding);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("150_2008.csv"), hourly_csv(&["1", "2"])).unwrap();
        fs::write(dir.join("150_2010.csv"), hourly_csv(&["3"])).unwrap();

        let outcome = combine_station(&config, &station, Direction::Boarding).unwrap();

        assert_eq!(outcome.rows, 3);
        assert_eq!(outcome.years_read, vec![2008, 2010]);
        assert_eq!(outcome.years_skipped, vec![2009]);
        assert_eq!(outcome.path, dir.join("150_2008_to_2010.csv"));
        assert_eq!(
            fs::read_to_string(&outcome.path).unwrap(),
            hourly_csv(&["1", "2", "3"])
        );
    }

    #[test]
    fn test_combine_without_any_year_writes_header_only() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let outcome =
            combine_station(&config, &StationId::new("319"), Direction::Alighting).unwrap();

        assert_eq!(outcome.rows, 0);
        assert_eq!(outcome.years_skipped, vec![2008, 2009, 2010]);
        assert_eq!(fs::read_to_string(&outcome.path).unwrap(), hourly_csv(&[]));
    }

    #[test]
    fn test_combine_ignores_years_outside_range() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let dir = config.direction_dir(Direction::Alighting);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("201_2007.csv"), hourly_csv(&["7"])).unwrap();
        fs::write(dir.join("201_2009.csv"), hourly_csv(&["9"])).unwrap();
        fs::write(dir.join("201_2011.csv"), hourly_csv(&["11"])).unwrap();

        let outcome =
            combine_station(&config, &StationId::new("201"), Direction::Alighting).unwrap();

        assert_eq!(outcome.years_read, vec![2009]);
        assert_eq!(
            fs::read_to_string(&outcome.path).unwrap(),
            hourly_csv(&["9"])
        );
    }

    #[test]
    fn test_combine_all_counts() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let dir = config.direction_dir(Direction::Boarding);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("150_2008.csv"), hourly_csv(&["1", "2"])).unwrap();

        let registry = StationRegistry::from_ids(["150", "201"]);
        let stats = combine_all(&config, &registry).unwrap();

        assert_eq!(stats.stations, 2);
        assert_eq!(stats.files_written, 4);
        assert_eq!(stats.rows_written, 2);
        assert_eq!(stats.years_read, 1);
        assert_eq!(stats.years_skipped, 11);
    }
}
