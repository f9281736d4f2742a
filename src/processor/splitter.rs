//! Yearly file splitting.
//!
//! Partitions one normalized raw yearly file into per-station,
//! per-direction files holding only the hourly columns. Any read or
//! schema failure is returned to the caller and aborts the run.

use super::writer::write_partition;
use crate::config::PipelineConfig;
use crate::constants::{HOURLY_COLUMNS, columns};
use crate::error::Result;
use crate::models::{Direction, SplitStats, StationId};
use crate::schema::{read_raw_file, text_column};
use crate::station_registry::StationRegistry;

use polars::prelude::*;
use tracing::{debug, info};

/// Split the raw file for `year` into station partitions
pub fn split_year(config: &PipelineConfig, year: i32) -> Result<SplitStats> {
    let path = config.raw_file(year);
    info!("Splitting {}", path.display());

    let frame = read_raw_file(&path)?;
    split_frame(config, &frame, year)
}

/// Write both direction partitions for every station in a normalized frame
pub fn split_frame(config: &PipelineConfig, frame: &DataFrame, year: i32) -> Result<SplitStats> {
    let registry = StationRegistry::from_frame(frame)?;
    let mut stats = SplitStats {
        year,
        rows_read: frame.height(),
        stations: registry.len(),
        ..Default::default()
    };

    for station in &registry {
        for direction in Direction::ALL {
            let mut part = partition(frame, station, direction)?;
            let path = config.yearly_file(direction, station, year);
            stats.rows_written += write_partition(&path, &mut part)?;
            stats.files_written += 1;
        }
    }

    let unmatched = stats.rows_read.saturating_sub(stats.rows_written);
    if unmatched > 0 {
        debug!(
            "{}: {} rows had no station id or an unknown direction",
            year, unmatched
        );
    }
    info!(
        "{}: {} stations, {} rows, {} files",
        year, stats.stations, stats.rows_written, stats.files_written
    );
    Ok(stats)
}

/// Rows of one station and direction, reduced to the hourly columns
pub fn partition(frame: &DataFrame, station: &StationId, direction: Direction) -> Result<DataFrame> {
    let station_mask = text_column(frame, columns::STATION_ID)?.equal(station.as_str());
    let direction_mask = text_column(frame, columns::DIRECTION)?.equal(direction.raw_label());

    let rows = frame.filter(&(&station_mask & &direction_mask))?;
    Ok(rows.select(HOURLY_COLUMNS)?)
}
