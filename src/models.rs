//! Core data structures and types for ridership processing.
//!
//! Defines ride directions, station identifiers, year ranges, and the
//! processing statistics reported by each pipeline stage.

use crate::constants::{ALIGHTING_DIR_NAME, ALIGHTING_LABEL, BOARDING_DIR_NAME, BOARDING_LABEL};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Ride direction recorded in the raw files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Boarding,
    Alighting,
}

impl Direction {
    /// Both directions, in the order outputs are written
    pub const ALL: [Direction; 2] = [Direction::Boarding, Direction::Alighting];

    /// Label used in the raw direction column
    pub fn raw_label(&self) -> &'static str {
        match self {
            Direction::Boarding => BOARDING_LABEL,
            Direction::Alighting => ALIGHTING_LABEL,
        }
    }

    /// Output directory name under the data directory
    pub fn dir_name(&self) -> &'static str {
        match self {
            Direction::Boarding => BOARDING_DIR_NAME,
            Direction::Alighting => ALIGHTING_DIR_NAME,
        }
    }

    /// Parse a cleaned raw direction label
    pub fn from_raw_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.raw_label() == label)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Normalized station identifier
///
/// Numeric ids are stored in canonical integer form, so "0150" and "150"
/// name the same station.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StationId(String);

impl StationId {
    /// Build an id from an already-cleaned raw value
    pub fn new(cleaned: &str) -> Self {
        Self(canonical_station_id(cleaned))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strip leading zeros from all-digit ids; anything else is kept verbatim
pub fn canonical_station_id(cleaned: &str) -> String {
    if !cleaned.is_empty() && cleaned.bytes().all(|b| b.is_ascii_digit()) {
        let trimmed = cleaned.trim_start_matches('0');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        cleaned.to_string()
    }
}

/// Half-open range of calendar years, iterated in ascending order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.start..self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.end - self.start) as usize
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..self.end).contains(&year)
    }

    /// Suffix used in combined file names, e.g. `2008_to_2017`
    pub fn file_suffix(&self) -> String {
        format!("{}_to_{}", self.start, self.end - 1)
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Statistics for splitting one raw yearly file
#[derive(Debug, Default, Clone)]
pub struct SplitStats {
    pub year: i32,
    pub rows_read: usize,
    pub stations: usize,
    pub files_written: usize,
    pub rows_written: usize,
}

/// Statistics for the combine stage
#[derive(Debug, Default, Clone)]
pub struct CombineStats {
    pub stations: usize,
    pub files_written: usize,
    pub rows_written: usize,
    pub years_read: usize,
    pub years_skipped: usize,
}

/// Summary for a full pipeline run
#[derive(Debug, Default)]
pub struct PipelineStats {
    pub split: Vec<SplitStats>,
    pub combine: Option<CombineStats>,
    pub processing_time: Duration,
}

impl PipelineStats {
    pub fn files_written(&self) -> usize {
        self.split.iter().map(|s| s.files_written).sum::<usize>()
            + self.combine.as_ref().map_or(0, |c| c.files_written)
    }

    pub fn rows_split(&self) -> usize {
        self.split.iter().map(|s| s.rows_written).sum()
    }
}
