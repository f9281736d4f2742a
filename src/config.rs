//! Configuration management and validation.
//!
//! Provides the pipeline configuration: project layout, year ranges for
//! each stage, and the year whose raw file seeds the station registry.
//! Defaults reproduce the fixed layout of the ridership archive.

use crate::constants::{
    CSV_EXTENSION, DATA_DIR_NAME, DEFAULT_COMBINE_END, DEFAULT_SPLIT_END, FIRST_YEAR,
    RAW_DIR_NAME, RAW_FILE_PREFIX,
};
use crate::error::{MetroError, Result};
use crate::models::{Direction, StationId, YearRange};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Global configuration for ridership processing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory containing raw yearly files
    pub raw_dir: PathBuf,

    /// Directory receiving `departure/` and `arrival/` partitions
    pub data_dir: PathBuf,

    /// Years whose raw files are split
    pub split_years: YearRange,

    /// Years concatenated into each combined file
    pub combine_years: YearRange,

    /// Raw year used to build the station registry (None = latest on disk)
    pub registry_year: Option<i32>,

    /// Draw progress bars while processing
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::with_root(".")
    }
}

impl PipelineConfig {
    /// Create configuration rooted at a project directory
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            raw_dir: root.join(RAW_DIR_NAME),
            data_dir: root.join(DATA_DIR_NAME),
            split_years: YearRange::new(FIRST_YEAR, DEFAULT_SPLIT_END),
            combine_years: YearRange::new(FIRST_YEAR, DEFAULT_COMBINE_END),
            registry_year: None,
            show_progress: true,
        }
    }

    /// Set the range of raw years to split
    pub fn with_split_years(mut self, years: YearRange) -> Self {
        self.split_years = years;
        self
    }

    /// Set the range of years to combine
    pub fn with_combine_years(mut self, years: YearRange) -> Self {
        self.combine_years = years;
        self
    }

    /// Pin the registry to a specific raw year
    pub fn with_registry_year(mut self, year: i32) -> Self {
        self.registry_year = Some(year);
        self
    }

    /// Disable progress bars (tests, quiet mode)
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Reject ranges that cannot produce any output
    pub fn validate(&self) -> Result<()> {
        if self.split_years.is_empty() {
            return Err(MetroError::Configuration {
                message: format!("split year range {} is empty", self.split_years),
            });
        }
        if self.combine_years.is_empty() {
            return Err(MetroError::Configuration {
                message: format!("combine year range {} is empty", self.combine_years),
            });
        }
        debug!(
            "Configuration valid: split {}, combine {}, registry {:?}",
            self.split_years, self.combine_years, self.registry_year
        );
        Ok(())
    }

    /// `raw_data/metro_data_<year>.csv`
    pub fn raw_file(&self, year: i32) -> PathBuf {
        self.raw_dir
            .join(format!("{}{}.{}", RAW_FILE_PREFIX, year, CSV_EXTENSION))
    }

    /// `data/<direction>/`
    pub fn direction_dir(&self, direction: Direction) -> PathBuf {
        self.data_dir.join(direction.dir_name())
    }

    /// `data/<direction>/<station>_<year>.csv`
    pub fn yearly_file(&self, direction: Direction, station: &StationId, year: i32) -> PathBuf {
        self.direction_dir(direction)
            .join(format!("{}_{}.{}", station, year, CSV_EXTENSION))
    }

    /// `data/<direction>/<station>_<first>_to_<last>.csv`
    pub fn combined_file(&self, direction: Direction, station: &StationId) -> PathBuf {
        self.direction_dir(direction).join(format!(
            "{}_{}.{}",
            station,
            self.combine_years.file_suffix(),
            CSV_EXTENSION
        ))
    }
}
