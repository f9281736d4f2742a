//! Station registry built from a raw yearly file.
//!
//! The registry is the ordered list of distinct station ids, in the order
//! each id first appears in its source file. The splitter builds one per
//! raw year; the combiner consumes the registry of a single reference year
//! (the latest raw year on disk unless pinned in the configuration).

use crate::config::PipelineConfig;
use crate::constants::columns;
use crate::error::{MetroError, Result};
use crate::models::StationId;
use crate::processor::discovery::discover_raw_years;
use crate::schema::{read_raw_file, text_column};
use polars::prelude::DataFrame;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct StationRegistry {
    stations: Vec<StationId>,
    source: Option<PathBuf>,
}

impl StationRegistry {
    /// Build a registry from an explicit list, dropping repeats
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let stations = ids
            .into_iter()
            .map(|id| StationId::new(id.as_ref()))
            .filter(|id| seen.insert(id.clone()))
            .collect();
        Self {
            stations,
            source: None,
        }
    }

    /// Distinct station ids of a normalized raw frame, in first-appearance order
    pub fn from_frame(frame: &DataFrame) -> Result<Self> {
        let ids = text_column(frame, columns::STATION_ID)?;
        Ok(Self::from_ids(ids.into_iter().flatten()))
    }

    /// Read a raw yearly file and collect its stations
    pub fn load(path: &Path) -> Result<Self> {
        let frame = read_raw_file(path)?;
        let mut registry = Self::from_frame(&frame)?;
        registry.source = Some(path.to_path_buf());
        debug!(
            "Loaded {} stations from {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Resolve the registry year and load its raw file.
    ///
    /// Uses the configured year when set, otherwise the latest raw year
    /// present on disk.
    pub fn resolve(config: &PipelineConfig) -> Result<(i32, Self)> {
        let year = match config.registry_year {
            Some(year) => year,
            None => discover_raw_years(&config.raw_dir)?
                .last()
                .copied()
                .ok_or_else(|| MetroError::NoRawData {
                    path: config.raw_dir.clone(),
                })?,
        };

        let registry = Self::load(&config.raw_file(year))?;
        info!(
            "Station registry: {} stations from {} raw data",
            registry.len(),
            year
        );
        Ok((year, registry))
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StationId> {
        self.stations.iter()
    }

    pub fn contains(&self, station: &StationId) -> bool {
        self.stations.contains(station)
    }

    pub fn stations(&self) -> &[StationId] {
        &self.stations
    }

    /// Raw file the registry was loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl<'a> IntoIterator for &'a StationRegistry {
    type Item = &'a StationId;
    type IntoIter = std::slice::Iter<'a, StationId>;

    fn into_iter(self) -> Self::IntoIter {
        self.stations.iter()
    }
}
