//! Metro Processor Library
//!
//! Restructures yearly Seoul subway ridership files (per-station, per-hour
//! boarding and alighting counts) into per-station time series.
//!
//! This library provides tools for:
//! - Normalizing raw yearly files to a fixed column schema and cleaning
//!   thousands separators out of the hourly counts
//! - Splitting each year into one file per station and ride direction
//! - Discovering the station registry from a reference raw year
//! - Concatenating a station's yearly files across a year range, skipping
//!   years with no data

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod processor;
pub mod schema;
pub mod station_registry;

// Re-export commonly used types
pub use config::PipelineConfig;
pub use error::{MetroError, Result};
pub use models::{Direction, PipelineStats, StationId, YearRange};
pub use processor::Pipeline;
pub use station_registry::StationRegistry;
