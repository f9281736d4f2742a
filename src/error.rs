//! Error handling for ridership processing operations.
//!
//! Provides error types with context for raw file ingestion, schema
//! validation, and partition writing failures.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetroError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Raw ridership file not found: {path}")]
    RawFileNotFound { path: PathBuf },

    #[error("No raw ridership files found in: {path}")]
    NoRawData { path: PathBuf },

    #[error("Schema mismatch in file {path}: expected {expected} columns, found {found}")]
    SchemaMismatch {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    #[error("Column '{column}' missing from frame")]
    MissingColumn { column: String },

    #[error("Failed to write {path} - {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

pub type Result<T> = std::result::Result<T, MetroError>;
