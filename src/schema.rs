//! Column schema handling and value cleaning.
//!
//! Every file in the pipeline is read as text: raw yearly files get the
//! fixed raw schema assigned positionally and every value stripped of
//! spaces and thousands separators, while per-station partitions are
//! checked against the hourly schema before they are trusted.

use crate::constants::{
    HOURLY_COLUMNS, RAW_COLUMN_COUNT, STRIPPED_CHARS, columns, raw_column_names,
};
use crate::error::{MetroError, Result};
use crate::models::canonical_station_id;
use polars::prelude::*;
use std::path::Path;
use tracing::debug;

/// Remove spaces and commas from a raw field value
///
/// `"1,234 "` becomes `"1234"`; digits and every other character are kept.
pub fn clean_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .collect()
}

/// Read a CSV file with every column typed as text
pub fn read_text_csv(path: &Path) -> Result<DataFrame> {
    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    debug!(
        "Read {}: {} rows x {} columns",
        path.display(),
        frame.height(),
        frame.width()
    );
    Ok(frame)
}

/// Read a raw yearly file and normalize it
pub fn read_raw_file(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(MetroError::RawFileNotFound {
            path: path.to_path_buf(),
        });
    }
    let frame = read_text_csv(path)?;
    normalize_raw_frame(frame, path)
}

/// Assign the fixed raw column names and clean every value.
///
/// Station ids are additionally brought into canonical form so they can
/// be compared across years.
pub fn normalize_raw_frame(mut frame: DataFrame, path: &Path) -> Result<DataFrame> {
    if frame.width() != RAW_COLUMN_COUNT {
        return Err(MetroError::SchemaMismatch {
            path: path.to_path_buf(),
            expected: RAW_COLUMN_COUNT,
            found: frame.width(),
        });
    }

    frame.set_column_names(raw_column_names())?;

    let cleaned = frame
        .get_columns()
        .iter()
        .map(|column| {
            if column.name().as_str() == columns::STATION_ID {
                map_text_column(column, |v| canonical_station_id(&clean_value(v)))
            } else {
                map_text_column(column, clean_value)
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(DataFrame::new(cleaned)?)
}

/// Apply `f` to every non-null value of a column, casting it to text first
fn map_text_column(column: &Column, f: impl Fn(&str) -> String) -> Result<Column> {
    let text = column.cast(&DataType::String)?;
    let mapped: StringChunked = text
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|v| v.map(&f))
        .collect();
    Ok(Column::from(
        mapped.with_name(column.name().clone()).into_series(),
    ))
}

/// Borrow a text column by name
pub fn text_column<'a>(frame: &'a DataFrame, name: &str) -> Result<&'a StringChunked> {
    let column = frame
        .column(name)
        .map_err(|_| MetroError::MissingColumn {
            column: name.to_string(),
        })?;
    Ok(column.as_materialized_series().str()?)
}

/// True when a frame carries exactly the hourly columns, in order
pub fn has_hourly_schema(frame: &DataFrame) -> bool {
    frame
        .get_column_names()
        .iter()
        .map(|name| name.as_str())
        .eq(HOURLY_COLUMNS.iter().copied())
}

/// Zero-row frame with the hourly schema
pub fn empty_hourly_frame() -> Result<DataFrame> {
    let columns = HOURLY_COLUMNS
        .iter()
        .map(|name| Column::new_empty(PlSmallStr::from_static(name), &DataType::String))
        .collect();
    Ok(DataFrame::new(columns)?)
}
