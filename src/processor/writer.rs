//! CSV writing module for ridership partitions
//!
//! Writes each partition to a temporary sibling file and renames it into
//! place, so an interrupted run never leaves a truncated partition behind
//! and re-runs overwrite outputs wholesale.

use crate::error::{MetroError, Result};

use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Write a frame as CSV with a header row, returning the number of data rows
pub fn write_partition(path: &Path, frame: &mut DataFrame) -> Result<usize> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temporary_path(path);
    let file = File::create(&tmp_path)?;
    CsvWriter::new(file)
        .include_header(true)
        .finish(frame)
        .map_err(|e| MetroError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    fs::rename(&tmp_path, path).map_err(|e| MetroError::WriteFailed {
        path: path.to_path_buf(),
        reason: format!("renaming {} into place: {}", tmp_path.display(), e),
    })?;

    debug!("Wrote {} rows to {}", frame.height(), path.display());
    Ok(frame.height())
}

/// `150_2008.csv` -> `.150_2008.csv.tmp` in the same directory
fn temporary_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{empty_hourly_frame, has_hourly_schema, read_text_csv};
    use polars::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("departure").join("150_2008.csv");
        let mut frame = df!("05" => ["1", "2"], "06" => ["3", "4"]).unwrap();

        let rows = write_partition(&path, &mut frame).unwrap();

        assert_eq!(rows, 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "05,06\n1,3\n2,4\n");
        assert!(!temporary_path(&path).exists());
    }

    #[test]
    fn test_empty_frame_writes_header_only() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("150_2009.csv");
        let mut frame = empty_hourly_frame().unwrap();

        assert_eq!(write_partition(&path, &mut frame).unwrap(), 0);

        let read_back = read_text_csv(&path).unwrap();
        assert_eq!(read_back.height(), 0);
        assert!(has_hourly_schema(&read_back));
    }

    #[test]
    fn test_rewrite_replaces_previous_output() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("201_2010.csv");

        let mut first = df!("05" => ["1", "2", "3"]).unwrap();
        write_partition(&path, &mut first).unwrap();
        let mut second = df!("05" => ["9"]).unwrap();
        write_partition(&path, &mut second).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "05\n9\n");
    }

    #[test]
    fn test_temporary_path_is_hidden_sibling() {
        let path = Path::new("/data/arrival/150_2008.csv");
        assert_eq!(
            temporary_path(path),
            PathBuf::from("/data/arrival/.150_2008.csv.tmp")
        );
    }
}
