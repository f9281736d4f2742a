//! Raw file discovery for ridership datasets
//!
//! Finds the raw yearly files present in the raw data directory. The
//! layout is flat:
//! ```text
//! raw_data/
//!   metro_data_2008.csv
//!   metro_data_2009.csv
//!   ...
//! ```

use crate::constants::RAW_FILE_PATTERN;
use crate::error::{MetroError, Result};
use regex::Regex;
use std::path::Path;
use tracing::debug;

/// Years with a raw file on disk, ascending
pub fn discover_raw_years(raw_dir: &Path) -> Result<Vec<i32>> {
    let pattern = raw_dir
        .to_str()
        .map(|dir| format!("{}/{}", glob::Pattern::escape(dir), RAW_FILE_PATTERN))
        .ok_or_else(|| MetroError::Configuration {
            message: format!("raw data path is not valid UTF-8: {}", raw_dir.display()),
        })?;

    let entries = glob::glob(&pattern).map_err(|e| MetroError::Configuration {
        message: format!("invalid raw file pattern {}: {}", pattern, e),
    })?;

    let mut years = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| MetroError::Io(e.into_error()))?;
        if let Some(year) = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(raw_file_year)
        {
            years.push(year);
        }
    }

    years.sort_unstable();
    years.dedup();
    debug!(
        "Found {} raw yearly files in {}: {:?}",
        years.len(),
        raw_dir.display(),
        years
    );
    Ok(years)
}

/// Year encoded in a raw file name, e.g. `metro_data_2019.csv` -> 2019
pub fn raw_file_year(file_name: &str) -> Option<i32> {
    let re = Regex::new(r"^metro_data_(\d{4})\.csv$").ok()?;
    re.captures(file_name)?.get(1)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_raw_file_year() {
        assert_eq!(raw_file_year("metro_data_2019.csv"), Some(2019));
        assert_eq!(raw_file_year("metro_data_19.csv"), None);
        assert_eq!(raw_file_year("metro_data_2019.csv.bak"), None);
        assert_eq!(raw_file_year("150_2019.csv"), None);
    }

    #[test]
    fn test_discover_raw_years() {
        let temp_dir = TempDir::new().unwrap();
        let raw_dir = temp_dir.path().join("raw_data");
        fs::create_dir_all(&raw_dir).unwrap();

        for name in [
            "metro_data_2010.csv",
            "metro_data_2008.csv",
            "metro_data_2019.csv",
            "metro_data_draft.csv",
            "notes.txt",
        ] {
            fs::write(raw_dir.join(name), "x").unwrap();
        }

        let years = discover_raw_years(&raw_dir).unwrap();
        assert_eq!(years, vec![2008, 2010, 2019]);
    }

    #[test]
    fn test_discover_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let years = discover_raw_years(&temp_dir.path().join("absent")).unwrap();
        assert!(years.is_empty());
    }
}
