//! Integration tests for the processor module
//!
//! Tests the complete pipeline using small raw yearly files written into a
//! temporary project directory.


use crate::config::PipelineConfig;
use crate::constants::HOURLY_COLUMNS;
use crate::models::YearRange;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// One raw ridership row: station id, direction label, base count
pub type RawRow<'a> = (&'a str, &'a str, u32);

/// Raw header as published, one label per column
fn raw_header() -> String {
    let mut header = vec![
        "날짜".to_string(),
        "역번호".to_string(),
        "역명".to_string(),
        "구분".to_string(),
    ];
    header.extend(HOURLY_COLUMNS.iter().map(|hour| format!("{}시", hour)));
    header.join(",")
}

/// Hourly value for a row: base * 1000 + hour index, thousands-separated
pub fn raw_count(base: u32, hour: usize) -> String {
    let value = base * 1000 + hour as u32;
    if value >= 1000 {
        format!("\"{},{:03} \"", value / 1000, value % 1000)
    } else {
        value.to_string()
    }
}

/// Same value after cleaning
pub fn clean_count(base: u32, hour: usize) -> String {
    (base * 1000 + hour as u32).to_string()
}

/// Write `raw_data/metro_data_<year>.csv` under `root`
pub fn write_raw_file(root: &Path, year: i32, rows: &[RawRow]) -> PathBuf {
    let raw_dir = root.join("raw_data");
    fs::create_dir_all(&raw_dir).unwrap();

    let mut content = raw_header();
    content.push('\n');
    for (day, (station, direction, base)) in rows.iter().enumerate() {
        let mut fields = vec![
            format!("{}-01-{:02}", year, day % 28 + 1),
            station.to_string(),
            format!("역 {}", station),
            direction.to_string(),
        ];
        fields.extend((0..HOURLY_COLUMNS.len()).map(|hour| raw_count(*base, hour)));
        content.push_str(&fields.join(","));
        content.push('\n');
    }

    let path = raw_dir.join(format!("metro_data_{}.csv", year));
    fs::write(&path, content).unwrap();
    path
}

/// Expected output file contents for rows with the given base counts
pub fn expected_partition(bases: &[u32]) -> String {
    let mut content = HOURLY_COLUMNS.join(",");
    content.push('\n');
    for base in bases {
        let values: Vec<_> = (0..HOURLY_COLUMNS.len())
            .map(|hour| clean_count(*base, hour))
            .collect();
        content.push_str(&values.join(","));
        content.push('\n');
    }
    content
}

/// Configuration rooted in a temp dir, without progress bars
pub fn test_config(temp_dir: &TempDir, split: YearRange, combine: YearRange) -> PipelineConfig {
    PipelineConfig::with_root(temp_dir.path())
        .with_split_years(split)
        .with_combine_years(combine)
        .without_progress()
}
