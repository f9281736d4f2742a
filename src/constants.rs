//! Application constants for the ridership processor
//!
//! This module contains the fixed column schema shared by both pipeline
//! stages, default year ranges, and the on-disk layout of input and
//! output files.

// =============================================================================
// Column Schema
// =============================================================================

/// Column names assigned positionally to every raw yearly file.
///
/// The raw header row is replaced wholesale, so the names below (not the
/// ones printed in the file) are what the rest of the pipeline refers to.
pub mod columns {
    pub const DATE: &str = "date";
    pub const STATION_ID: &str = "station_id";
    pub const STATION_NAME: &str = "station_name";
    pub const DIRECTION: &str = "direction";
}

/// Identity columns, in raw file order
pub const IDENTITY_COLUMNS: [&str; 4] = [
    columns::DATE,
    columns::STATION_ID,
    columns::STATION_NAME,
    columns::DIRECTION,
];

/// Hourly ridership columns in raw file order.
///
/// The service day runs from 05:00 to midnight, so "00" comes after "23".
/// Downstream consumers read these positionally; the order must not change.
pub const HOURLY_COLUMNS: [&str; 20] = [
    "05", "06", "07", "08", "09", "10", "11", "12", "13", "14", "15", "16", "17", "18", "19", "20",
    "21", "22", "23", "00",
];

/// Total width of a raw yearly file
pub const RAW_COLUMN_COUNT: usize = IDENTITY_COLUMNS.len() + HOURLY_COLUMNS.len();

/// Full raw schema: identity columns followed by the hourly columns
pub fn raw_column_names() -> impl Iterator<Item = &'static str> {
    IDENTITY_COLUMNS.iter().chain(HOURLY_COLUMNS.iter()).copied()
}

// =============================================================================
// Direction Labels
// =============================================================================

/// Raw label for boarding counts
pub const BOARDING_LABEL: &str = "승차";

/// Raw label for alighting counts
pub const ALIGHTING_LABEL: &str = "하차";

/// Output directory for boarding partitions
pub const BOARDING_DIR_NAME: &str = "departure";

/// Output directory for alighting partitions
pub const ALIGHTING_DIR_NAME: &str = "arrival";

// =============================================================================
// Value Cleaning
// =============================================================================

/// Characters stripped from every field value (thousands separators and padding)
pub const STRIPPED_CHARS: [char; 2] = [' ', ','];

// =============================================================================
// Year Ranges
// =============================================================================

/// First year of published ridership data
pub const FIRST_YEAR: i32 = 2008;

/// Years split by default: 2008 through 2019
pub const DEFAULT_SPLIT_END: i32 = 2020;

/// Years combined by default: 2008 through 2017
pub const DEFAULT_COMBINE_END: i32 = 2018;

// =============================================================================
// File and Directory Layout
// =============================================================================

/// Directory holding raw yearly files, relative to the project root
pub const RAW_DIR_NAME: &str = "raw_data";

/// Directory holding per-station outputs, relative to the project root
pub const DATA_DIR_NAME: &str = "data";

/// Raw yearly file name prefix
pub const RAW_FILE_PREFIX: &str = "metro_data_";

/// Extension of every input and output file
pub const CSV_EXTENSION: &str = "csv";

/// Glob pattern used to discover raw yearly files
pub const RAW_FILE_PATTERN: &str = "metro_data_*.csv";

/// Default log filter target
pub const LOG_TARGET: &str = "metro_processor";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_schema_layout() {
        let names: Vec<_> = raw_column_names().collect();
        assert_eq!(names.len(), RAW_COLUMN_COUNT);
        assert_eq!(&names[..4], &IDENTITY_COLUMNS);
        assert_eq!(names[4], "05");
        assert_eq!(names.last(), Some(&"00"));
    }

    #[test]
    fn test_midnight_follows_last_evening_hour() {
        let position = |label: &str| HOURLY_COLUMNS.iter().position(|c| *c == label);
        assert_eq!(position("23").map(|p| p + 1), position("00"));
        assert_eq!(position("05"), Some(0));
    }
}
