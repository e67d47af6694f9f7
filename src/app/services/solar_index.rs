//! F10.7 solar-flux table loading
//!
//! This module loads the daily CLS radio-flux export into a date-keyed
//! lookup. The table is built once at run start and is immutable
//! thereafter; observation processing never begins before it is
//! complete.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

use crate::constants::{SOLAR_DATE_COLUMN, SOLAR_DATE_FORMAT, SOLAR_FLUX_COLUMN};
use crate::{Error, Result};

/// Immutable mapping from calendar date to daily F10.7 flux (SFU).
///
/// One entry per day; a repeated date overwrites the earlier value
/// (last row wins). Malformed rows are fatal: the table has no
/// partial-success mode.
#[derive(Debug, Clone, Default)]
pub struct SolarIndexTable {
    entries: HashMap<NaiveDate, f64>,
}

impl SolarIndexTable {
    /// Load the flux table from a headed CSV file.
    ///
    /// The date and flux columns are located by their header labels;
    /// both must be present. Fails if the file cannot be opened, a date
    /// fails to parse, or a flux value is non-numeric.
    pub fn load(path: &Path) -> Result<Self> {
        let file_name = path.to_string_lossy().to_string();
        debug!("Loading solar index table: {}", file_name);

        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            Error::csv_parsing(&file_name, "Failed to open solar index file", Some(e))
        })?;

        let headers = reader
            .headers()
            .map_err(|e| Error::csv_parsing(&file_name, "Failed to read header row", Some(e)))?
            .clone();

        let date_column = find_column(&headers, SOLAR_DATE_COLUMN, "yyyy MM dd")
            .ok_or_else(|| Error::solar_index(&file_name, "date column not found in header"))?;
        let flux_column = find_column(&headers, SOLAR_FLUX_COLUMN, "f107")
            .ok_or_else(|| Error::solar_index(&file_name, "flux column not found in header"))?;

        let mut entries = HashMap::new();

        for (row_index, row) in reader.records().enumerate() {
            let row = row.map_err(|e| {
                Error::csv_parsing(&file_name, "Failed to read CSV record", Some(e))
            })?;

            let date_field = row.get(date_column).unwrap_or_default().trim();
            let date = NaiveDate::parse_from_str(date_field, SOLAR_DATE_FORMAT).map_err(|e| {
                Error::solar_index(
                    &file_name,
                    format!("row {}: invalid date '{}': {}", row_index + 2, date_field, e),
                )
            })?;

            let flux_field = row.get(flux_column).unwrap_or_default().trim();
            let flux: f64 = flux_field.parse().map_err(|_| {
                Error::solar_index(
                    &file_name,
                    format!(
                        "row {}: non-numeric flux value '{}'",
                        row_index + 2,
                        flux_field
                    ),
                )
            })?;

            // Last value wins for duplicate dates
            entries.insert(date, flux);
        }

        info!("Solar index table loaded: {} daily entries", entries.len());

        Ok(Self { entries })
    }

    /// Look up the flux for a calendar date
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.entries.get(&date).copied()
    }

    /// Number of daily entries in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Locate a column by exact header label, falling back to a substring
/// match so minor label revisions in the flux export do not break the
/// loader.
fn find_column(headers: &csv::StringRecord, label: &str, fragment: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim() == label)
        .or_else(|| headers.iter().position(|h| h.contains(fragment)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_table(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("f107.csv");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_returns_exact_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_table(
            &temp_dir,
            "time (yyyy MM dd),absolute_f107 (solar flux unit (SFU))\n\
             2014 03 01,120.5\n\
             2014 03 02,118.2\n",
        );

        let table = SolarIndexTable::load(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get(NaiveDate::from_ymd_opt(2014, 3, 1).unwrap()),
            Some(120.5)
        );
        assert_eq!(
            table.get(NaiveDate::from_ymd_opt(2014, 3, 2).unwrap()),
            Some(118.2)
        );
        assert_eq!(table.get(NaiveDate::from_ymd_opt(2014, 3, 3).unwrap()), None);
    }

    #[test]
    fn test_duplicate_dates_last_value_wins() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_table(
            &temp_dir,
            "time (yyyy MM dd),absolute_f107 (solar flux unit (SFU))\n\
             2014 03 01,120.5\n\
             2014 03 01,130.0\n",
        );

        let table = SolarIndexTable::load(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.get(NaiveDate::from_ymd_opt(2014, 3, 1).unwrap()),
            Some(130.0)
        );
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = SolarIndexTable::load(&temp_dir.path().join("missing.csv"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_rejects_malformed_date() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_table(
            &temp_dir,
            "time (yyyy MM dd),absolute_f107 (solar flux unit (SFU))\n\
             not-a-date,120.5\n",
        );

        match SolarIndexTable::load(&path).unwrap_err() {
            Error::SolarIndex { message, .. } => {
                assert!(message.contains("invalid date"));
            }
            other => panic!("Expected SolarIndex error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_rejects_non_numeric_flux() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_table(
            &temp_dir,
            "time (yyyy MM dd),absolute_f107 (solar flux unit (SFU))\n\
             2014 03 01,n/a\n",
        );

        match SolarIndexTable::load(&path).unwrap_err() {
            Error::SolarIndex { message, .. } => {
                assert!(message.contains("non-numeric flux"));
            }
            other => panic!("Expected SolarIndex error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_rejects_missing_columns() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_table(&temp_dir, "timestamp,value\n2014-03-01,120.5\n");

        match SolarIndexTable::load(&path).unwrap_err() {
            Error::SolarIndex { message, .. } => {
                assert!(message.contains("column not found"));
            }
            other => panic!("Expected SolarIndex error, got {:?}", other),
        }
    }

    #[test]
    fn test_substring_fallback_for_relabeled_columns() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_table(
            &temp_dir,
            "date (yyyy MM dd),adjusted_f107 (SFU)\n2014 03 01,95.0\n",
        );

        let table = SolarIndexTable::load(&path).unwrap();
        assert_eq!(
            table.get(NaiveDate::from_ymd_opt(2014, 3, 1).unwrap()),
            Some(95.0)
        );
    }
}
