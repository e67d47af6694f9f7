//! Configuration management and validation.
//!
//! Provides the run configuration for the Swarm enrichment pipeline:
//! the observation directory, the F10.7 solar-index table, and the
//! output file. Defaults reproduce the compiled-in paths of the
//! original batch job.

use crate::constants::{DEFAULT_OBSERVATION_DIR, DEFAULT_OUTPUT_FILE, DEFAULT_SOLAR_INDEX_FILE};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global configuration for a Swarm processing run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory containing Swarm observation files (processed
    /// non-recursively, in lexicographic filename order)
    pub observation_dir: PathBuf,

    /// Path to the F10.7 solar-flux CSV table
    pub solar_index_path: PathBuf,

    /// Output file path, truncated at run start
    pub output_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            observation_dir: PathBuf::from(DEFAULT_OBSERVATION_DIR),
            solar_index_path: PathBuf::from(DEFAULT_SOLAR_INDEX_FILE),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

impl Config {
    /// Create a configuration from explicit paths
    pub fn new(
        observation_dir: impl Into<PathBuf>,
        solar_index_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            observation_dir: observation_dir.into(),
            solar_index_path: solar_index_path.into(),
            output_path: output_path.into(),
        }
    }

    /// Validate that the configured inputs exist and are usable
    pub fn validate(&self) -> Result<()> {
        if !self.observation_dir.exists() {
            return Err(Error::configuration(format!(
                "Observation directory does not exist: {}",
                self.observation_dir.display()
            )));
        }

        if !self.observation_dir.is_dir() {
            return Err(Error::configuration(format!(
                "Observation path is not a directory: {}",
                self.observation_dir.display()
            )));
        }

        if !self.solar_index_path.exists() {
            return Err(Error::configuration(format!(
                "Solar index file does not exist: {}",
                self.solar_index_path.display()
            )));
        }

        if let Some(parent) = self.output_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            return Err(Error::configuration(format!(
                "Output directory does not exist: {}",
                parent.display()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_paths_match_constants() {
        let config = Config::default();
        assert_eq!(config.observation_dir, PathBuf::from(DEFAULT_OBSERVATION_DIR));
        assert_eq!(
            config.solar_index_path,
            PathBuf::from(DEFAULT_SOLAR_INDEX_FILE)
        );
        assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT_FILE));
    }

    #[test]
    fn test_validate_success() {
        let temp_dir = TempDir::new().unwrap();
        let obs_dir = temp_dir.path().join("swarm");
        fs::create_dir(&obs_dir).unwrap();
        let flux_file = temp_dir.path().join("f107.csv");
        fs::write(&flux_file, "time (yyyy MM dd),flux\n").unwrap();

        let config = Config::new(&obs_dir, &flux_file, temp_dir.path().join("out.txt"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_missing_observation_dir() {
        let temp_dir = TempDir::new().unwrap();
        let flux_file = temp_dir.path().join("f107.csv");
        fs::write(&flux_file, "header\n").unwrap();

        let config = Config::new(
            temp_dir.path().join("nonexistent"),
            &flux_file,
            temp_dir.path().join("out.txt"),
        );

        match config.validate().unwrap_err() {
            Error::Configuration { message } => {
                assert!(message.contains("Observation directory does not exist"));
            }
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_observation_path_not_a_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("not_a_dir");
        fs::write(&file, "x").unwrap();
        let flux_file = temp_dir.path().join("f107.csv");
        fs::write(&flux_file, "header\n").unwrap();

        let config = Config::new(&file, &flux_file, temp_dir.path().join("out.txt"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_missing_solar_index() {
        let temp_dir = TempDir::new().unwrap();
        let obs_dir = temp_dir.path().join("swarm");
        fs::create_dir(&obs_dir).unwrap();

        let config = Config::new(
            &obs_dir,
            temp_dir.path().join("missing.csv"),
            temp_dir.path().join("out.txt"),
        );
        assert!(config.validate().is_err());
    }
}
