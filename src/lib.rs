//! Swarm Processor Library
//!
//! A Rust library for enriching Swarm satellite total-electron-content
//! observations with daily F10.7 solar flux readings and a modeled
//! electron density per observation.
//!
//! This library provides tools for:
//! - Loading daily F10.7 flux tables into a date-keyed lookup
//! - Enumerating observation files in deterministic lexicographic order
//! - Streaming fixed-layout Swarm observation lines into annotated
//!   output records
//! - Invoking a pluggable ionospheric model behind a single-method trait

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod discovery;
        pub mod ionosphere;
        pub mod solar_index;
        pub mod transformer;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ModelQuery, ObservationRecord, OutputRecord};
pub use app::services::ionosphere::{ChapmanModel, IonosphericModel};
pub use app::services::solar_index::SolarIndexTable;
pub use config::Config;

/// Result type alias for the Swarm processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Swarm processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error in the solar-index table
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Solar-index table error (missing columns, malformed rows)
    #[error("Solar index error in file '{file}': {message}")]
    SolarIndex { file: String, message: String },

    /// Malformed observation line
    #[error("Observation format error in file '{file}' line {line}: {message}")]
    ObservationFormat {
        file: String,
        line: usize,
        message: String,
    },

    /// Date/time parsing error
    #[error("Date/time parsing error: {message}")]
    DateTimeParsing {
        message: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a solar-index table error
    pub fn solar_index(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SolarIndex {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create an observation format error
    pub fn observation_format(
        file: impl Into<String>,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::ObservationFormat {
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    /// Create a date/time parsing error
    pub fn datetime_parsing(message: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a directory traversal error
    pub fn directory_traversal(message: impl Into<String>, source: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: message.into(),
            source,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: "Date/time parsing failed".to_string(),
            source: error,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}
