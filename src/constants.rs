//! Application constants for the Swarm processor
//!
//! This module contains the compiled-in default paths, the fixed layout
//! of Swarm observation lines, and the column labels of the F10.7
//! solar-flux table.

// =============================================================================
// Default Paths
// =============================================================================

/// Default directory holding Swarm observation files
pub const DEFAULT_OBSERVATION_DIR: &str = "_C";

/// Default F10.7 solar-flux table (CLS radio flux export)
pub const DEFAULT_SOLAR_INDEX_FILE: &str = "cls_radio_flux_f107(2014).csv";

/// Default output file, opened in overwrite mode at run start
pub const DEFAULT_OUTPUT_FILE: &str = "Result_SWARM_C.txt";

// =============================================================================
// Observation File Layout
// =============================================================================

/// Number of description lines at the top of every observation file,
/// discarded unconditionally
pub const OBSERVATION_HEADER_LINES: usize = 3;

/// Positional field indices within a whitespace-split observation line
pub mod fields {
    /// Satellite measurement identifier (opaque token)
    pub const MEASUREMENT_ID: usize = 0;

    /// Date token in compact DDMMYY form
    pub const DATE: usize = 1;

    /// Time token, HH:MM:SS.ffffff
    pub const TIME: usize = 2;

    /// Geodetic latitude, degrees
    pub const LATITUDE: usize = 3;

    /// Geodetic longitude, degrees
    pub const LONGITUDE: usize = 4;

    /// Altitude, kilometres
    pub const ALTITUDE: usize = 5;

    /// Total electron content (opaque token, passed through)
    pub const TEC: usize = 15;

    /// Minimum number of fields a data line must carry
    pub const MIN_COUNT: usize = 16;
}

/// Century prefix inserted during date-token expansion.
///
/// The DDMMYY tokens carry two-digit years; expansion to DDMM20YY is a
/// documented 21st-century policy, not a heuristic to generalize.
pub const CENTURY_PREFIX: &str = "20";

/// Number of characters preceding the two-digit year in a date token
pub const DATE_TOKEN_YEAR_OFFSET: usize = 4;

/// Combined timestamp format after century expansion
pub const OBSERVATION_TIMESTAMP_FORMAT: &str = "%d%m%Y %H:%M:%S%.f";

// =============================================================================
// Solar-Index Table Layout
// =============================================================================

/// Header label of the date column in the F10.7 table
pub const SOLAR_DATE_COLUMN: &str = "time (yyyy MM dd)";

/// Header label of the flux column in the F10.7 table
pub const SOLAR_FLUX_COLUMN: &str = "absolute_f107 (solar flux unit (SFU))";

/// Date format used in the F10.7 table's date column
pub const SOLAR_DATE_FORMAT: &str = "%Y %m %d";

// =============================================================================
// Time Conversion
// =============================================================================

/// Microseconds per hour, for the fractional-hour time-of-day input of
/// the ionospheric model
pub const MICROS_PER_HOUR: f64 = 3_600_000_000.0;
