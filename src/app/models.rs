//! Data models for Swarm processing
//!
//! This module contains the core data structures of the pipeline: the
//! parsed per-line observation record, the query handed to the
//! ionospheric model, and the annotated output record.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use std::fmt;

use crate::constants::{
    CENTURY_PREFIX, DATE_TOKEN_YEAR_OFFSET, MICROS_PER_HOUR, OBSERVATION_TIMESTAMP_FORMAT, fields,
};
use crate::{Error, Result};

/// A single parsed observation line from a Swarm file.
///
/// The date, time, and TEC fields keep their original textual form so
/// output lines reproduce the input tokens byte for byte; the numeric
/// fields are parsed eagerly because any malformation is fatal to the
/// run.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationRecord {
    /// Satellite measurement identifier (opaque, pass-through)
    pub measurement_id: String,
    /// Original compact date token (DDMMYY)
    pub date_token: String,
    /// Original time token (HH:MM:SS.ffffff)
    pub time_token: String,
    /// Combined timestamp parsed from the expanded date and time tokens
    pub timestamp: NaiveDateTime,
    /// Geodetic latitude, degrees
    pub latitude: f64,
    /// Geodetic longitude, degrees
    pub longitude: f64,
    /// Altitude, kilometres
    pub altitude_km: f64,
    /// Total electron content (opaque token, passed through unmodified)
    pub tec: String,
}

impl ObservationRecord {
    /// Parse one whitespace-delimited observation line.
    ///
    /// `file` and `line_number` are carried into error messages only;
    /// any malformed field aborts the run per the batch-job contract.
    pub fn parse(line: &str, file: &str, line_number: usize) -> Result<Self> {
        let data: Vec<&str> = line.split_whitespace().collect();

        if data.len() < fields::MIN_COUNT {
            return Err(Error::observation_format(
                file,
                line_number,
                format!(
                    "expected at least {} fields, found {}",
                    fields::MIN_COUNT,
                    data.len()
                ),
            ));
        }

        let date_token = data[fields::DATE].to_string();
        let time_token = data[fields::TIME].to_string();

        let expanded = expand_date_token(&date_token);
        let timestamp = NaiveDateTime::parse_from_str(
            &format!("{} {}", expanded, time_token),
            OBSERVATION_TIMESTAMP_FORMAT,
        )
        .map_err(|e| {
            Error::observation_format(
                file,
                line_number,
                format!("invalid timestamp '{} {}': {}", expanded, time_token, e),
            )
        })?;

        let latitude = parse_field(data[fields::LATITUDE], "latitude", file, line_number)?;
        let longitude = parse_field(data[fields::LONGITUDE], "longitude", file, line_number)?;
        let altitude_km = parse_field(data[fields::ALTITUDE], "altitude", file, line_number)?;

        Ok(Self {
            measurement_id: data[fields::MEASUREMENT_ID].to_string(),
            date_token,
            time_token,
            timestamp,
            latitude,
            longitude,
            altitude_km,
            tec: data[fields::TEC].to_string(),
        })
    }

    /// Calendar date of this observation
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Time of day as fractional hours in [0, 24)
    pub fn fractional_hours(&self) -> f64 {
        let micros = (self.timestamp.nanosecond() / 1_000) as f64;
        self.timestamp.hour() as f64
            + self.timestamp.minute() as f64 / 60.0
            + self.timestamp.second() as f64 / 3600.0
            + micros / MICROS_PER_HOUR
    }
}

/// Expand a compact DDMMYY date token to DDMM20YY.
///
/// Purely syntactic: the century prefix is inserted ahead of the final
/// two characters regardless of year magnitude. Two-digit years are
/// assumed to be 21st century by policy.
pub fn expand_date_token(token: &str) -> String {
    if token.len() < DATE_TOKEN_YEAR_OFFSET {
        return token.to_string();
    }
    format!(
        "{}{}{}",
        &token[..DATE_TOKEN_YEAR_OFFSET],
        CENTURY_PREFIX,
        &token[DATE_TOKEN_YEAR_OFFSET..]
    )
}

fn parse_field(value: &str, name: &str, file: &str, line_number: usize) -> Result<f64> {
    value.parse::<f64>().map_err(|_| {
        Error::observation_format(
            file,
            line_number,
            format!("invalid {} value '{}'", name, value),
        )
    })
}

/// Inputs handed to the external ionospheric model for one observation
#[derive(Debug, Clone, PartialEq)]
pub struct ModelQuery {
    /// Altitude, kilometres
    pub altitude_km: f64,
    /// Geodetic latitude, degrees
    pub latitude: f64,
    /// Geodetic longitude, degrees
    pub longitude: f64,
    /// Calendar month, 1-12
    pub month: u32,
    /// Daily F10.7 flux, SFU
    pub solar_flux: f64,
    /// Local time of day as fractional hours
    pub local_time_hours: f64,
}

impl ModelQuery {
    /// Build a model query from an observation and its resolved flux
    pub fn new(record: &ObservationRecord, solar_flux: f64) -> Self {
        use chrono::Datelike;

        Self {
            altitude_km: record.altitude_km,
            latitude: record.latitude,
            longitude: record.longitude,
            month: record.timestamp.month(),
            solar_flux,
            local_time_hours: record.fractional_hours(),
        }
    }
}

/// One annotated output line
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRecord {
    pub date_token: String,
    pub time_token: String,
    pub altitude_km: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub tec: String,
    pub electron_density: f64,
}

impl OutputRecord {
    /// Assemble the output record for an observation and its computed density
    pub fn new(record: &ObservationRecord, electron_density: f64) -> Self {
        Self {
            date_token: record.date_token.clone(),
            time_token: record.time_token.clone(),
            altitude_km: record.altitude_km,
            latitude: record.latitude,
            longitude: record.longitude,
            tec: record.tec.clone(),
            electron_density,
        }
    }
}

impl fmt::Display for OutputRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Floats use shortest-roundtrip Debug formatting, which keeps a
        // trailing .0 on round values (300.0, not 300) as the historical
        // output files do.
        write!(
            f,
            "{} {} {:?} {:?} {:?} {} {:?}",
            self.date_token,
            self.time_token,
            self.altitude_km,
            self.latitude,
            self.longitude,
            self.tec,
            self.electron_density
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_LINE: &str = "12345 010314 02:00:00.000000 10.0 20.0 300.0 \
         0 0 0 0 0 0 0 0 0 5.2";

    #[test]
    fn test_parse_observation_line() {
        let record = ObservationRecord::parse(SAMPLE_LINE, "test.txt", 4).unwrap();

        assert_eq!(record.measurement_id, "12345");
        assert_eq!(record.date_token, "010314");
        assert_eq!(record.time_token, "02:00:00.000000");
        assert_eq!(record.latitude, 10.0);
        assert_eq!(record.longitude, 20.0);
        assert_eq!(record.altitude_km, 300.0);
        assert_eq!(record.tec, "5.2");
        assert_eq!(
            record.date(),
            NaiveDate::from_ymd_opt(2014, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_parse_rejects_short_line() {
        let result = ObservationRecord::parse("12345 010314 02:00:00.000000", "test.txt", 4);
        match result.unwrap_err() {
            Error::ObservationFormat { file, line, message } => {
                assert_eq!(file, "test.txt");
                assert_eq!(line, 4);
                assert!(message.contains("expected at least 16 fields"));
            }
            other => panic!("Expected ObservationFormat error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_bad_timestamp() {
        let line = SAMPLE_LINE.replace("010314", "990399");
        let result = ObservationRecord::parse(&line, "test.txt", 4);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_non_numeric_latitude() {
        let line = SAMPLE_LINE.replace("10.0", "north");
        let result = ObservationRecord::parse(&line, "test.txt", 4);
        match result.unwrap_err() {
            Error::ObservationFormat { message, .. } => {
                assert!(message.contains("invalid latitude value"));
            }
            other => panic!("Expected ObservationFormat error, got {:?}", other),
        }
    }

    #[test]
    fn test_expand_date_token() {
        assert_eq!(expand_date_token("010314"), "01032014");
        assert_eq!(expand_date_token("311299"), "31122099");
        // Syntactic rule applies regardless of year magnitude
        assert_eq!(expand_date_token("010300"), "01032000");
    }

    #[test]
    fn test_fractional_hours_exact_hour() {
        let record = ObservationRecord::parse(SAMPLE_LINE, "test.txt", 4).unwrap();
        assert_eq!(record.fractional_hours(), 2.0);
    }

    #[test]
    fn test_fractional_hours_composition() {
        let line = SAMPLE_LINE.replace("02:00:00.000000", "13:30:36.500000");
        let record = ObservationRecord::parse(&line, "test.txt", 4).unwrap();

        let expected = 13.0 + 30.0 / 60.0 + 36.0 / 3600.0 + 500_000.0 / 3_600_000_000.0;
        assert!((record.fractional_hours() - expected).abs() < 1e-12);
        assert!(record.fractional_hours() >= 0.0);
        assert!(record.fractional_hours() < 24.0);
    }

    #[test]
    fn test_model_query_from_record() {
        let record = ObservationRecord::parse(SAMPLE_LINE, "test.txt", 4).unwrap();
        let query = ModelQuery::new(&record, 120.5);

        assert_eq!(query.altitude_km, 300.0);
        assert_eq!(query.latitude, 10.0);
        assert_eq!(query.longitude, 20.0);
        assert_eq!(query.month, 3);
        assert_eq!(query.solar_flux, 120.5);
        assert_eq!(query.local_time_hours, 2.0);
    }

    #[test]
    fn test_output_record_display() {
        let record = ObservationRecord::parse(SAMPLE_LINE, "test.txt", 4).unwrap();
        let output = OutputRecord::new(&record, 123456.75);

        assert_eq!(
            output.to_string(),
            "010314 02:00:00.000000 300.0 10.0 20.0 5.2 123456.75"
        );
    }
}
