//! Observation record transformation
//!
//! Streams one observation file at a time: discards the three-line
//! description header, parses each data line, resolves the daily F10.7
//! flux through a lookup-on-date-change cache, invokes the ionospheric
//! model, and appends one annotated line per observation to the shared
//! output stream.

use chrono::NaiveDate;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::{debug, warn};

use crate::app::models::{ModelQuery, ObservationRecord, OutputRecord};
use crate::app::services::ionosphere::IonosphericModel;
use crate::app::services::solar_index::SolarIndexTable;
use crate::constants::OBSERVATION_HEADER_LINES;
use crate::{Error, Result};

/// Lookup-on-date-change memoization of the daily flux.
///
/// Observation files are date-ordered, so a contiguous run of lines
/// sharing a date costs one table lookup. A date with no table entry
/// leaves the cache untouched, so every subsequent line with that date
/// retries the lookup (and produces its own diagnostic upstream).
#[derive(Debug, Default)]
pub struct FluxCache {
    current: Option<(NaiveDate, f64)>,
    lookups: usize,
}

impl FluxCache {
    /// Resolve the flux for a date, consulting the table only when the
    /// date differs from the cached one.
    pub fn resolve(&mut self, table: &SolarIndexTable, date: NaiveDate) -> Option<f64> {
        if let Some((cached_date, flux)) = self.current
            && cached_date == date
        {
            return Some(flux);
        }

        self.lookups += 1;
        match table.get(date) {
            Some(flux) => {
                self.current = Some((date, flux));
                Some(flux)
            }
            None => None,
        }
    }

    /// Number of table lookups performed so far
    pub fn lookups(&self) -> usize {
        self.lookups
    }
}

/// Per-file transformation statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileStats {
    /// Data lines read (header lines excluded)
    pub lines_read: usize,
    /// Output records written
    pub records_written: usize,
    /// Lines skipped for missing solar-flux coverage
    pub records_skipped: usize,
}

/// Transforms observation files into annotated output records
pub struct RecordTransformer<'a> {
    solar_index: &'a SolarIndexTable,
    model: &'a dyn IonosphericModel,
}

impl<'a> RecordTransformer<'a> {
    /// Create a transformer over an already-loaded solar-index table
    pub fn new(solar_index: &'a SolarIndexTable, model: &'a dyn IonosphericModel) -> Self {
        Self { solar_index, model }
    }

    /// Process one observation file, appending annotated lines to `output`.
    ///
    /// The first three lines are discarded unconditionally. Any
    /// malformed data line aborts the run; a line whose date has no
    /// flux entry is skipped with a warning and processing continues.
    pub fn process_file<W: Write>(&self, path: &Path, output: &mut W) -> Result<FileStats> {
        let file_name = path.to_string_lossy().to_string();
        debug!("Processing observation file: {}", file_name);

        let file = File::open(path)
            .map_err(|e| Error::io(format!("Failed to open observation file '{}'", file_name), e))?;
        let reader = BufReader::new(file);

        let mut flux_cache = FluxCache::default();
        let mut stats = FileStats::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                Error::io(format!("Failed to read from '{}'", file_name), e)
            })?;

            if index < OBSERVATION_HEADER_LINES {
                continue;
            }

            let line_number = index + 1;
            stats.lines_read += 1;

            let record = ObservationRecord::parse(&line, &file_name, line_number)?;
            let date = record.date();

            let Some(flux) = flux_cache.resolve(self.solar_index, date) else {
                warn!("No F10.7 data for {}, skipping observation", date);
                stats.records_skipped += 1;
                continue;
            };

            let query = ModelQuery::new(&record, flux);
            let density = self.model.electron_density(&query);

            writeln!(output, "{}", OutputRecord::new(&record, density))
                .map_err(|e| Error::io("Failed to write output record", e))?;
            stats.records_written += 1;
        }

        debug!(
            "Transformed {}: {} written, {} skipped",
            file_name, stats.records_written, stats.records_skipped
        );

        Ok(stats)
    }
}
