//! Shared components for CLI commands
//!
//! Common types and utilities used by the command implementations:
//! run statistics, logging setup, and progress-bar styling.

use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::Result;
use crate::cli::args::ProcessArgs;

/// Processing statistics for reporting a whole run
#[derive(Debug, Clone, Default)]
pub struct ProcessingStats {
    /// Number of observation files processed
    pub files_processed: usize,
    /// Number of output records written
    pub records_written: usize,
    /// Number of lines skipped for missing solar-flux coverage
    pub records_skipped: usize,
    /// Total processing time
    pub processing_time: std::time::Duration,
    /// Output file size in bytes (0 for dry runs)
    pub output_size_bytes: u64,
}

impl ProcessingStats {
    /// Format a byte count in human-readable form
    pub fn format_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

/// Set up structured logging for the process command
pub fn setup_logging(args: &ProcessArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("swarm_processor={}", log_level)));

    if args.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processing_stats_default() {
        let stats = ProcessingStats::default();
        assert_eq!(stats.files_processed, 0);
        assert_eq!(stats.records_written, 0);
        assert_eq!(stats.records_skipped, 0);
        assert_eq!(stats.output_size_bytes, 0);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(ProcessingStats::format_size(500), "500 B");
        assert_eq!(ProcessingStats::format_size(1536), "1.50 KB");
        assert_eq!(ProcessingStats::format_size(1048576), "1.00 MB");
    }
}
