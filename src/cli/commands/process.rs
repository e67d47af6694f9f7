//! Process command implementation for the Swarm processor CLI
//!
//! Contains the complete batch workflow: configuration, solar-index
//! loading, observation file discovery, per-file transformation into
//! the shared output stream, and run reporting.

use indicatif::HumanDuration;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::Instant;
use tracing::{debug, info, warn};

use super::shared::{ProcessingStats, create_progress_bar, setup_logging};
use crate::app::services::discovery::discover_observation_files;
use crate::app::services::ionosphere::{ChapmanModel, IonosphericModel};
use crate::app::services::solar_index::SolarIndexTable;
use crate::app::services::transformer::RecordTransformer;
use crate::cli::args::{OutputFormat, ProcessArgs};
use crate::config::Config;
use crate::{Error, Result};

/// Process command runner
///
/// Orchestrates the whole run:
/// 1. Set up logging and validate arguments
/// 2. Build the configuration from defaults plus CLI overrides
/// 3. Run the pipeline (or the dry run)
/// 4. Report summary statistics
pub fn run_process(args: ProcessArgs) -> Result<ProcessingStats> {
    // Set up logging
    setup_logging(&args)?;

    info!("Starting Swarm processor");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let config = args.to_config();
    config.validate()?;
    debug!("Run configuration: {:?}", config);

    let stats = if args.dry_run {
        run_dry_run(&config)?
    } else {
        process_directory(&config, &ChapmanModel, args.show_progress())?
    };

    generate_report(&args, &stats)?;

    Ok(stats)
}

/// Perform a dry run showing what would be processed
fn run_dry_run(config: &Config) -> Result<ProcessingStats> {
    info!("Performing dry run - no output will be written");
    let start_time = Instant::now();

    let files = discover_observation_files(&config.observation_dir)?;
    for file in &files {
        info!("Would process: {}", file.display());
    }
    info!("Would write: {}", config.output_path.display());

    Ok(ProcessingStats {
        files_processed: files.len(),
        processing_time: start_time.elapsed(),
        ..Default::default()
    })
}

/// Run the full pipeline over one observation directory.
///
/// The solar-index table is loaded completely before any observation is
/// touched. The output file is opened once in overwrite mode and held
/// for the whole batch; files are processed sequentially in
/// lexicographic order and their annotated lines appended in turn.
pub fn process_directory(
    config: &Config,
    model: &dyn IonosphericModel,
    show_progress: bool,
) -> Result<ProcessingStats> {
    let start_time = Instant::now();

    // Build the flux lookup up front; a malformed table is fatal
    let solar_index = SolarIndexTable::load(&config.solar_index_path)?;
    if solar_index.is_empty() {
        warn!(
            "Solar index table {} holds no entries; every observation will be skipped",
            config.solar_index_path.display()
        );
    }

    let files = discover_observation_files(&config.observation_dir)?;
    info!("Discovered {} observation files", files.len());

    let output_file = File::create(&config.output_path).map_err(|e| {
        Error::io(
            format!(
                "Failed to create output file '{}'",
                config.output_path.display()
            ),
            e,
        )
    })?;
    let mut output = BufWriter::new(output_file);

    let progress_bar = if show_progress && !files.is_empty() {
        Some(create_progress_bar(
            files.len() as u64,
            "Processing observation files...",
        ))
    } else {
        None
    };

    let transformer = RecordTransformer::new(&solar_index, model);
    let mut stats = ProcessingStats::default();

    for (index, file) in files.iter().enumerate() {
        if let Some(pb) = &progress_bar {
            let file_name = file
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("unknown");
            pb.set_message(format!("Processing {}", file_name));
        }

        let file_stats = transformer.process_file(file, &mut output)?;

        stats.files_processed += 1;
        stats.records_written += file_stats.records_written;
        stats.records_skipped += file_stats.records_skipped;

        info!("File {} ({}) processed", index + 1, file.display());

        if let Some(pb) = &progress_bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = &progress_bar {
        pb.finish_with_message(format!("Processed {} files", files.len()));
    }

    output
        .flush()
        .map_err(|e| Error::io("Failed to flush output file", e))?;

    if let Ok(metadata) = std::fs::metadata(&config.output_path) {
        stats.output_size_bytes = metadata.len();
    }

    stats.processing_time = start_time.elapsed();

    info!(
        "Run complete: {} records written, {} skipped, from {} files in {:.2}s",
        stats.records_written,
        stats.records_skipped,
        stats.files_processed,
        stats.processing_time.as_secs_f64()
    );

    Ok(stats)
}

/// Generate the final run report
fn generate_report(args: &ProcessArgs, stats: &ProcessingStats) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => generate_human_report(args, stats),
        OutputFormat::Json => generate_json_report(stats),
    }
}

/// Generate a human-readable report
fn generate_human_report(args: &ProcessArgs, stats: &ProcessingStats) -> Result<()> {
    if args.quiet {
        return Ok(());
    }

    let duration = HumanDuration(stats.processing_time);

    println!("\nSwarm processing complete");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   • Files processed: {}", stats.files_processed);
    println!("   • Records written: {}", stats.records_written);
    println!("   • Records skipped: {}", stats.records_skipped);
    println!(
        "   • Output size: {}",
        ProcessingStats::format_size(stats.output_size_bytes)
    );
    println!("   • Processing time: {}", duration);
    println!();

    Ok(())
}

/// Generate a JSON report for machine consumption
fn generate_json_report(stats: &ProcessingStats) -> Result<()> {
    let json_stats = serde_json::json!({
        "files_processed": stats.files_processed,
        "records_written": stats.records_written,
        "records_skipped": stats.records_skipped,
        "processing_time_seconds": stats.processing_time.as_secs_f64(),
        "output_size_bytes": stats.output_size_bytes,
    });

    println!("{}", serde_json::to_string_pretty(&json_stats).unwrap());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_fixture(temp_dir: &TempDir) -> Config {
        let obs_dir = temp_dir.path().join("swarm");
        fs::create_dir(&obs_dir).unwrap();
        fs::write(
            obs_dir.join("swarm_a.txt"),
            "header 1\nheader 2\nheader 3\n\
             12345 010314 02:00:00.000000 10.0 20.0 300.0 0 0 0 0 0 0 0 0 0 5.2\n",
        )
        .unwrap();

        let flux_path = temp_dir.path().join("f107.csv");
        fs::write(
            &flux_path,
            "time (yyyy MM dd),absolute_f107 (solar flux unit (SFU))\n2014 03 01,120.5\n",
        )
        .unwrap();

        Config::new(obs_dir, flux_path, temp_dir.path().join("result.txt"))
    }

    #[test]
    fn test_process_directory_writes_output() {
        let temp_dir = TempDir::new().unwrap();
        let config = write_fixture(&temp_dir);

        let stats = process_directory(&config, &ChapmanModel, false).unwrap();

        assert_eq!(stats.files_processed, 1);
        assert_eq!(stats.records_written, 1);
        assert_eq!(stats.records_skipped, 0);
        assert!(stats.output_size_bytes > 0);

        let output = fs::read_to_string(&config.output_path).unwrap();
        assert!(output.starts_with("010314 02:00:00.000000 300.0 10.0 20.0 5.2 "));
    }

    #[test]
    fn test_process_directory_overwrites_previous_output() {
        let temp_dir = TempDir::new().unwrap();
        let config = write_fixture(&temp_dir);
        fs::write(&config.output_path, "stale content from an earlier run\n").unwrap();

        process_directory(&config, &ChapmanModel, false).unwrap();

        let output = fs::read_to_string(&config.output_path).unwrap();
        assert!(!output.contains("stale content"));
    }

    #[test]
    fn test_process_directory_empty_input() {
        let temp_dir = TempDir::new().unwrap();
        let obs_dir = temp_dir.path().join("empty");
        fs::create_dir(&obs_dir).unwrap();
        let flux_path = temp_dir.path().join("f107.csv");
        fs::write(
            &flux_path,
            "time (yyyy MM dd),absolute_f107 (solar flux unit (SFU))\n2014 03 01,120.5\n",
        )
        .unwrap();

        let config = Config::new(obs_dir, flux_path, temp_dir.path().join("result.txt"));
        let stats = process_directory(&config, &ChapmanModel, false).unwrap();

        assert_eq!(stats.files_processed, 0);
        assert_eq!(stats.records_written, 0);
        // Output file exists but is empty
        assert_eq!(fs::read_to_string(&config.output_path).unwrap(), "");
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let config = write_fixture(&temp_dir);

        let stats = run_dry_run(&config).unwrap();

        assert_eq!(stats.files_processed, 1);
        assert_eq!(stats.records_written, 0);
        assert!(!config.output_path.exists());
    }
}
