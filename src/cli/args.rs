//! Command-line argument definitions for the Swarm processor
//!
//! Defines the CLI interface using the clap derive API. Every path flag
//! is optional; a bare `process` run falls back to the compiled-in
//! defaults and reproduces the original flagless batch job.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::Config;
use crate::{Error, Result};

/// CLI arguments for the Swarm TEC enrichment processor
///
/// Joins Swarm satellite TEC observation files with daily F10.7 solar
/// flux readings and annotates every observation with a modeled
/// electron density.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "swarm-processor",
    version,
    about = "Enrich Swarm TEC observations with F10.7 solar flux and modeled electron density",
    long_about = "A batch tool that joins Swarm satellite total-electron-content observation \
                  files with daily F10.7 solar flux readings and annotates every observation \
                  with an electron density computed by an ionospheric model. Output is a single \
                  plain-text file, one line per observation, reproducible across runs."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the Swarm processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Process observation files into the annotated output file
    Process(ProcessArgs),
}

/// Arguments for the process command
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Directory containing Swarm observation files
    ///
    /// Processed non-recursively in lexicographic filename order.
    /// Defaults to the compiled-in observation directory.
    #[arg(
        short = 'i',
        long = "input",
        value_name = "DIR",
        help = "Directory containing Swarm observation files"
    )]
    pub input_dir: Option<PathBuf>,

    /// Path to the F10.7 solar-flux CSV table
    ///
    /// A headed CSV with a date column (yyyy MM dd) and an absolute
    /// F10.7 column in SFU. Defaults to the compiled-in table path.
    #[arg(
        short = 's',
        long = "solar-index",
        value_name = "FILE",
        help = "Path to the F10.7 solar-flux CSV table"
    )]
    pub solar_index: Option<PathBuf>,

    /// Output file path
    ///
    /// Opened in overwrite mode at run start; one line per successfully
    /// processed observation. Defaults to the compiled-in output path.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Output file path (overwritten at run start)"
    )]
    pub output_path: Option<PathBuf>,

    /// Perform a dry run without writing output
    ///
    /// Lists the files that would be processed without opening the
    /// output file. Useful for previewing a run.
    #[arg(long = "dry-run", help = "Show what would be processed without writing output")]
    pub dry_run: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for the run summary
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the run summary"
    )]
    pub output_format: OutputFormat,
}

/// Output format options for the run summary
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Human,
    /// JSON summary for scripting
    Json,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl ProcessArgs {
    /// Validate the process command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        // Validate input path exists (only if explicitly provided; the
        // compiled-in default is checked by Config::validate)
        if let Some(input_dir) = &self.input_dir {
            if !input_dir.exists() {
                return Err(Error::configuration(format!(
                    "Input directory does not exist: {}",
                    input_dir.display()
                )));
            }

            if !input_dir.is_dir() {
                return Err(Error::configuration(format!(
                    "Input path is not a directory: {}",
                    input_dir.display()
                )));
            }
        }

        if let Some(solar_index) = &self.solar_index
            && !solar_index.exists()
        {
            return Err(Error::configuration(format!(
                "Solar index file does not exist: {}",
                solar_index.display()
            )));
        }

        Ok(())
    }

    /// Build the run configuration, applying CLI overrides on top of the
    /// compiled-in defaults
    pub fn to_config(&self) -> Config {
        let mut config = Config::default();

        if let Some(input_dir) = &self.input_dir {
            config.observation_dir = input_dir.clone();
        }
        if let Some(solar_index) = &self.solar_index {
            config.solar_index_path = solar_index.clone();
        }
        if let Some(output_path) = &self.output_path {
            config.output_path = output_path.clone();
        }

        config
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl Default for ProcessArgs {
    fn default() -> Self {
        Self {
            input_dir: None,
            solar_index: None,
            output_path: None,
            dry_run: false,
            verbose: 0,
            quiet: false,
            output_format: OutputFormat::Human,
        }
    }
}
