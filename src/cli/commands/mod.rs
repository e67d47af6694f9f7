//! Command implementations for the Swarm processor CLI
//!
//! Dispatches CLI arguments to the command modules and re-exports the
//! shared run statistics type.

pub mod process;
pub mod shared;

pub use shared::ProcessingStats;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Main command runner for the Swarm processor
///
/// Dispatches to the appropriate subcommand handler based on CLI args.
pub fn run(args: Args) -> Result<ProcessingStats> {
    match args.get_command() {
        Commands::Process(process_args) => process::run_process(process_args),
    }
}
