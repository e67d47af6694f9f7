use clap::Parser;
use std::process;
use swarm_processor::cli::{args::Args, commands};

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(_stats) => {
            // Success - the summary has already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Swarm Processor - TEC Observation Enrichment");
    println!("============================================");
    println!();
    println!("Join Swarm satellite TEC observation files with daily F10.7 solar flux");
    println!("readings and annotate every observation with a modeled electron density.");
    println!();
    println!("USAGE:");
    println!("    swarm-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    process     Process observation files into the annotated output file");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Process with the compiled-in default paths:");
    println!("    swarm-processor process");
    println!();
    println!("    # Process with explicit paths:");
    println!("    swarm-processor process --input _C --solar-index f107.csv \\");
    println!("                            --output Result_SWARM_C.txt");
    println!();
    println!("    # Preview a run without writing output:");
    println!("    swarm-processor process --dry-run -v");
    println!();
    println!("For detailed help, use:");
    println!("    swarm-processor process --help");
}
