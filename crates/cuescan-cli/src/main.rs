//! cuescan - cue point reports for split field recorder sessions.
//!
//! This binary scans a directory of recorder WAV files, reassembles
//! recordings that were split at the recorder's file-size limit, and
//! reports every embedded cue point on the reassembled timeline.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use cuescan_cli::cli_args::{Cli, Commands};
use cuescan_cli::commands;

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Report {
            dir,
            max_gap_secs,
            json,
        } => commands::report::run(Path::new(&dir), max_gap_secs, json),
        Commands::Inspect { input, json } => commands::inspect::run(Path::new(&input), json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

/// Installs the tracing subscriber; `--verbose` lowers the filter to
/// debug so the library crates narrate the chunk walk and every
/// continuation decision.
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_writer(std::io::stderr)
        .init();
}
