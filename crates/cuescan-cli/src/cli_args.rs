//! CLI argument definitions for the cuescan command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined
//! here, keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};

/// cuescan - cue point reports for split field recorder sessions
#[derive(Parser)]
#[command(name = "cuescan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose trace output (chunk walk, grouping decisions)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report recording groups and their cue points for one directory
    Report {
        /// Directory containing the recorder's WAV files (not descended into)
        #[arg(short, long)]
        dir: String,

        /// Largest start/end gap in seconds for two files to count as one recording
        #[arg(long, default_value_t = cuescan_session::DEFAULT_MAX_GAP_SECONDS)]
        max_gap_secs: f64,

        /// Output machine-readable JSON instead of colored text
        #[arg(long)]
        json: bool,
    },

    /// Inspect the decoded header chunks of a single WAV file
    Inspect {
        /// Path to the WAV file
        #[arg(short, long)]
        input: String,

        /// Output machine-readable JSON instead of colored text
        #[arg(long)]
        json: bool,
    },
}
