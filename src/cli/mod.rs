//! CLI Module
//!
//! Command-line front end for the Loudscope analysis engine. This is the only
//! part of the crate that touches the file system.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Loudscope - loudness and stereo-field analysis for WAV files
#[derive(Parser, Debug)]
#[command(name = "loudscope")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Analyzer configuration file (JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a WAV file
    #[command(name = "analyze")]
    Analyze {
        /// Path to the WAV file
        input: PathBuf,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare the analyses of two WAV files
    #[command(name = "compare")]
    Compare {
        /// Reference file
        a: PathBuf,

        /// File to compare against the reference
        b: PathBuf,
    },

    /// Check integrated loudness against platform targets
    #[command(name = "compliance")]
    Compliance {
        /// Path to the WAV file
        input: PathBuf,

        /// Single platform to check (default: all)
        #[arg(short, long)]
        platform: Option<String>,
    },

    /// Analyze every WAV file below a directory
    #[command(name = "batch")]
    Batch {
        /// Directory to scan
        dir: PathBuf,

        /// Print one JSON object per file
        #[arg(long)]
        json: bool,
    },
}
