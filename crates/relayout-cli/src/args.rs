//! Command-line argument definitions for the Relayout CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the change set to
//! apply, configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Relayout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input diagram snapshot (JSON)
    #[arg(help = "Path to the input diagram snapshot")]
    pub input: String,

    /// Path to the output diagram snapshot (JSON)
    #[arg(short, long, default_value = "out.json")]
    pub output: String,

    /// Path to the changes to apply (JSON with `moved`, `resized` and `startingPosition`)
    #[arg(long)]
    pub changes: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
