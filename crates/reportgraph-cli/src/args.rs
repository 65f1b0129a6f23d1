//! Command-line argument definitions for the reportgraph CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the catalog and report, list the
//! interactions to replay, and control output, configuration and logging.

use clap::Parser;

use crate::script::Action;

/// Command-line arguments for the reportgraph inspector
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the report catalog (TOML)
    #[arg(help = "Path to the catalog file")]
    pub input: String,

    /// Id of the report to lay out
    #[arg(short, long)]
    pub report: String,

    /// Interaction to replay, in order (e.g. `activate:MA001`, `drag:GUV001:30:-10`)
    #[arg(short, long = "action", value_parser = Action::parse)]
    pub actions: Vec<Action>,

    /// Path to the output file; the outline goes to stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
