//! Command-line argument definitions for the lisvg CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, the layout direction, and logging verbosity.

use clap::Parser;

use lisvg::direction::Direction;

/// Command-line arguments for the lisvg diagram compiler
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input diagram; `-` or omitted reads stdin
    pub input: Option<String>,

    /// Path to the output SVG file; `-` writes to stdout
    ///
    /// Defaults to the input path with an `.svg` extension, or stdout when
    /// reading stdin.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Layout direction (top-to-bottom, bottom-to-top, left-to-right, right-to-left)
    #[arg(long)]
    pub direction: Option<Direction>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
