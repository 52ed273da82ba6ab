//! lisvg CLI library
//!
//! This module contains the core CLI logic for the lisvg diagram compiler.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::info;

use lisvg::{DiagramBuilder, LisvgError};

/// Marker used on the command line for stdin and stdout.
const STDIO: &str = "-";

/// Where the diagram source is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

/// Where the rendered SVG is written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Stdout,
    File(PathBuf),
}

impl Args {
    /// Resolves the input argument.
    pub fn input(&self) -> Input {
        match self.input.as_deref() {
            None | Some(STDIO) => Input::Stdin,
            Some(path) => Input::File(PathBuf::from(path)),
        }
    }

    /// Resolves the output argument.
    ///
    /// Without an explicit output, a file input is rendered next to itself
    /// with an `.svg` extension and stdin input goes to stdout.
    pub fn output(&self) -> Output {
        match (self.output.as_deref(), self.input()) {
            (Some(STDIO), _) | (None, Input::Stdin) => Output::Stdout,
            (Some(path), _) => Output::File(PathBuf::from(path)),
            (None, Input::File(path)) => Output::File(path.with_extension("svg")),
        }
    }
}

/// Run the lisvg CLI application
///
/// This function processes the input through the lisvg pipeline
/// and writes the resulting SVG to the output.
///
/// # Errors
///
/// Returns `LisvgError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Validation errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), LisvgError> {
    let input = args.input();
    let output = args.output();
    info!(input:?, output:?; "Processing diagram");

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(direction) = args.direction {
        app_config = app_config.with_direction(direction);
    }

    let source = match &input {
        Input::Stdin => io::read_to_string(io::stdin())?,
        Input::File(path) => fs::read_to_string(path)?,
    };

    let builder = DiagramBuilder::new(app_config);
    let svg = builder.compile(&source)?;

    match &output {
        Output::Stdout => write_stdout(&svg)?,
        Output::File(path) => write_file(path, &svg)?,
    }

    info!(output:?; "SVG exported successfully");

    Ok(())
}

fn write_stdout(svg: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(svg.as_bytes())?;
    stdout.write_all(b"\n")?;
    stdout.flush()
}

fn write_file(path: &Path, svg: &str) -> io::Result<()> {
    fs::write(path, svg)
}
