//! # Creditprep Entry Point
//!
//! Command-line entry point for the dataset preparation pipeline.
//!
//! ## Application Flow
//!
//! ```text
//! main()
//!   │
//!   ├─> Install tracing subscriber (RUST_LOG, default "info")
//!   │
//!   ├─> Parse CLI arguments (clap)
//!   │
//!   └─> Dispatch the requested mode:
//!       ├─> split   — stratified split, raw partitions
//!       ├─> impute  — clean + feature a published split
//!       └─> all     — full pipeline in one run
//! ```
//!
//! ## Usage
//!
//! ```bash
//! creditprep all
//! creditprep split --input data/raw/cs-training.csv --out-dir data/processed
//! creditprep impute --config prep.json
//! ```
//!
//! ## Error Handling
//!
//! Any failure — unreadable input, missing columns, a label class too small
//! to stratify — propagates here, is printed to stderr, and the process
//! exits non-zero. Nothing is published on failure.

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stdout)] // Allow println! in main binary

// Private module - only accessible within this binary
mod cli;

use anyhow::Result;
use clap::Parser as _;

/// Main entry point for the creditprep binary.
///
/// # Errors
///
/// Returns error if:
/// - the tracing subscriber cannot be installed
/// - command-line arguments are invalid
/// - the selected pipeline mode fails
fn main() -> Result<()> {
    creditprep::logging::init()?;

    let cli = cli::Cli::parse();
    cli::run_command(cli)?;

    Ok(())
}
