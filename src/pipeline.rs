//! Pipeline orchestration for the dataset preparation workflow.
//!
//! The preparation stages in [`crate::prep`] are pure table-in/table-out
//! functions; this module strings them together into the three runnable
//! modes and owns everything stateful about a run: reading the source
//! table, fitting on the training partition only, and publishing the
//! partition files atomically.
//!
//! # Modes
//!
//! - **split**: stratified two-stage split, publishes the raw partitions
//! - **impute**: cleans and features an already-published split in place
//!   (falls back to splitting first when no split exists yet)
//! - **all**: split, clean, and feature in one run
//!
//! # Example: Running the Full Pipeline
//!
//! ```no_run
//! use creditprep::config::PrepConfig;
//! use creditprep::pipeline::run_full;
//! use creditprep::prep::CsvStore;
//!
//! let config = PrepConfig::default();
//! let report = run_full(&config, &CsvStore)?;
//! println!("{}", report.summary());
//! # Ok::<(), creditprep::error::PrepError>(())
//! ```

pub mod runner;

pub use runner::{RunReport, run_full, run_impute, run_split};
