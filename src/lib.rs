//! # Creditprep - Credit Delinquency Dataset Preparation
//!
//! Creditprep turns the raw "serious delinquency in two years" credit CSV
//! into leakage-free train/validation/test tables ready for modelling. The
//! whole pipeline is deterministic: one seed fixes partition membership, and
//! every statistic used for cleaning is fitted on the training partition
//! alone.
//!
//! ## Quick Start
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
//!
//! ## Core Modules
//!
//! - [`prep`]: The preparation stages as pure table functions
//!   - [`prep::schema`]: Expected column set and projection
//!   - [`prep::split`]: Seeded two-stage stratified splitting
//!   - [`prep::stats`]: Statistics fitted on the training partition
//!   - [`prep::clean`]: Outlier handling and imputation
//!   - [`prep::features`]: Derived model features
//! - [`pipeline`]: Run modes and atomic partition publishing
//! - [`config`]: Run settings (paths, split fractions, seed)
//! - [`error`]: Error types and handling utilities
//!
//! ## Key Concepts
//!
//! ### Fit on Train, Apply Everywhere
//!
//! Cleaning needs data-derived values (an income median, a dependants mode,
//! a debt-ratio cap). Those are computed once from the training partition
//! and passed into the cleaning of all three partitions:
//!
//! ```no_run
//! use creditprep::prep::{self, CsvStore, TableStore as _, schema};
//! use std::path::Path;
//!
//! let raw = CsvStore.read(Path::new("data/raw/cs-training.csv"))?;
//! let table = schema::select_model_columns(&raw)?;
//! let split = prep::split_dataset(&table, 0.15, 0.15, 42)?;
//!
//! let stats = prep::fit(&split.train)?;
//! let test = prep::augment(&prep::clean(&split.test, &stats)?)?;
//! # Ok::<(), creditprep::error::PrepError>(())
//! ```
//!
//! ### Pure Stages
//!
//! Each stage takes a [`polars::prelude::DataFrame`] and returns a new one;
//! nothing touches the filesystem except the [`prep::io::TableStore`]
//! implementations and the publishing step in [`pipeline`]. That keeps every
//! stage unit-testable on in-memory tables.
//!
//! ### Type-Safe Error Handling
//!
//! All fallible operations return [`error::Result`]. Categories that callers
//! are expected to branch on (schema problems, stratification failures) are
//! separate [`error::PrepError`] variants rather than message strings.

#![warn(clippy::all, rust_2018_idioms)]
// Uncomment to see which items need documentation:
// #![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod prep;
