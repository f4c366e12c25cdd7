//! Table I/O boundary.
//!
//! The pipeline core never touches files directly; it goes through
//! [`TableStore`], keeping the statistical code independent of storage.

use crate::error::{PrepError, Result, ResultExt as _};
use polars::prelude::*;
use std::path::Path;

/// Whole-table reads and writes, keyed by path.
pub trait TableStore {
    /// Read a table. The path must exist.
    fn read(&self, path: &Path) -> Result<DataFrame>;

    /// Write a table with a header row, overwriting any existing file.
    fn write(&self, df: &mut DataFrame, path: &Path) -> Result<()>;
}

/// CSV-backed [`TableStore`] used by the real pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvStore;

impl TableStore for CsvStore {
    fn read(&self, path: &Path) -> Result<DataFrame> {
        if !path.exists() {
            return Err(PrepError::InvalidPath(format!(
                "file not found: {}",
                path.display()
            )));
        }

        LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_has_header(true)
            .finish()
            .with_context(|| format!("Failed to scan CSV: {}", path.display()))?
            .collect()
            .with_context(|| format!("Failed to read CSV: {}", path.display()))
    }

    fn write(&self, df: &mut DataFrame, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
        CsvWriter::new(file)
            .include_header(true)
            .finish(df)
            .with_context(|| format!("Failed to write CSV file: {}", path.display()))
    }
}
