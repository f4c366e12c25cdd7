//! Centralized error handling for the creditprep pipeline.
//!
//! Failures are modelled as one `enum` so callers can match on the category
//! instead of parsing strings:
//!
//! ```
//! use creditprep::error::PrepError;
//!
//! fn describe(err: &PrepError) -> String {
//!     match err {
//!         PrepError::Stratification(msg) => format!("cannot stratify: {msg}"),
//!         PrepError::Schema(msg) => format!("bad input schema: {msg}"),
//!         other => other.to_string(),
//!     }
//! }
//! ```
//!
//! `From` impls let the `?` operator lift `std::io`, Polars and serde errors
//! into [`PrepError`] without boilerplate:
//!
//! ```no_run
//! use creditprep::error::Result;
//! use std::fs;
//!
//! fn read_manifest(path: &str) -> Result<String> {
//!     let content = fs::read_to_string(path)?;
//!     Ok(content)
//! }
//! ```
//!
//! The [`ResultExt`] trait adds `.context()` so call sites can annotate a
//! failure while staying inside the typed error.

use std::fmt;

/// Main error type for creditprep operations.
#[derive(Debug)]
pub enum PrepError {
    /// I/O errors (file operations, directory creation, etc.)
    Io(std::io::Error),

    /// Data processing errors (Polars, parsing, etc.)
    DataProcessing(String),

    /// Required column missing or unusable in the input table
    Schema(String),

    /// A label class is too small to split with stratification
    Stratification(String),

    /// Configuration errors
    Config(String),

    /// File not found or invalid path
    InvalidPath(String),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for PrepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::Schema(msg) => write!(f, "Schema error: {msg}"),
            Self::Stratification(msg) => write!(f, "Stratification error: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::InvalidPath(msg) => write!(f, "Invalid path: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PrepError {}

impl From<std::io::Error> for PrepError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<anyhow::Error> for PrepError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<serde_json::Error> for PrepError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for PrepError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

/// Result type alias for creditprep operations.
pub type Result<T> = std::result::Result<T, PrepError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<PrepError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: PrepError = e.into();
            PrepError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: PrepError = e.into();
            PrepError::Other(format!("{}: {}", f(), err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PrepError::Schema("missing column: MonthlyIncome".to_owned());
        assert_eq!(err.to_string(), "Schema error: missing column: MonthlyIncome");
    }

    #[test]
    fn test_stratification_display() {
        let err = PrepError::Stratification("label class 1 has 1 row".to_owned());
        assert!(err.to_string().starts_with("Stratification error"));
    }

    #[test]
    fn test_result_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "cs-training.csv",
        ));

        let result: Result<()> = result.context("Failed to read input");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read input")
        );
    }
}
