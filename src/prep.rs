//! Dataset preparation core: schema, splitting, fitting, cleaning and
//! feature derivation for the credit-delinquency table.
//!
//! # Overview
//!
//! Data flows one way through the submodules:
//!
//! ```text
//! raw table ─ schema::select_model_columns ─> canonical table
//!          ─ split::split_dataset ─────────> train / val / test
//!          ─ stats::fit(train) ────────────> FittedStatistics
//!          ─ clean::clean(partition, stats)─> cleaned partitions
//!          ─ features::augment ────────────> feature-augmented partitions
//! ```
//!
//! Statistics are fitted on the train partition only and then applied
//! unchanged to validation and test; that boundary is the point of the
//! whole module. Every step returns a new `DataFrame` instead of mutating
//! its input.
//!
//! # Example
//!
//! ```no_run
//! use creditprep::prep::{self, CsvStore, TableStore as _};
//! use std::path::Path;
//!
//! # fn main() -> creditprep::error::Result<()> {
//! let store = CsvStore;
//! let raw = store.read(Path::new("data/raw/cs-training.csv"))?;
//! let table = prep::schema::select_model_columns(&raw)?;
//!
//! let split = prep::split_dataset(&table, 0.15, 0.15, 42)?;
//! let stats = prep::fit(&split.train)?;
//! let train = prep::augment(&prep::clean(&split.train, &stats)?)?;
//! # Ok(())
//! # }
//! ```

pub mod clean;
pub mod features;
pub mod io;
pub mod schema;
pub mod split;
pub mod stats;

pub use clean::{clean, drop_invalid_rows};
pub use features::augment;
pub use io::{CsvStore, TableStore};
pub use split::{SplitResult, split_dataset};
pub use stats::{FittedStatistics, fit};
