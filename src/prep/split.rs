//! Stratified train/validation/test splitting.
//!
//! The split runs in two stages: stage one removes the test fraction from
//! the full table, stage two divides the remainder into train and
//! validation using a ratio rescaled for the rows already removed. Both
//! stages stratify on the label column and draw from a `StdRng` seeded with
//! the configured seed, so identical inputs produce identical membership.

use crate::error::{PrepError, Result};
use crate::prep::schema;
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng as _, SeedableRng as _};
use std::collections::BTreeMap;

/// Train/validation/test partitions of one dataset.
#[derive(Debug, Clone)]
pub struct SplitResult {
    pub train: DataFrame,
    pub val: DataFrame,
    pub test: DataFrame,
}

impl SplitResult {
    /// Row counts in train/val/test order.
    pub fn heights(&self) -> [usize; 3] {
        [self.train.height(), self.val.height(), self.test.height()]
    }
}

/// Partition `df` into stratified train/val/test sets.
///
/// `test_size` and `val_size` are fractions of the *input* table; the
/// validation ratio is adjusted internally to `val_size / (1 - test_size)`
/// because stage two only sees the post-test remainder.
///
/// # Errors
///
/// Fails with `Config` for fractions outside `(0, 1)`, `Stratification` if
/// any label class has fewer than 2 rows in a table being split, and
/// `DataProcessing` if the label column contains missing values.
pub fn split_dataset(
    df: &DataFrame,
    test_size: f64,
    val_size: f64,
    seed: u64,
) -> Result<SplitResult> {
    fraction_in_unit("test_size", test_size)?;
    fraction_in_unit("val_size", val_size)?;

    let (rest, test) = stratified_take(df, test_size, seed)?;

    // Rescale against the remainder so the final validation share of the
    // whole table is still val_size.
    let val_ratio = val_size / (1.0 - test_size);
    fraction_in_unit("adjusted validation ratio", val_ratio)?;

    let (train, val) = stratified_take(&rest, val_ratio, seed)?;

    Ok(SplitResult { train, val, test })
}

fn fraction_in_unit(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(PrepError::Config(format!(
            "{name} must be in (0, 1), got {value}"
        )))
    }
}

/// Remove a stratified `fraction` of rows, returning `(remainder, taken)`.
fn stratified_take(df: &DataFrame, fraction: f64, seed: u64) -> Result<(DataFrame, DataFrame)> {
    let label = df
        .column(schema::LABEL)?
        .as_materialized_series()
        .cast(&DataType::Int64)?;
    let label = label.i64()?;

    // Class order is fixed by the BTreeMap, so the rng stream is consumed
    // identically on every run.
    let mut by_class: BTreeMap<i64, Vec<u32>> = BTreeMap::new();
    for (idx, value) in label.into_iter().enumerate() {
        let Some(value) = value else {
            return Err(PrepError::DataProcessing(format!(
                "label column {} contains missing values",
                schema::LABEL
            )));
        };
        by_class.entry(value).or_default().push(idx as u32);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut rest_idx: Vec<u32> = Vec::new();
    let mut taken_idx: Vec<u32> = Vec::new();

    for (class, mut indices) in by_class {
        let n = indices.len();
        if n < 2 {
            return Err(PrepError::Stratification(format!(
                "label class {class} has {n} row(s); at least 2 are required to stratify"
            )));
        }

        // Fisher-Yates shuffle; the taken side comes off the shuffled tail.
        for i in (1..n).rev() {
            let j = rng.gen_range(0..=i);
            indices.swap(i, j);
        }

        let n_taken = ((n as f64) * fraction).round() as usize;
        let n_taken = n_taken.clamp(1, n - 1);
        let split_at = n - n_taken;
        rest_idx.extend_from_slice(&indices[..split_at]);
        taken_idx.extend_from_slice(&indices[split_at..]);
    }

    // Keep the input's relative row order within each partition.
    rest_idx.sort_unstable();
    taken_idx.sort_unstable();

    let rest = df.take(&UInt32Chunked::from_vec("idx".into(), rest_idx))?;
    let taken = df.take(&UInt32Chunked::from_vec("idx".into(), taken_idx))?;
    Ok((rest, taken))
}
