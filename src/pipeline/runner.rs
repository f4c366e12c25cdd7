//! Pipeline run modes and partition publishing.
//!
//! Three entry points, one per CLI mode. All of them go through the
//! [`TableStore`] boundary for file access and publish partitions
//! all-or-nothing: each table is staged under a temporary name and the
//! temporaries are renamed into place only once every write has succeeded.

use crate::config::PrepConfig;
use crate::error::{Result, ResultExt as _};
use crate::prep::{self, SplitResult, TableStore, schema};
use chrono::{DateTime, Local};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// Report generated after a pipeline run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Rows read from the source table (or loaded split files).
    pub rows_in: usize,

    /// Rows published per partition, in train/val/test order.
    pub partition_rows: [usize; 3],

    /// Columns in each published partition.
    pub columns_out: usize,

    /// When the run started.
    pub started_at: DateTime<Local>,

    /// Wall-clock time of the run.
    pub duration: std::time::Duration,
}

impl RunReport {
    /// One-line completion message.
    pub fn summary(&self) -> String {
        let [train, val, test] = self.partition_rows;
        format!(
            "Run started {}: {} rows in, train/val/test = {train}/{val}/{test}, {} columns out, {:.2}s",
            self.started_at.format("%Y-%m-%d %H:%M:%S"),
            self.rows_in,
            self.columns_out,
            self.duration.as_secs_f64()
        )
    }
}

/// Split the raw dataset and publish the three raw partitions.
pub fn run_split(config: &PrepConfig, store: &dyn TableStore) -> Result<RunReport> {
    let started_at = Local::now();
    let start = Instant::now();
    config.validate()?;

    let table = load_model_table(config, store)?;
    let rows_in = table.height();
    let split = split_table(&table, config)?;

    finish_run(config, store, split, rows_in, started_at, start)
}

/// Full pipeline: split, fit on train, clean and feature every partition,
/// publish the augmented partitions.
pub fn run_full(config: &PrepConfig, store: &dyn TableStore) -> Result<RunReport> {
    let started_at = Local::now();
    let start = Instant::now();
    config.validate()?;

    let table = load_model_table(config, store)?;
    let rows_in = table.height();
    let split = split_table(&table, config)?;
    let processed = transform_partitions(split)?;

    finish_run(config, store, processed, rows_in, started_at, start)
}

/// Clean and feature previously-published split files, re-publishing in
/// place. Falls back to running the split stage when no published split
/// exists yet.
pub fn run_impute(config: &PrepConfig, store: &dyn TableStore) -> Result<RunReport> {
    let started_at = Local::now();
    let start = Instant::now();
    config.validate()?;

    let (split, rows_in) = match load_published_partitions(config, store)? {
        Some(split) => {
            let rows_in: usize = split.heights().iter().sum();
            (split, rows_in)
        }
        None => {
            warn!(
                "No published split under {}; running the split stage first",
                config.out_dir.display()
            );
            let table = load_model_table(config, store)?;
            let rows_in = table.height();
            (split_table(&table, config)?, rows_in)
        }
    };

    let processed = transform_partitions(split)?;
    finish_run(config, store, processed, rows_in, started_at, start)
}

fn finish_run(
    config: &PrepConfig,
    store: &dyn TableStore,
    split: SplitResult,
    rows_in: usize,
    started_at: DateTime<Local>,
    start: Instant,
) -> Result<RunReport> {
    let partition_rows = split.heights();
    let columns_out = split.train.width();

    publish_partitions(config, store, split)?;

    Ok(RunReport {
        rows_in,
        partition_rows,
        columns_out,
        started_at,
        duration: start.elapsed(),
    })
}

fn load_model_table(config: &PrepConfig, store: &dyn TableStore) -> Result<DataFrame> {
    let raw = store.read(&config.input)?;
    let table = schema::select_model_columns(&raw)?;
    info!(
        "Loaded {} rows from {}",
        table.height(),
        config.input.display()
    );
    Ok(table)
}

fn split_table(table: &DataFrame, config: &PrepConfig) -> Result<SplitResult> {
    let split = prep::split_dataset(table, config.test_size, config.val_size, config.seed)?;
    let [train, val, test] = split.heights();
    info!("Split into train/val/test = {train}/{val}/{test} (seed {})", config.seed);
    Ok(split)
}

/// Fit statistics on train, then clean and feature all three partitions
/// with the same fitted values.
fn transform_partitions(split: SplitResult) -> Result<SplitResult> {
    let stats = prep::fit(&split.train)?;
    info!(
        "Fitted train statistics: income median {}, dependents mode {}, debt ratio p99 {:.4}",
        stats.income_median, stats.dependents_mode, stats.debt_ratio_p99
    );

    let train = prep::augment(&prep::clean(&split.train, &stats)?)?;
    let val = prep::augment(&prep::clean(&split.val, &stats)?)?;
    let test = prep::augment(&prep::clean(&split.test, &stats)?)?;

    Ok(SplitResult { train, val, test })
}

/// Load the three published partition files, or `None` if any is missing.
///
/// Loaded tables are projected back to the model columns, so `impute` can
/// re-run over its own augmented output without duplicating columns.
fn load_published_partitions(
    config: &PrepConfig,
    store: &dyn TableStore,
) -> Result<Option<SplitResult>> {
    let paths = config.partition_paths();
    if paths.iter().any(|p| !p.exists()) {
        return Ok(None);
    }

    let [train_path, val_path, test_path] = paths;
    let train = schema::select_model_columns(&store.read(&train_path)?)?;
    let val = schema::select_model_columns(&store.read(&val_path)?)?;
    let test = schema::select_model_columns(&store.read(&test_path)?)?;
    info!(
        "Loaded published split from {} ({}/{}/{} rows)",
        config.out_dir.display(),
        train.height(),
        val.height(),
        test.height()
    );

    Ok(Some(SplitResult { train, val, test }))
}

/// Write all three partitions, then rename them into place.
fn publish_partitions(
    config: &PrepConfig,
    store: &dyn TableStore,
    split: SplitResult,
) -> Result<()> {
    std::fs::create_dir_all(&config.out_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            config.out_dir.display()
        )
    })?;

    let SplitResult { train, val, test } = split;
    let mut staged: Vec<(DataFrame, PathBuf)> = vec![
        (train, config.train_path()),
        (val, config.val_path()),
        (test, config.test_path()),
    ];

    let mut temp_paths: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(staged.len());
    let result = (|| {
        for (df, final_path) in &mut staged {
            let temp = temp_path(final_path);
            store.write(df, &temp)?;
            temp_paths.push((temp, final_path.clone()));
        }
        for (temp, final_path) in &temp_paths {
            std::fs::rename(temp, final_path)
                .with_context(|| format!("Failed to move {} into place", final_path.display()))?;
        }
        Ok(())
    })();

    if result.is_err() {
        for (temp, _) in &temp_paths {
            let _ = std::fs::remove_file(temp);
        }
        return result;
    }

    info!(
        "Published {} to {}",
        staged
            .iter()
            .map(|(_, p)| p
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default())
            .collect::<Vec<_>>()
            .join(", "),
        config.out_dir.display()
    );
    Ok(())
}

fn temp_path(final_path: &Path) -> PathBuf {
    let file_name = final_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    final_path.with_file_name(format!(".{file_name}.{}.tmp", Uuid::new_v4()))
}
