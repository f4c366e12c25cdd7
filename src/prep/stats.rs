//! Train-only summary statistics.
//!
//! Everything the cleaner imputes or clips with is computed here, from the
//! train partition alone, and then applied unchanged to all three
//! partitions. Validation and test rows never reach a fit.

use crate::error::{PrepError, Result};
use crate::prep::clean;
use crate::prep::schema;
use polars::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

/// Immutable statistics fitted once on the train partition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FittedStatistics {
    /// Median of non-missing `MonthlyIncome`.
    pub income_median: f64,
    /// Most frequent non-missing `NumberOfDependents`; ties go to the
    /// smallest value.
    pub dependents_mode: i64,
    /// 99th percentile of `DebtRatio` (linear interpolation).
    pub debt_ratio_p99: f64,
}

/// Fit statistics from the train partition.
///
/// The row-validity filter runs first, so sentinel-age rows never
/// influence a statistic; the percentile in particular must only see rows
/// that survive cleaning.
///
/// # Errors
///
/// Fails if a source column has no non-missing values to fit from.
pub fn fit(train: &DataFrame) -> Result<FittedStatistics> {
    let train = clean::drop_invalid_rows(train)?;

    let income = column_f64(&train, schema::MONTHLY_INCOME)?;
    let income_median = income
        .median()
        .ok_or_else(|| no_values(schema::MONTHLY_INCOME))?;

    let dependents_mode = mode_smallest(&train, schema::DEPENDENTS)?;

    let debt_ratio = column_f64(&train, schema::DEBT_RATIO)?;
    let debt_ratio_p99 = debt_ratio
        .quantile(0.99, QuantileMethod::Linear)?
        .ok_or_else(|| no_values(schema::DEBT_RATIO))?;

    Ok(FittedStatistics {
        income_median,
        dependents_mode,
        debt_ratio_p99,
    })
}

fn column_f64(df: &DataFrame, name: &str) -> Result<Float64Chunked> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(series.f64()?.clone())
}

/// Most frequent value; ties broken by the smallest value, independent of
/// hash order.
fn mode_smallest(df: &DataFrame, name: &str) -> Result<i64> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Int64)?;
    let ca = series.i64()?;

    let mut freq: HashMap<i64, usize> = HashMap::new();
    for value in ca.into_iter().flatten() {
        *freq.entry(value).or_default() += 1;
    }

    freq.into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
        .map(|(value, _)| value)
        .ok_or_else(|| no_values(name))
}

fn no_values(name: &str) -> PrepError {
    PrepError::DataProcessing(format!("column {name} has no non-missing values to fit"))
}
