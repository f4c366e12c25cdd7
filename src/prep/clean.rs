//! Partition cleaning.
//!
//! Five ordered steps: drop sentinel-age rows, flag-then-cap the
//! delinquency counts, flag-then-cap utilization, impute the two gappy
//! columns from fitted statistics, and clip `DebtRatio` at the fitted
//! percentile. The same [`FittedStatistics`] value is applied to every
//! partition; nothing here is refit per partition.
//!
//! Each call returns a new `DataFrame`; inputs are never mutated.

use crate::error::Result;
use crate::prep::schema;
use crate::prep::stats::FittedStatistics;
use polars::prelude::*;

/// Values at or above this in a delinquency column are data-entry
/// sentinels (96/98), not counts.
pub const EXTREME_THRESHOLD: i64 = 90;
/// Upper cap applied to delinquency counts after flagging.
pub const DELINQUENCY_CAP: i64 = 10;
/// Upper cap applied to the utilization ratio after flagging.
pub const UTILIZATION_CAP: f64 = 1.0;
/// Suffix of the sentinel indicator columns.
pub const EXTREME_SUFFIX: &str = "_extreme";
/// Indicator column set when utilization exceeded its cap.
pub const OVERUTILIZED: &str = "overutilized";

/// Drop rows whose `age` is a non-positive sentinel.
///
/// A per-row predicate, not a fitted statistic; the fitter applies it as
/// well before computing anything.
pub fn drop_invalid_rows(df: &DataFrame) -> Result<DataFrame> {
    Ok(df
        .clone()
        .lazy()
        .filter(col(schema::AGE).gt(lit(0)))
        .collect()?)
}

/// Apply all cleaning steps to one partition using train-fitted `stats`.
///
/// Appends the four indicator columns
/// (`<delinquency>_extreme` x3, then `overutilized`) after the input
/// columns. `MonthlyIncome` is published as Float64 for every partition.
pub fn clean(df: &DataFrame, stats: &FittedStatistics) -> Result<DataFrame> {
    let valid = drop_invalid_rows(df)?;

    // Indicators are computed from pre-cap values, so they go in a
    // with_columns pass of their own before any cap rewrites a column.
    let mut flags: Vec<Expr> = schema::DELINQUENCY_COLUMNS
        .iter()
        .map(|name| {
            when(col(*name).gt_eq(lit(EXTREME_THRESHOLD)))
                .then(lit(1i32))
                .otherwise(lit(0i32))
                .alias(format!("{name}{EXTREME_SUFFIX}"))
        })
        .collect();
    flags.push(
        when(col(schema::UTILIZATION).gt(lit(UTILIZATION_CAP)))
            .then(lit(1i32))
            .otherwise(lit(0i32))
            .alias(OVERUTILIZED),
    );

    let mut caps: Vec<Expr> = schema::DELINQUENCY_COLUMNS
        .iter()
        .map(|name| cap_upper(col(*name), lit(DELINQUENCY_CAP)).alias(*name))
        .collect();
    caps.push(cap_upper(col(schema::UTILIZATION), lit(UTILIZATION_CAP)).alias(schema::UTILIZATION));

    let fitted = [
        col(schema::MONTHLY_INCOME)
            .cast(DataType::Float64)
            .fill_null(lit(stats.income_median))
            .alias(schema::MONTHLY_INCOME),
        col(schema::DEPENDENTS)
            .fill_null(lit(stats.dependents_mode))
            .alias(schema::DEPENDENTS),
        cap_upper(col(schema::DEBT_RATIO), lit(stats.debt_ratio_p99)).alias(schema::DEBT_RATIO),
    ];

    Ok(valid
        .lazy()
        .with_columns(flags)
        .with_columns(caps)
        .with_columns(fitted)
        .collect()?)
}

/// Upper-only clip; values at or below the cap pass through unchanged.
fn cap_upper(expr: Expr, cap: Expr) -> Expr {
    when(expr.clone().gt(cap.clone())).then(cap).otherwise(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn stats_fixture() -> FittedStatistics {
        FittedStatistics {
            income_median: 5400.0,
            dependents_mode: 1,
            debt_ratio_p99: 2.0,
        }
    }

    /// Four rows: a sentinel-age row, a row tripping every cap, a fully
    /// ordinary row, and a row sitting exactly on each boundary.
    fn partition_fixture() -> Result<DataFrame> {
        let label = Series::new(schema::LABEL.into(), vec![1i64, 0, 0, 1]);
        let age = Series::new(schema::AGE.into(), vec![0i64, 45, 70, 30]);
        let util = Series::new(schema::UTILIZATION.into(), vec![0.5f64, 1.5, 0.3, 1.0]);
        let d30 = Series::new(schema::PAST_DUE_30_59.into(), vec![2i64, 96, 1, 90]);
        let d60 = Series::new(schema::PAST_DUE_60_89.into(), vec![0i64, 98, 0, 10]);
        let d90 = Series::new(schema::TIMES_90_LATE.into(), vec![0i64, 96, 2, 0]);
        let income = Series::new(
            schema::MONTHLY_INCOME.into(),
            vec![Some(5000i64), None, Some(10_000), Some(3000)],
        );
        let dependents = Series::new(
            schema::DEPENDENTS.into(),
            vec![Some(2i64), None, Some(2), Some(0)],
        );
        let debt_ratio = Series::new(schema::DEBT_RATIO.into(), vec![0.2f64, 5.0, 0.4, 2.0]);

        Ok(DataFrame::new(vec![
            Column::from(label),
            Column::from(age),
            Column::from(util),
            Column::from(d30),
            Column::from(d60),
            Column::from(d90),
            Column::from(income),
            Column::from(dependents),
            Column::from(debt_ratio),
        ])?)
    }

    fn i64_values(df: &DataFrame, name: &str) -> Vec<i64> {
        df.column(name)
            .expect("column present")
            .as_materialized_series()
            .i64()
            .expect("i64 column")
            .into_iter()
            .flatten()
            .collect()
    }

    fn i32_values(df: &DataFrame, name: &str) -> Vec<i32> {
        df.column(name)
            .expect("column present")
            .as_materialized_series()
            .i32()
            .expect("i32 column")
            .into_iter()
            .flatten()
            .collect()
    }

    fn f64_values(df: &DataFrame, name: &str) -> Vec<f64> {
        df.column(name)
            .expect("column present")
            .as_materialized_series()
            .f64()
            .expect("f64 column")
            .into_iter()
            .flatten()
            .collect()
    }

    #[test]
    fn test_sentinel_age_rows_are_dropped() -> Result<()> {
        let cleaned = clean(&partition_fixture()?, &stats_fixture())?;
        assert_eq!(cleaned.height(), 3);
        assert_eq!(i64_values(&cleaned, schema::AGE), vec![45, 70, 30]);
        Ok(())
    }

    #[test]
    fn test_delinquency_flag_then_cap() -> Result<()> {
        let cleaned = clean(&partition_fixture()?, &stats_fixture())?;

        // 96 and the boundary value 90 are sentinels; both flag and cap.
        let flag_col = format!("{}{}", schema::PAST_DUE_30_59, EXTREME_SUFFIX);
        assert_eq!(i32_values(&cleaned, &flag_col), vec![1, 0, 1]);
        assert_eq!(i64_values(&cleaned, schema::PAST_DUE_30_59), vec![10, 1, 10]);

        // 98 flags; an exact count of 10 is left alone and not flagged.
        let flag_col = format!("{}{}", schema::PAST_DUE_60_89, EXTREME_SUFFIX);
        assert_eq!(i32_values(&cleaned, &flag_col), vec![1, 0, 0]);
        assert_eq!(i64_values(&cleaned, schema::PAST_DUE_60_89), vec![10, 0, 10]);

        let flag_col = format!("{}{}", schema::TIMES_90_LATE, EXTREME_SUFFIX);
        assert_eq!(i32_values(&cleaned, &flag_col), vec![1, 0, 0]);
        assert_eq!(i64_values(&cleaned, schema::TIMES_90_LATE), vec![10, 2, 0]);
        Ok(())
    }

    #[test]
    fn test_utilization_flag_then_cap() -> Result<()> {
        let cleaned = clean(&partition_fixture()?, &stats_fixture())?;

        // Exactly 1.0 is within bounds: no flag, no rewrite.
        assert_eq!(i32_values(&cleaned, OVERUTILIZED), vec![1, 0, 0]);
        assert_eq!(
            f64_values(&cleaned, schema::UTILIZATION),
            vec![1.0, 0.3, 1.0]
        );
        Ok(())
    }

    #[test]
    fn test_imputation_uses_given_stats() -> Result<()> {
        // The fixture's own income median is nowhere near 5400; the gap
        // must be filled from the passed-in statistics only.
        let cleaned = clean(&partition_fixture()?, &stats_fixture())?;

        assert_eq!(
            f64_values(&cleaned, schema::MONTHLY_INCOME),
            vec![5400.0, 10_000.0, 3000.0]
        );
        assert_eq!(i64_values(&cleaned, schema::DEPENDENTS), vec![1, 2, 0]);
        Ok(())
    }

    #[test]
    fn test_debt_ratio_clipped_at_fitted_p99() -> Result<()> {
        let cleaned = clean(&partition_fixture()?, &stats_fixture())?;
        assert_eq!(
            f64_values(&cleaned, schema::DEBT_RATIO),
            vec![2.0, 0.4, 2.0]
        );
        Ok(())
    }

    #[test]
    fn test_indicator_columns_appended_in_order() -> Result<()> {
        let cleaned = clean(&partition_fixture()?, &stats_fixture())?;
        let names: Vec<String> = cleaned
            .get_column_names()
            .iter()
            .map(ToString::to_string)
            .collect();

        let tail = &names[names.len() - 4..];
        let expected = [
            format!("{}{}", schema::PAST_DUE_30_59, EXTREME_SUFFIX),
            format!("{}{}", schema::PAST_DUE_60_89, EXTREME_SUFFIX),
            format!("{}{}", schema::TIMES_90_LATE, EXTREME_SUFFIX),
            OVERUTILIZED.to_owned(),
        ];
        assert_eq!(tail, expected.as_slice());
        Ok(())
    }
}
