//! Derived feature columns.
//!
//! Row-local arithmetic over already-cleaned columns; no fitted statistics
//! are involved. Runs strictly after the cleaner because the delinquency
//! addends and `DebtRatio` must be their capped values.

use crate::error::Result;
use crate::prep::schema;
use polars::prelude::*;

pub const MONTHLY_DEBT: &str = "MonthlyDebt";
pub const IS_SENIOR_CITIZEN: &str = "IsSeniorCitizen";
pub const DELINQUENCY_TOTAL: &str = "DelinquencyTotal";

/// Ages strictly above this count as senior.
pub const SENIOR_AGE: i64 = 60;

/// Append the three derived columns to a cleaned partition.
pub fn augment(df: &DataFrame) -> Result<DataFrame> {
    let [d30, d60, d90] = schema::DELINQUENCY_COLUMNS;

    Ok(df
        .clone()
        .lazy()
        .with_columns([
            (col(schema::DEBT_RATIO) * col(schema::MONTHLY_INCOME)).alias(MONTHLY_DEBT),
            when(col(schema::AGE).gt(lit(SENIOR_AGE)))
                .then(lit(1i32))
                .otherwise(lit(0i32))
                .alias(IS_SENIOR_CITIZEN),
            (col(d30) + col(d60) + col(d90)).alias(DELINQUENCY_TOTAL),
        ])
        .collect()?)
}
