//! Fixed model schema of the credit-delinquency dataset.
//!
//! The raw CSV carries a leading row-index column plus these eleven columns;
//! everything downstream works on the canonical selection only.

use crate::error::{PrepError, Result};
use polars::prelude::*;
use std::collections::HashSet;

/// Binary target: serious delinquency within two years.
pub const LABEL: &str = "SeriousDlqin2yrs";
pub const UTILIZATION: &str = "RevolvingUtilizationOfUnsecuredLines";
pub const AGE: &str = "age";
pub const PAST_DUE_30_59: &str = "NumberOfTime30-59DaysPastDueNotWorse";
pub const DEBT_RATIO: &str = "DebtRatio";
pub const MONTHLY_INCOME: &str = "MonthlyIncome";
pub const OPEN_CREDIT_LINES: &str = "NumberOfOpenCreditLinesAndLoans";
pub const TIMES_90_LATE: &str = "NumberOfTimes90DaysLate";
pub const REAL_ESTATE_LOANS: &str = "NumberRealEstateLoansOrLines";
pub const PAST_DUE_60_89: &str = "NumberOfTime60-89DaysPastDueNotWorse";
pub const DEPENDENTS: &str = "NumberOfDependents";

/// Canonical column order: label first, predictors in raw-file order.
pub const MODEL_COLUMNS: [&str; 11] = [
    LABEL,
    UTILIZATION,
    AGE,
    PAST_DUE_30_59,
    DEBT_RATIO,
    MONTHLY_INCOME,
    OPEN_CREDIT_LINES,
    TIMES_90_LATE,
    REAL_ESTATE_LOANS,
    PAST_DUE_60_89,
    DEPENDENTS,
];

/// Delinquency-count columns, in the order their indicator columns are
/// appended to cleaned output.
pub const DELINQUENCY_COLUMNS: [&str; 3] = [PAST_DUE_30_59, PAST_DUE_60_89, TIMES_90_LATE];

/// Check that every model column is present.
///
/// # Errors
///
/// Returns a `Schema` error naming every missing column.
pub fn validate(df: &DataFrame) -> Result<()> {
    let present: HashSet<String> = df
        .get_column_names()
        .iter()
        .map(ToString::to_string)
        .collect();

    let missing: Vec<&str> = MODEL_COLUMNS
        .iter()
        .copied()
        .filter(|name| !present.contains(*name))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(PrepError::Schema(format!(
            "missing required columns: {}",
            missing.join(", ")
        )))
    }
}

/// Project a table onto the canonical model columns, in canonical order.
///
/// Drops the raw file's leading row-index column (whatever it was named)
/// and any derived columns left over from a previous run.
pub fn select_model_columns(df: &DataFrame) -> Result<DataFrame> {
    validate(df)?;
    Ok(df.select(MODEL_COLUMNS)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_validate_reports_missing_columns() -> Result<()> {
        let s1 = Series::new(LABEL.into(), vec![0i64, 1]);
        let s2 = Series::new(AGE.into(), vec![40i64, 55]);
        let df = DataFrame::new(vec![Column::from(s1), Column::from(s2)])?;

        let err = validate(&df).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(MONTHLY_INCOME));
        assert!(msg.contains(DEBT_RATIO));
        assert!(!msg.contains("age,"));
        Ok(())
    }

    #[test]
    fn test_select_drops_row_index_column() -> Result<()> {
        let mut columns = vec![Column::from(Series::new(
            "".into(),
            (0..3).collect::<Vec<i64>>(),
        ))];
        for name in MODEL_COLUMNS {
            columns.push(Column::from(Series::new(name.into(), vec![1i64, 2, 3])));
        }
        let df = DataFrame::new(columns)?;

        let selected = select_model_columns(&df)?;
        assert_eq!(selected.width(), MODEL_COLUMNS.len());
        assert_eq!(
            selected.get_column_names()[0].as_str(),
            LABEL,
            "label must come first"
        );
        Ok(())
    }
}
