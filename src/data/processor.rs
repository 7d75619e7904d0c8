//! Data Processor Module
//! Frame-level filtering and grouping shared by the aggregators.

use crate::data::dataset::{AGE, PROFESSION};
use polars::prelude::*;
use std::collections::BTreeSet;

/// Name of the count column produced by [`DataProcessor::count_by`].
pub const COUNT: &str = "count";

/// Handles filtering and group counting on customer frames.
pub struct DataProcessor;

impl DataProcessor {
    /// Keep rows whose profession equals `profession` exactly.
    pub fn filter_by_profession(df: &DataFrame, profession: &str) -> PolarsResult<DataFrame> {
        df.clone()
            .lazy()
            .filter(col(PROFESSION).eq(lit(profession)))
            .collect()
    }

    /// Keep rows with `min <= age <= max`.
    pub fn filter_by_age_range(df: &DataFrame, min: u32, max: u32) -> PolarsResult<DataFrame> {
        df.clone()
            .lazy()
            .filter(
                col(AGE)
                    .gt_eq(lit(i64::from(min)))
                    .and(col(AGE).lt_eq(lit(i64::from(max)))),
            )
            .collect()
    }

    /// Group by `keys` and count rows per group.
    ///
    /// Output columns: `keys..., "count"`. Only groups with at least one row
    /// appear.
    pub fn count_by(df: &DataFrame, keys: &[&str]) -> PolarsResult<DataFrame> {
        let key_exprs: Vec<Expr> = keys.iter().map(|key| col(*key)).collect();
        df.clone()
            .lazy()
            .group_by(key_exprs)
            .agg([len().alias(COUNT)])
            .collect()
    }

    /// Distinct non-null values of a string column, sorted.
    pub fn unique_values(df: &DataFrame, column: &str) -> PolarsResult<Vec<String>> {
        let values = Self::str_column(df, column)?;
        let distinct: BTreeSet<&str> = values.into_iter().flatten().collect();
        Ok(distinct.into_iter().map(str::to_string).collect())
    }

    /// Borrow a column as strings.
    pub fn str_column<'a>(df: &'a DataFrame, column: &str) -> PolarsResult<&'a StringChunked> {
        df.column(column)?.str()
    }

    /// Read the count column of a grouped frame.
    pub fn count_column(df: &DataFrame) -> PolarsResult<Vec<u64>> {
        let counts = df.column(COUNT)?.cast(&DataType::UInt64)?;
        let counts = counts.u64()?;
        Ok(counts.into_iter().map(|v| v.unwrap_or(0)).collect())
    }

    /// Read a column as `f64`, keeping nulls as `None`.
    pub fn f64_column(df: &DataFrame, column: &str) -> PolarsResult<Vec<Option<f64>>> {
        let values = df.column(column)?.cast(&DataType::Float64)?;
        let values = values.f64()?;
        Ok(values.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::{customers_frame, CustomerRecord};

    fn frame() -> DataFrame {
        customers_frame(&[
            CustomerRecord::new("Engineer", "Jakarta", "Male", 30, "Millennial"),
            CustomerRecord::new("Engineer", "Jakarta", "Female", 45, "Gen X"),
            CustomerRecord::new("Teacher", "Bali", "Male", 25, "Gen Z"),
            CustomerRecord::new("Doctor", "Bali", "Female", 50, "Gen X"),
        ])
        .unwrap()
    }

    #[test]
    fn filters_profession_by_exact_match() {
        let df = frame();
        assert_eq!(DataProcessor::filter_by_profession(&df, "Engineer").unwrap().height(), 2);
        assert_eq!(DataProcessor::filter_by_profession(&df, "engineer").unwrap().height(), 0);
    }

    #[test]
    fn age_filter_is_inclusive_on_both_bounds() {
        let df = frame();
        assert_eq!(DataProcessor::filter_by_age_range(&df, 25, 50).unwrap().height(), 4);
        assert_eq!(DataProcessor::filter_by_age_range(&df, 30, 45).unwrap().height(), 2);
        assert_eq!(DataProcessor::filter_by_age_range(&df, 46, 49).unwrap().height(), 0);
    }

    #[test]
    fn count_by_counts_each_group() {
        let grouped = DataProcessor::count_by(&frame(), &[PROFESSION]).unwrap();
        let names = DataProcessor::str_column(&grouped, PROFESSION).unwrap();
        let counts = DataProcessor::count_column(&grouped).unwrap();

        let mut pairs: Vec<(String, u64)> = names
            .into_iter()
            .zip(counts)
            .map(|(name, count)| (name.unwrap().to_string(), count))
            .collect();
        pairs.sort();

        assert_eq!(
            pairs,
            vec![
                ("Doctor".to_string(), 1),
                ("Engineer".to_string(), 2),
                ("Teacher".to_string(), 1)
            ]
        );
    }

    #[test]
    fn unique_values_are_sorted() {
        let values = DataProcessor::unique_values(&frame(), PROFESSION).unwrap();
        assert_eq!(values, ["Doctor", "Engineer", "Teacher"]);
    }
}
