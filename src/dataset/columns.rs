//! Typed access to single columns of a `polars` frame.
//!
//! Encoders work on plain vectors of optional values rather than on polars
//! series so that the fit/transform logic stays independent of the table
//! library. `NaN` is treated as missing, like a null.

use crate::preprocessing::error::{PreprocessingError, Result};
use polars::prelude::*;

/// Values of one column, tagged by how the column is interpreted.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnValues {
    /// Continuous or integer-coded values.
    Numeric(Vec<Option<f64>>),
    /// Category labels.
    Categorical(Vec<Option<String>>),
}

impl ColumnValues {
    /// Read `name` as numbers. Integer columns are widened to `f64`;
    /// values that cannot be cast raise the underlying polars error.
    pub fn numeric(df: &DataFrame, name: &str) -> Result<Self> {
        let series = lookup(df, name)?.strict_cast(&DataType::Float64)?;
        let values = series
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect();
        Ok(ColumnValues::Numeric(values))
    }

    /// Read `name` as category labels. Non-string columns are cast to strings.
    pub fn categorical(df: &DataFrame, name: &str) -> Result<Self> {
        let series = lookup(df, name)?;
        let series = if series.dtype() == &DataType::String {
            series.clone()
        } else {
            series.cast(&DataType::String)?
        };
        let values = series
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect();
        Ok(ColumnValues::Categorical(values))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Numeric(v) => v.len(),
            ColumnValues::Categorical(v) => v.len(),
        }
    }

    /// Whether there are no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of missing entries.
    pub fn null_count(&self) -> usize {
        match self {
            ColumnValues::Numeric(v) => v.iter().filter(|x| x.is_none()).count(),
            ColumnValues::Categorical(v) => v.iter().filter(|x| x.is_none()).count(),
        }
    }

    /// Short name of the value kind, for messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ColumnValues::Numeric(_) => "numeric",
            ColumnValues::Categorical(_) => "categorical",
        }
    }
}

fn lookup<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series> {
    df.column(name)
        .map(|c| c.as_materialized_series())
        .map_err(|_| PreprocessingError::missing_columns([name]))
}

/// Whether `df` has a column called `name`.
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}

/// The subset of `names` that `df` lacks, sorted and deduplicated.
pub fn absent_columns<'a, I>(df: &DataFrame, names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut missing: Vec<String> = names
        .into_iter()
        .filter(|name| !has_column(df, name))
        .map(str::to_string)
        .collect();
    missing.sort();
    missing.dedup();
    missing
}

/// Names of all columns of `df`, in frame order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_columns().iter().map(|c| c.name().to_string()).collect()
}
