//! Dataset helpers: splitting a labeled table into features and target,
//! typed column access, and a synthetic Ames-like table.
//!
//! # Core Concepts
//!
//! - **Raw features `X`**: the labeled table minus the target column only.
//!   Dropped columns are deliberately still present; removing them is the
//!   pipeline's job, not the caller's.
//! - **Target `y`**: a copy of the target column.
//!
//! # Example
//!
//! ```ignore
//! use ames_prep::dataset::split_x_y;
//! use ames_prep::taxonomy::ColumnTaxonomy;
//!
//! let taxonomy = ColumnTaxonomy::ames();
//! let (x, y) = split_x_y(&df, &taxonomy)?;
//! assert_eq!(x.width(), df.width() - 1);
//! ```

pub mod columns;
pub mod synthetic;

pub use columns::ColumnValues;

use crate::preprocessing::error::{PreprocessingError, Result};
use crate::preprocessing::validation::{unclassified_columns, validate_columns};
use crate::taxonomy::ColumnTaxonomy;
use ndarray::Array1;
use polars::prelude::*;
use tracing::debug;

/// Split a labeled table into raw features and target.
///
/// Validates the full schema (target required) first.
///
/// # Errors
/// [`PreprocessingError::MissingColumns`] listing every absent column.
pub fn split_x_y(df: &DataFrame, taxonomy: &ColumnTaxonomy) -> Result<(DataFrame, Series)> {
    validate_columns(df, taxonomy, true)?;
    let extra = unclassified_columns(df, taxonomy);
    if !extra.is_empty() {
        debug!(columns = ?extra, "Columns outside the taxonomy will be ignored");
    }

    let x = df.drop(&taxonomy.target)?;
    let y = df
        .column(&taxonomy.target)?
        .as_materialized_series()
        .clone();
    Ok((x, y))
}

/// Convert a target series into a dense vector, rejecting missing values.
pub fn target_values(y: &Series) -> Result<Array1<f64>> {
    let cast = y.strict_cast(&DataType::Float64)?;
    let values: Vec<Option<f64>> = cast
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();

    let missing = values.iter().filter(|v| v.is_none()).count();
    if missing > 0 {
        return Err(PreprocessingError::MissingTarget {
            column: y.name().to_string(),
            count: missing,
        });
    }
    Ok(values.into_iter().flatten().collect())
}
