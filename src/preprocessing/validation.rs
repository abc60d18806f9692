//! Schema validation for input tables.
//!
//! The expected schema is every taxonomy column, plus the target when
//! validating a training table. Extra columns are tolerated here; the
//! group-wise encoder ignores them.

use crate::dataset::columns::{absent_columns, column_names};
use crate::preprocessing::error::{PreprocessingError, Result};
use crate::taxonomy::ColumnTaxonomy;
use polars::prelude::DataFrame;

/// Fail fast if expected columns are missing.
///
/// `require_target = true` for training tables, `false` for inference tables.
///
/// # Errors
/// [`PreprocessingError::MissingColumns`] naming every absent column, sorted.
pub fn validate_columns(
    df: &DataFrame,
    taxonomy: &ColumnTaxonomy,
    require_target: bool,
) -> Result<()> {
    let missing = absent_columns(df, taxonomy.expected_columns(require_target));
    if missing.is_empty() {
        Ok(())
    } else {
        Err(PreprocessingError::MissingColumns(missing))
    }
}

/// Columns of `df` that the taxonomy does not classify (and are not the target).
pub fn unclassified_columns(df: &DataFrame, taxonomy: &ColumnTaxonomy) -> Vec<String> {
    column_names(df)
        .into_iter()
        .filter(|name| !taxonomy.classifies(name))
        .collect()
}
