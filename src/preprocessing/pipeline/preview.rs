//! Sanity check for a labeled table: split, fit, transform, summarize.

use crate::dataset::split_x_y;
use crate::preprocessing::error::Result;
use crate::preprocessing::feature_table::FeatureTable;
use crate::preprocessing::pipeline::Pipeline;
use crate::preprocessing::traits::FittedTransformer;
use crate::taxonomy::ColumnTaxonomy;
use polars::prelude::DataFrame;
use tracing::info;

/// Shapes and a head of the transformed table.
#[derive(Clone, Debug)]
pub struct PreviewReport {
    /// `(rows, columns)` of the raw feature table.
    pub raw_shape: (usize, usize),
    pub target_len: usize,
    /// `(rows, columns)` after preprocessing.
    pub transformed_shape: (usize, usize),
    pub feature_names: Vec<String>,
    /// First rows of the transformed table.
    pub head: FeatureTable,
}

/// Fit the full pipeline on `df` and report what came out.
pub fn fit_transform_preview(
    df: &DataFrame,
    taxonomy: &ColumnTaxonomy,
    n_rows: usize,
) -> Result<PreviewReport> {
    let (x, y) = split_x_y(df, taxonomy)?;
    let fitted = Pipeline::new(taxonomy)?.fit_xy(&x, Some(&y))?;
    let features = fitted.transform(&x)?;

    let report = PreviewReport {
        raw_shape: (x.height(), x.width()),
        target_len: y.len(),
        transformed_shape: (features.nrows(), features.ncols()),
        feature_names: fitted.feature_names_out(),
        head: features.head(n_rows),
    };
    info!(
        raw_shape = ?report.raw_shape,
        target_len = report.target_len,
        transformed_shape = ?report.transformed_shape,
        "Preview of preprocessing pipeline"
    );
    Ok(report)
}
