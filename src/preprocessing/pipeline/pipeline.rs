//! Pipeline implementation.

use crate::preprocessing::column_transformer::{ColumnTransformer, FittedColumnTransformer};
use crate::preprocessing::drop::ColumnDropper;
use crate::preprocessing::error::{PreprocessingError, Result};
use crate::preprocessing::feature_table::FeatureTable;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use crate::taxonomy::ColumnTaxonomy;
use polars::prelude::{DataFrame, Series};
use std::collections::HashSet;
use tracing::{debug, info};

/// Unfitted preprocessing pipeline.
///
/// The target is accepted by [`Pipeline::fit_xy`] for interface uniformity
/// with supervised wrappers but never used to learn preprocessing state.
#[derive(Clone, Debug)]
pub struct Pipeline {
    dropper: ColumnDropper,
    encoder: ColumnTransformer,
}

impl Pipeline {
    /// Build the drop → encode pipeline described by `taxonomy`.
    ///
    /// # Errors
    /// [`PreprocessingError::InvalidTaxonomy`] if the groups overlap or the
    /// target is listed in a group.
    pub fn new(taxonomy: &ColumnTaxonomy) -> Result<Self> {
        taxonomy.validate()?;
        Ok(Self {
            dropper: ColumnDropper::new(taxonomy.dropped.iter().cloned()),
            encoder: ColumnTransformer::from_taxonomy(taxonomy),
        })
    }

    /// Assemble a pipeline from explicit stages.
    pub fn from_parts(dropper: ColumnDropper, encoder: ColumnTransformer) -> Self {
        Self { dropper, encoder }
    }

    pub fn dropper(&self) -> &ColumnDropper {
        &self.dropper
    }

    pub fn encoder(&self) -> &ColumnTransformer {
        &self.encoder
    }

    /// Fit on raw features `x`; `y`, if given, must have one value per row.
    ///
    /// # Errors
    /// - [`PreprocessingError::ShapeMismatch`] if `y` and `x` lengths differ
    /// - [`PreprocessingError::InvalidTaxonomy`] if a dropped column is also grouped
    /// - [`PreprocessingError::MissingColumns`] if a grouped column is absent
    pub fn fit_xy(&self, x: &DataFrame, y: Option<&Series>) -> Result<FittedPipeline> {
        let encoded: HashSet<&str> = self.encoder.input_columns().into_iter().collect();
        let mut overlap: Vec<&str> = self
            .dropper
            .columns()
            .iter()
            .map(String::as_str)
            .filter(|c| encoded.contains(c))
            .collect();
        if !overlap.is_empty() {
            overlap.sort_unstable();
            return Err(PreprocessingError::InvalidTaxonomy(format!(
                "columns both dropped and encoded: {:?}",
                overlap
            )));
        }

        if let Some(y) = y {
            if y.len() != x.height() {
                return Err(PreprocessingError::ShapeMismatch {
                    expected: format!("{} target values", x.height()),
                    got: format!("{} target values", y.len()),
                });
            }
        }

        let dropped = self.dropper.transform(x)?;
        debug!(
            rows = x.height(),
            columns_in = x.width(),
            columns_kept = dropped.width(),
            "Dropped identifier and leakage columns"
        );

        let encoder = self.encoder.fit(&dropped)?;
        info!(
            rows = x.height(),
            n_features_out = encoder.n_features_out(),
            "Fitted preprocessing pipeline"
        );

        Ok(FittedPipeline {
            dropper: self.dropper.clone(),
            encoder,
        })
    }
}

impl Transformer for Pipeline {
    type Input = DataFrame;
    type Output = FeatureTable;
    type Fitted = FittedPipeline;

    fn fit(&self, data: &DataFrame) -> Result<FittedPipeline> {
        self.fit_xy(data, None)
    }
}

/// Fitted pipeline. Immutable; refitting produces a new value.
#[derive(Clone, Debug)]
pub struct FittedPipeline {
    dropper: ColumnDropper,
    encoder: FittedColumnTransformer,
}

impl FittedPipeline {
    /// Output feature names, in column order.
    pub fn feature_names_out(&self) -> Vec<String> {
        self.encoder.feature_names_out()
    }

    /// The fitted group-wise encoder.
    pub fn encoder(&self) -> &FittedColumnTransformer {
        &self.encoder
    }
}

impl FittedTransformer for FittedPipeline {
    type Input = DataFrame;
    type Output = FeatureTable;

    fn transform(&self, data: &DataFrame) -> Result<FeatureTable> {
        let dropped = self.dropper.transform(data)?;
        let features = self.encoder.transform(&dropped)?;
        debug!(
            rows = features.nrows(),
            n_features_out = features.ncols(),
            "Transformed rows"
        );
        Ok(features)
    }

    fn n_features_out(&self) -> usize {
        self.encoder.n_features_out()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::split_x_y;
    use crate::dataset::synthetic::ames_frame;
    use polars::prelude::*;

    #[test]
    fn test_pipeline_drops_then_encodes() {
        let taxonomy = ColumnTaxonomy::ames();
        let (x, y) = split_x_y(&ames_frame(20).unwrap(), &taxonomy).unwrap();

        let fitted = Pipeline::new(&taxonomy).unwrap().fit_xy(&x, Some(&y)).unwrap();
        let out = fitted.transform(&x).unwrap();

        assert_eq!(out.nrows(), 20);
        assert_eq!(out.ncols(), fitted.n_features_out());
        assert_eq!(out.names(), fitted.feature_names_out().as_slice());
        for col in &taxonomy.dropped {
            assert!(out.column(col).is_none());
        }
        assert!(!out.has_missing());
    }

    #[test]
    fn test_pipeline_fit_is_deterministic() {
        let taxonomy = ColumnTaxonomy::ames();
        let (x, _) = split_x_y(&ames_frame(15).unwrap(), &taxonomy).unwrap();
        let pipeline = Pipeline::new(&taxonomy).unwrap();

        let a = pipeline.fit(&x).unwrap().transform(&x).unwrap();
        let b = pipeline.fit(&x).unwrap().transform(&x).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_pipeline_refit_replaces_state() {
        let taxonomy = ColumnTaxonomy::ames();
        let (x, _) = split_x_y(&ames_frame(30).unwrap(), &taxonomy).unwrap();
        let pipeline = Pipeline::new(&taxonomy).unwrap();

        let small = pipeline.fit(&x.slice(0, 2)).unwrap();
        let full = pipeline.fit(&x).unwrap();
        assert!(small.n_features_out() < full.n_features_out());

        let again = pipeline.fit(&x.slice(0, 2)).unwrap();
        assert_eq!(again.feature_names_out(), small.feature_names_out());
    }

    #[test]
    fn test_pipeline_target_length_mismatch() {
        let taxonomy = ColumnTaxonomy::ames();
        let (x, y) = split_x_y(&ames_frame(10).unwrap(), &taxonomy).unwrap();
        let short = y.slice(0, 5);

        let result = Pipeline::new(&taxonomy).unwrap().fit_xy(&x, Some(&short));
        assert!(matches!(result, Err(PreprocessingError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_pipeline_accepts_already_dropped_inference_rows() {
        let taxonomy = ColumnTaxonomy::ames();
        let (x, _) = split_x_y(&ames_frame(10).unwrap(), &taxonomy).unwrap();
        let fitted = Pipeline::new(&taxonomy).unwrap().fit(&x).unwrap();

        let cleaned = fitted.dropper.transform(&x).unwrap();
        let from_raw = fitted.transform(&x).unwrap();
        let from_cleaned = fitted.transform(&cleaned).unwrap();
        assert_eq!(from_raw, from_cleaned);
    }

    #[test]
    fn test_pipeline_inference_missing_column() {
        let taxonomy = ColumnTaxonomy::ames();
        let (x, _) = split_x_y(&ames_frame(10).unwrap(), &taxonomy).unwrap();
        let fitted = Pipeline::new(&taxonomy).unwrap().fit(&x).unwrap();

        let result = fitted.transform(&x.drop("Gr Liv Area").unwrap());
        assert!(
            matches!(result, Err(PreprocessingError::MissingColumns(ref c)) if c == &["Gr Liv Area"])
        );
    }

    #[test]
    fn test_pipeline_from_parts() {
        let df = df!(
            "Id" => &[1i64, 2],
            "Lot Area" => &[10.0f64, 20.0],
        )
        .unwrap();
        let pipeline = Pipeline::from_parts(
            ColumnDropper::new(["Id"]),
            ColumnTransformer::new().add(crate::preprocessing::ColumnGroup::Numeric(vec![
                "Lot Area".into(),
            ])),
        );
        let out = pipeline.fit_transform(&df).unwrap();
        assert_eq!(out.names(), &["Lot Area".to_string()]);
        assert_eq!(pipeline.dropper().columns(), &["Id".to_string()]);
        assert_eq!(pipeline.encoder().len(), 1);
    }

    #[test]
    fn test_pipeline_rejects_overlapping_taxonomy() {
        let mut taxonomy = ColumnTaxonomy::ames();
        taxonomy.dropped.push("Lot Area".to_string());
        let result = Pipeline::new(&taxonomy);
        assert!(
            matches!(result, Err(PreprocessingError::InvalidTaxonomy(ref m)) if m.contains("Lot Area"))
        );

        let mut taxonomy = ColumnTaxonomy::ames();
        taxonomy.nominal.push("SalePrice".to_string());
        assert!(matches!(
            Pipeline::new(&taxonomy),
            Err(PreprocessingError::InvalidTaxonomy(_))
        ));
    }

    #[test]
    fn test_pipeline_from_parts_rejects_dropped_and_encoded_column() {
        let df = df!(
            "Id" => &[1i64, 2],
            "Lot Area" => &[10.0f64, 20.0],
        )
        .unwrap();
        let pipeline = Pipeline::from_parts(
            ColumnDropper::new(["Id", "Lot Area"]),
            ColumnTransformer::new().add(crate::preprocessing::ColumnGroup::Numeric(vec![
                "Lot Area".into(),
            ])),
        );
        let result = pipeline.fit(&df);
        assert!(
            matches!(result, Err(PreprocessingError::InvalidTaxonomy(ref m)) if m.contains("Lot Area"))
        );
    }
}
