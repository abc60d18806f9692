//! Predictive pipeline combining preprocessing and a regression model.
//!
//! This is the unit cross-validation refits per fold, so imputation
//! statistics and vocabularies never see held-out rows.

use crate::dataset::target_values;
use crate::model::{InferenceModel, Regressor};
use crate::preprocessing::error::Result;
use crate::preprocessing::feature_table::FeatureTable;
use crate::preprocessing::pipeline::{FittedPipeline, Pipeline};
use crate::preprocessing::traits::FittedTransformer;
use ndarray::Array1;
use polars::prelude::{DataFrame, Series};

/// Unfitted preprocessing + model pair.
#[derive(Clone, Debug)]
pub struct PredictivePipeline<R: Regressor> {
    preprocessor: Pipeline,
    model: R,
}

impl<R: Regressor> PredictivePipeline<R> {
    /// Create a new predictive pipeline.
    pub fn new(preprocessor: Pipeline, model: R) -> Self {
        Self {
            preprocessor,
            model,
        }
    }

    /// Fit preprocessing on `x`, then the model on the transformed rows and `y`.
    pub fn fit(&self, x: &DataFrame, y: &Series) -> Result<FittedPredictivePipeline<R::Fitted>> {
        let targets = target_values(y)?;
        let preprocessor = self.preprocessor.fit_xy(x, Some(y))?;
        let features = preprocessor.transform(x)?;
        let model = self.model.fit(features.values(), &targets)?;
        Ok(FittedPredictivePipeline {
            preprocessor,
            model,
        })
    }
}

/// Fitted preprocessing + model pair.
#[derive(Clone, Debug)]
pub struct FittedPredictivePipeline<M: InferenceModel> {
    preprocessor: FittedPipeline,
    model: M,
}

impl<M: InferenceModel> FittedPredictivePipeline<M> {
    pub fn preprocessor(&self) -> &FittedPipeline {
        &self.preprocessor
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Preprocess raw rows without predicting.
    pub fn preprocess(&self, x: &DataFrame) -> Result<FeatureTable> {
        self.preprocessor.transform(x)
    }

    /// Preprocess raw rows and predict one value per row.
    pub fn predict(&self, x: &DataFrame) -> Result<Array1<f64>> {
        let features = self.preprocess(x)?;
        self.model.predict_batch(features.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::split_x_y;
    use crate::dataset::synthetic::ames_frame;
    use crate::metrics::Metrics;
    use crate::model::RidgeRegression;
    use crate::preprocessing::error::PreprocessingError;
    use crate::taxonomy::ColumnTaxonomy;
    use polars::prelude::*;

    fn ridge_pipeline(taxonomy: &ColumnTaxonomy) -> PredictivePipeline<RidgeRegression> {
        PredictivePipeline::new(Pipeline::new(taxonomy).unwrap(), RidgeRegression::default())
    }

    #[test]
    fn test_predictive_pipeline_fits_synthetic_signal() {
        let taxonomy = ColumnTaxonomy::ames();
        let (x, y) = split_x_y(&ames_frame(60).unwrap(), &taxonomy).unwrap();

        let fitted = ridge_pipeline(&taxonomy).fit(&x, &y).unwrap();
        let pred = fitted.predict(&x).unwrap();
        let truth = target_values(&y).unwrap();

        assert_eq!(pred.len(), 60);
        let r2 = Metrics::r_squared(truth.as_slice().unwrap(), pred.as_slice().unwrap()).unwrap();
        assert!(r2 > 0.99, "r2 = {}", r2);
    }

    #[test]
    fn test_predictive_pipeline_preprocess_width() {
        let taxonomy = ColumnTaxonomy::ames();
        let (x, y) = split_x_y(&ames_frame(20).unwrap(), &taxonomy).unwrap();
        let fitted = ridge_pipeline(&taxonomy).fit(&x, &y).unwrap();

        let features = fitted.preprocess(&x).unwrap();
        assert_eq!(features.ncols(), fitted.model().n_features());
        assert_eq!(features.ncols(), fitted.preprocessor().n_features_out());
    }

    #[test]
    fn test_predictive_pipeline_rejects_missing_target() {
        let taxonomy = ColumnTaxonomy::ames();
        let (x, _) = split_x_y(&ames_frame(3).unwrap(), &taxonomy).unwrap();
        let y = Series::new("SalePrice".into(), &[Some(1.0f64), None, Some(3.0)]);

        let result = ridge_pipeline(&taxonomy).fit(&x, &y);
        assert!(matches!(result, Err(PreprocessingError::MissingTarget { count: 1, .. })));
    }
}
