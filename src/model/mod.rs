//! Regression models consuming preprocessed feature tables.
//!
//! Models follow the same split as transformers: an unfitted [`Regressor`]
//! holds hyperparameters, and fitting returns a separate [`InferenceModel`].

pub mod ridge;

pub use ridge::{FittedRidge, RidgeRegression};

use crate::preprocessing::error::Result;
use ndarray::{Array1, Array2, ArrayView1};

/// Unfitted regression model.
pub trait Regressor: Clone {
    type Fitted: InferenceModel;

    /// Learn parameters from features `x` (rows × features) and targets `y`.
    fn fit(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<Self::Fitted>;
}

/// Fitted regression model.
pub trait InferenceModel {
    /// Number of features expected per row.
    fn n_features(&self) -> usize;

    fn predict(&self, row: ArrayView1<'_, f64>) -> f64;

    /// Predict every row of `x`.
    fn predict_batch(&self, x: &Array2<f64>) -> Result<Array1<f64>>;
}
