//! L2-regularized linear regression solved in closed form.
//!
//! With an intercept, features and target are centered and the intercept is
//! recovered afterwards, so it is not penalized.

use crate::model::{InferenceModel, Regressor};
use crate::preprocessing::error::{PreprocessingError, Result};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

/// Solve the symmetric positive-definite system `a x = b` by Cholesky decomposition.
///
/// A near-singular matrix is retried once with a small diagonal shift.
fn cholesky_solve(a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    let n = a.nrows();
    if n != a.ncols() || n != b.len() {
        return None;
    }

    cholesky_factor(a)
        .or_else(|| {
            let shift = 1e-8 * a.diag().iter().map(|v| v.abs()).sum::<f64>() / n.max(1) as f64;
            let mut shifted = a.clone();
            for k in 0..n {
                shifted[[k, k]] += shift.max(f64::EPSILON);
            }
            cholesky_factor(&shifted)
        })
        .map(|l| substitute(&l, b))
}

/// Lower-triangular `l` with `a = l lᵀ`, or `None` if `a` is not positive definite.
fn cholesky_factor(a: &Array2<f64>) -> Option<Array2<f64>> {
    let n = a.nrows();
    let mut l = Array2::<f64>::zeros((n, n));

    for i in 0..n {
        for j in 0..=i {
            let mut sum = 0.0;
            for k in 0..j {
                sum += l[[i, k]] * l[[j, k]];
            }
            if i == j {
                let diag = a[[i, i]] - sum;
                if diag <= 0.0 || !diag.is_finite() {
                    return None;
                }
                l[[i, j]] = diag.sqrt();
            } else {
                l[[i, j]] = (a[[i, j]] - sum) / l[[j, j]];
            }
        }
    }
    Some(l)
}

fn substitute(l: &Array2<f64>, b: &Array1<f64>) -> Array1<f64> {
    let n = l.nrows();

    // Forward substitution: L * y = b
    let mut y = Array1::<f64>::zeros(n);
    for i in 0..n {
        let mut sum = 0.0;
        for j in 0..i {
            sum += l[[i, j]] * y[j];
        }
        y[i] = (b[i] - sum) / l[[i, i]];
    }

    // Backward substitution: L^T * x = y
    let mut x = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..n {
            sum += l[[j, i]] * x[j];
        }
        x[i] = (y[i] - sum) / l[[i, i]];
    }
    x
}

/// Ridge regression hyperparameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RidgeRegression {
    /// L2 regularization strength.
    pub alpha: f64,
    pub fit_intercept: bool,
}

impl Default for RidgeRegression {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl RidgeRegression {
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            fit_intercept: true,
        }
    }

    pub fn with_fit_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }
}

impl Regressor for RidgeRegression {
    type Fitted = FittedRidge;

    fn fit(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<FittedRidge> {
        let n_samples = x.nrows();
        let n_features = x.ncols();
        if n_samples != y.len() {
            return Err(PreprocessingError::ShapeMismatch {
                expected: format!("y length = {}", n_samples),
                got: format!("y length = {}", y.len()),
            });
        }
        if n_samples == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit RidgeRegression on empty data".to_string(),
            ));
        }
        if self.alpha.is_nan() || self.alpha < 0.0 {
            return Err(PreprocessingError::InvalidParameter(format!(
                "alpha must be non-negative, got {}",
                self.alpha
            )));
        }
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(PreprocessingError::Computation(
                "RidgeRegression requires finite features and targets".to_string(),
            ));
        }

        let (x_mean, y_mean) = if self.fit_intercept {
            (
                x.mean_axis(Axis(0))
                    .unwrap_or_else(|| Array1::zeros(n_features)),
                y.mean().unwrap_or(0.0),
            )
        } else {
            (Array1::zeros(n_features), 0.0)
        };
        let x_c = x - &x_mean.view().insert_axis(Axis(0));
        let y_c = y - y_mean;

        let mut xtx = x_c.t().dot(&x_c);
        for i in 0..n_features {
            xtx[[i, i]] += self.alpha;
        }
        let xty = x_c.t().dot(&y_c);

        let coefficients = cholesky_solve(&xtx, &xty).ok_or_else(|| {
            PreprocessingError::Computation("Singular normal equations".to_string())
        })?;
        let intercept = y_mean - coefficients.dot(&x_mean);

        Ok(FittedRidge {
            coefficients,
            intercept,
        })
    }
}

/// Fitted ridge model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FittedRidge {
    pub coefficients: Array1<f64>,
    pub intercept: f64,
}

impl InferenceModel for FittedRidge {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, row: ArrayView1<'_, f64>) -> f64 {
        row.dot(&self.coefficients) + self.intercept
    }

    fn predict_batch(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if x.ncols() != self.n_features() {
            return Err(PreprocessingError::ShapeMismatch {
                expected: format!("{} features", self.n_features()),
                got: format!("{} features", x.ncols()),
            });
        }
        Ok(x.dot(&self.coefficients) + self.intercept)
    }
}
