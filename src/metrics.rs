//! Regression metrics and scorer names.

use crate::preprocessing::error::{PreprocessingError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Metrics for evaluating regression models.
pub struct Metrics;

fn check_lengths(y_true: &[f64], y_pred: &[f64]) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(PreprocessingError::ShapeMismatch {
            expected: format!("{} predictions", y_true.len()),
            got: format!("{} predictions", y_pred.len()),
        });
    }
    Ok(())
}

impl Metrics {
    /// Calculate Mean Squared Error (MSE).
    ///
    /// MSE = mean((y_true - y_pred)^2)
    pub fn mse(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
        check_lengths(y_true, y_pred)?;
        if y_true.is_empty() {
            return Ok(0.0);
        }

        let sum_sq: f64 = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (t - p).powi(2))
            .sum();

        Ok(sum_sq / y_true.len() as f64)
    }

    /// Calculate Root Mean Squared Error (RMSE), in the target's units.
    pub fn rmse(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
        Ok(Self::mse(y_true, y_pred)?.sqrt())
    }

    /// Calculate Mean Absolute Error (MAE).
    ///
    /// MAE = mean(|y_true - y_pred|)
    pub fn mae(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
        check_lengths(y_true, y_pred)?;
        if y_true.is_empty() {
            return Ok(0.0);
        }

        let sum_abs: f64 = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (t - p).abs())
            .sum();

        Ok(sum_abs / y_true.len() as f64)
    }

    /// Calculate R² (coefficient of determination).
    ///
    /// R² = 1 - (SS_res / SS_tot)
    ///
    /// where:
    /// - SS_res = sum((y_true - y_pred)^2)  (residual sum of squares)
    /// - SS_tot = sum((y_true - mean(y_true))^2)  (total sum of squares)
    ///
    /// Values can be negative if the model is arbitrarily worse than the mean.
    pub fn r_squared(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
        check_lengths(y_true, y_pred)?;
        if y_true.is_empty() {
            return Ok(0.0);
        }

        let mean_true: f64 = y_true.iter().sum::<f64>() / y_true.len() as f64;

        let ss_res: f64 = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (t - p).powi(2))
            .sum();

        let ss_tot: f64 = y_true.iter().map(|&t| (t - mean_true).powi(2)).sum();

        if ss_tot == 0.0 {
            // Constant target: perfect only if predictions match exactly
            return Ok(if ss_res == 0.0 { 1.0 } else { 0.0 });
        }

        Ok(1.0 - (ss_res / ss_tot))
    }
}

/// Scorer used by cross-validation. Higher is always better, so error
/// metrics are negated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scoring {
    #[default]
    NegRootMeanSquaredError,
    NegMeanSquaredError,
    NegMeanAbsoluteError,
    R2,
}

impl Scoring {
    pub fn name(&self) -> &'static str {
        match self {
            Scoring::NegRootMeanSquaredError => "neg_root_mean_squared_error",
            Scoring::NegMeanSquaredError => "neg_mean_squared_error",
            Scoring::NegMeanAbsoluteError => "neg_mean_absolute_error",
            Scoring::R2 => "r2",
        }
    }

    /// Score predictions against ground truth.
    pub fn score(&self, y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
        match self {
            Scoring::NegRootMeanSquaredError => Ok(-Metrics::rmse(y_true, y_pred)?),
            Scoring::NegMeanSquaredError => Ok(-Metrics::mse(y_true, y_pred)?),
            Scoring::NegMeanAbsoluteError => Ok(-Metrics::mae(y_true, y_pred)?),
            Scoring::R2 => Metrics::r_squared(y_true, y_pred),
        }
    }
}

impl fmt::Display for Scoring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scoring {
    type Err = PreprocessingError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "neg_root_mean_squared_error" => Ok(Scoring::NegRootMeanSquaredError),
            "neg_mean_squared_error" => Ok(Scoring::NegMeanSquaredError),
            "neg_mean_absolute_error" => Ok(Scoring::NegMeanAbsoluteError),
            "r2" => Ok(Scoring::R2),
            other => Err(PreprocessingError::InvalidParameter(format!(
                "Unknown scoring '{}'",
                other
            ))),
        }
    }
}
