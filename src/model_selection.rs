//! K-fold cross-validation of a preprocessing + model pipeline.
//!
//! Every fold refits the whole [`PredictivePipeline`] on its training rows,
//! so imputation statistics and one-hot vocabularies are learned without
//! the held-out rows.

use crate::dataset::{split_x_y, target_values};
use crate::metrics::Scoring;
use crate::model::{InferenceModel, Regressor, RidgeRegression};
use crate::preprocessing::error::{PreprocessingError, Result};
use crate::preprocessing::pipeline::Pipeline;
use crate::preprocessing::predictive_pipeline::PredictivePipeline;
use crate::taxonomy::ColumnTaxonomy;
use polars::prelude::{DataFrame, Series};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::Path;
use tracing::{debug, info};

/// Contiguous, unshuffled K-fold splitter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KFold {
    n_splits: usize,
}

/// One train/test split. Training rows are everything outside `test`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoldSplit {
    pub fold: usize,
    pub test: Range<usize>,
}

impl KFold {
    pub fn new(n_splits: usize) -> Self {
        Self { n_splits }
    }

    /// Split `n_samples` rows. The first `n_samples % n_splits` folds get one extra row.
    pub fn split(&self, n_samples: usize) -> Result<Vec<FoldSplit>> {
        if self.n_splits < 2 {
            return Err(PreprocessingError::InvalidParameter(
                "n_splits must be at least 2".to_string(),
            ));
        }
        if n_samples < self.n_splits {
            return Err(PreprocessingError::InvalidParameter(format!(
                "n_samples ({}) must be >= n_splits ({})",
                n_samples, self.n_splits
            )));
        }

        let base = n_samples / self.n_splits;
        let remainder = n_samples % self.n_splits;

        let mut splits = Vec::with_capacity(self.n_splits);
        let mut current = 0;
        for fold in 0..self.n_splits {
            let size = if fold < remainder { base + 1 } else { base };
            splits.push(FoldSplit {
                fold,
                test: current..current + size,
            });
            current += size;
        }
        Ok(splits)
    }
}

/// Per-fold scores and their summary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CvReport {
    /// Number of folds.
    pub cv: usize,
    pub scoring: Scoring,
    pub mean_score: f64,
    /// Population standard deviation of `all_scores`.
    pub std_score: f64,
    pub all_scores: Vec<f64>,
}

impl CvReport {
    fn from_scores(scoring: Scoring, all_scores: Vec<f64>) -> Self {
        let n = all_scores.len().max(1) as f64;
        let mean_score = all_scores.iter().sum::<f64>() / n;
        let variance = all_scores
            .iter()
            .map(|s| (s - mean_score).powi(2))
            .sum::<f64>()
            / n;
        Self {
            cv: all_scores.len(),
            scoring,
            mean_score,
            std_score: variance.sqrt(),
            all_scores,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Cross-validation settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossValidationConfig {
    pub n_splits: usize,
    pub scoring: Scoring,
    /// Ridge regularization strength for [`validate_with_cv`].
    pub alpha: f64,
}

impl Default for CrossValidationConfig {
    fn default() -> Self {
        Self {
            n_splits: 5,
            scoring: Scoring::default(),
            alpha: 1.0,
        }
    }
}

impl CrossValidationConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

fn train_rows(x: &DataFrame, y: &Series, test: &Range<usize>) -> Result<(DataFrame, Series)> {
    let n = x.height();
    let tail_len = n - test.end;

    let mut x_train = x.slice(0, test.start);
    x_train.vstack_mut(&x.slice(test.end as i64, tail_len))?;

    let mut y_train = y.slice(0, test.start);
    y_train.append(&y.slice(test.end as i64, tail_len))?;

    Ok((x_train, y_train))
}

/// Score `pipeline` with K-fold cross-validation on raw features `x` and target `y`.
///
/// # Errors
/// - [`PreprocessingError::MissingTarget`] if `y` has missing values
/// - [`PreprocessingError::ShapeMismatch`] if `x` and `y` lengths differ
/// - any error raised while fitting a fold
pub fn cross_val_score<R: Regressor>(
    pipeline: &PredictivePipeline<R>,
    x: &DataFrame,
    y: &Series,
    kfold: KFold,
    scoring: Scoring,
) -> Result<CvReport> {
    if x.height() != y.len() {
        return Err(PreprocessingError::ShapeMismatch {
            expected: format!("{} target values", x.height()),
            got: format!("{} target values", y.len()),
        });
    }
    target_values(y)?;

    let splits = kfold.split(x.height())?;
    let mut scores = Vec::with_capacity(splits.len());

    for split in &splits {
        let (x_train, y_train) = train_rows(x, y, &split.test)?;
        let x_test = x.slice(split.test.start as i64, split.test.len());
        let y_test = target_values(&y.slice(split.test.start as i64, split.test.len()))?;

        debug!(
            fold = split.fold,
            train_rows = x_train.height(),
            test_rows = x_test.height(),
            "Fitting fold"
        );
        let fitted = pipeline.fit(&x_train, &y_train)?;
        let predictions = fitted.predict(&x_test)?;
        let score = scoring.score(&y_test.to_vec(), &predictions.to_vec())?;

        info!(
            fold = split.fold,
            scoring = %scoring,
            score,
            n_features = fitted.model().n_features(),
            "Cross-validation fold scored"
        );
        scores.push(score);
    }

    let report = CvReport::from_scores(scoring, scores);
    info!(
        cv = report.cv,
        mean_score = report.mean_score,
        std_score = report.std_score,
        "Cross-validation finished"
    );
    Ok(report)
}

/// Cross-validate the full preprocessing pipeline with a ridge baseline on a labeled table.
pub fn validate_with_cv(
    df: &DataFrame,
    taxonomy: &ColumnTaxonomy,
    config: &CrossValidationConfig,
) -> Result<CvReport> {
    let pipeline =
        PredictivePipeline::new(Pipeline::new(taxonomy)?, RidgeRegression::new(config.alpha));
    let (x, y) = split_x_y(df, taxonomy)?;
    cross_val_score(&pipeline, &x, &y, KFold::new(config.n_splits), config.scoring)
}
