//! Simple Imputer.
//!
//! Imputation transformer for completing missing values of a single column.
//! Supports median, most_frequent, and constant strategies.
//!
//! Note: numeric columns treat `NaN` as missing, like a null.
//!
//! # Example
//! ```ignore
//! use ames_prep::preprocessing::{Transformer, SimpleImputer, ImputeStrategy};
//!
//! let imputer = SimpleImputer::new(ImputeStrategy::MostFrequent);
//! let fitted = imputer.fit(&values)?;
//! let imputed = fitted.transform(&values)?;
//! ```

use crate::dataset::ColumnValues;
use crate::preprocessing::error::{PreprocessingError, Result};
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A learned (or configured) replacement for missing entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FillValue {
    Numeric(f64),
    Categorical(String),
}

impl FillValue {
    fn kind(&self) -> &'static str {
        match self {
            FillValue::Numeric(_) => "numeric",
            FillValue::Categorical(_) => "categorical",
        }
    }
}

/// Strategy for imputing missing values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum ImputeStrategy {
    /// Replace missing values with the median of the column. Numeric only.
    #[default]
    Median,
    /// Replace missing values with the most frequent value of the column.
    MostFrequent,
    /// Replace missing values with a constant value.
    Constant(FillValue),
}

/// SimpleImputer transformer (unfitted).
#[derive(Clone, Debug, Default)]
pub struct SimpleImputer {
    strategy: ImputeStrategy,
}

impl SimpleImputer {
    /// Create a new SimpleImputer with the specified strategy.
    pub fn new(strategy: ImputeStrategy) -> Self {
        Self { strategy }
    }

    /// Imputer filling every missing value with `value`.
    pub fn constant(value: FillValue) -> Self {
        Self::new(ImputeStrategy::Constant(value))
    }
}

fn median(mut values: Vec<f64>) -> f64 {
    values.sort_by(|a, b| a.total_cmp(b));
    let n = values.len();
    if n % 2 == 0 {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    } else {
        values[n / 2]
    }
}

/// Most frequent value; ties go to the smallest value.
fn most_frequent<T: Ord + Clone + std::hash::Hash>(values: &[T]) -> Option<T> {
    let mut counts: HashMap<&T, usize> = HashMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by(|(va, ca), (vb, cb)| ca.cmp(cb).then_with(|| vb.cmp(va)))
        .map(|(v, _)| v.clone())
}

fn compute_fill(values: &ColumnValues, strategy: &ImputeStrategy) -> Result<Option<FillValue>> {
    if let ImputeStrategy::Constant(value) = strategy {
        if value.kind() != values.kind() {
            return Err(PreprocessingError::InvalidParameter(format!(
                "Constant fill value is {} but the column is {}",
                value.kind(),
                values.kind()
            )));
        }
        return Ok(Some(value.clone()));
    }

    match values {
        ColumnValues::Numeric(v) => {
            let observed: Vec<f64> = v.iter().flatten().copied().collect();
            if observed.is_empty() {
                // All values are missing
                return Ok(Some(FillValue::Numeric(0.0)));
            }
            let stat = match strategy {
                ImputeStrategy::Median => median(observed),
                ImputeStrategy::MostFrequent => {
                    let bits: Vec<OrderedBits> = observed.iter().map(|&x| OrderedBits(x)).collect();
                    most_frequent(&bits).map(|b| b.0).unwrap_or(0.0)
                }
                ImputeStrategy::Constant(value) => return Ok(Some(value.clone())),
            };
            Ok(Some(FillValue::Numeric(stat)))
        }
        ColumnValues::Categorical(v) => match strategy {
            ImputeStrategy::MostFrequent => {
                let observed: Vec<&str> = v.iter().flatten().map(String::as_str).collect();
                Ok(most_frequent(&observed).map(|s| FillValue::Categorical(s.to_string())))
            }
            other => Err(PreprocessingError::InvalidParameter(format!(
                "Strategy {:?} requires numeric values, got a categorical column",
                other
            ))),
        },
    }
}

/// `f64` wrapper with a total order so floats can be counted and tie-broken.
#[derive(Clone, Copy, Debug)]
struct OrderedBits(f64);

impl PartialEq for OrderedBits {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for OrderedBits {}

impl PartialOrd for OrderedBits {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedBits {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::hash::Hash for OrderedBits {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl Transformer for SimpleImputer {
    type Input = ColumnValues;
    type Output = ColumnValues;
    type Fitted = FittedSimpleImputer;

    fn fit(&self, data: &ColumnValues) -> Result<FittedSimpleImputer> {
        if data.is_empty() {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit SimpleImputer on empty data".to_string(),
            ));
        }

        let statistic = compute_fill(data, &self.strategy)?;

        Ok(FittedSimpleImputer {
            statistic,
            kind: data.kind(),
            n_observed: data.len() - data.null_count(),
        })
    }
}

/// Fitted SimpleImputer ready for inference.
#[derive(Clone, Debug, PartialEq)]
pub struct FittedSimpleImputer {
    statistic: Option<FillValue>,
    kind: &'static str,
    n_observed: usize,
}

impl FittedSimpleImputer {
    /// The fill value, or `None` for a categorical column that had no
    /// observed value during fit (missing entries are then left as is).
    pub fn statistic(&self) -> Option<&FillValue> {
        self.statistic.as_ref()
    }

    /// Number of non-missing values seen during fit.
    pub fn n_observed(&self) -> usize {
        self.n_observed
    }

    /// Whether every training value was missing.
    pub fn fitted_on_all_missing(&self) -> bool {
        self.n_observed == 0
    }
}

impl FittedTransformer for FittedSimpleImputer {
    type Input = ColumnValues;
    type Output = ColumnValues;

    fn transform(&self, data: &ColumnValues) -> Result<ColumnValues> {
        if data.kind() != self.kind {
            return Err(PreprocessingError::InvalidParameter(format!(
                "Imputer was fitted on a {} column, got {}",
                self.kind,
                data.kind()
            )));
        }

        let out = match (data, &self.statistic) {
            (ColumnValues::Numeric(v), Some(FillValue::Numeric(fill))) => {
                ColumnValues::Numeric(v.iter().map(|x| Some(x.unwrap_or(*fill))).collect())
            }
            (ColumnValues::Categorical(v), Some(FillValue::Categorical(fill))) => {
                ColumnValues::Categorical(
                    v.iter()
                        .map(|x| Some(x.clone().unwrap_or_else(|| fill.clone())))
                        .collect(),
                )
            }
            (values, _) => values.clone(),
        };
        Ok(out)
    }

    fn n_features_out(&self) -> usize {
        1
    }
}
