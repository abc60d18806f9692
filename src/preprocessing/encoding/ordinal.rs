//! Ordinal encoding against a fixed, ordered scale.
//!
//! Unlike one-hot, nothing is learned from the data: the scale is
//! configuration, and fitting only checks it.

use crate::preprocessing::encoding::HandleUnknown;
use crate::preprocessing::error::{PreprocessingError, Result};
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use ndarray::Array1;
use std::collections::HashMap;

/// Ordinal encoder for a single categorical column.
///
/// Encodes each label as its zero-based position in `categories`.
#[derive(Clone, Debug)]
pub struct OrdinalEncoder {
    categories: Vec<String>,
    handle_unknown: HandleUnknown,
}

impl OrdinalEncoder {
    /// Create an encoder for the given ordered scale (lowest rank first).
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            handle_unknown: HandleUnknown::default(),
        }
    }

    /// Set the strategy for handling unknown categories.
    pub fn with_handle_unknown(mut self, strategy: HandleUnknown) -> Self {
        self.handle_unknown = strategy;
        self
    }
}

impl Transformer for OrdinalEncoder {
    type Input = [Option<String>];
    type Output = Array1<f64>;
    type Fitted = FittedOrdinalEncoder;

    fn fit(&self, data: &[Option<String>]) -> Result<FittedOrdinalEncoder> {
        if data.is_empty() {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit OrdinalEncoder on empty data".to_string(),
            ));
        }
        if self.categories.is_empty() {
            return Err(PreprocessingError::InvalidParameter(
                "OrdinalEncoder needs at least one category".to_string(),
            ));
        }
        if self.handle_unknown == HandleUnknown::Ignore {
            return Err(PreprocessingError::InvalidParameter(
                "OrdinalEncoder needs an error or an encoded value for unknown categories"
                    .to_string(),
            ));
        }

        let mut mapping = HashMap::with_capacity(self.categories.len());
        for (rank, cat) in self.categories.iter().enumerate() {
            if mapping.insert(cat.clone(), rank).is_some() {
                return Err(PreprocessingError::InvalidParameter(format!(
                    "Duplicate category '{}' in ordinal scale",
                    cat
                )));
            }
        }

        Ok(FittedOrdinalEncoder {
            categories: self.categories.clone(),
            mapping,
            handle_unknown: self.handle_unknown,
        })
    }
}

/// Fitted OrdinalEncoder ready for inference.
#[derive(Clone, Debug)]
pub struct FittedOrdinalEncoder {
    categories: Vec<String>,
    mapping: HashMap<String, usize>,
    handle_unknown: HandleUnknown,
}

impl FittedOrdinalEncoder {
    /// The ordered scale, lowest rank first.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Rank of `label`, if it is on the scale.
    pub fn rank(&self, label: &str) -> Option<usize> {
        self.mapping.get(label).copied()
    }

    /// Number of values (missing included) that are not on the scale.
    pub fn count_unknown(&self, data: &[Option<String>]) -> usize {
        data.iter()
            .filter(|v| v.as_deref().and_then(|l| self.rank(l)).is_none())
            .count()
    }
}

impl FittedTransformer for FittedOrdinalEncoder {
    type Input = [Option<String>];
    type Output = Array1<f64>;

    fn transform(&self, data: &[Option<String>]) -> Result<Array1<f64>> {
        let mut result = Array1::<f64>::zeros(data.len());

        for (row, value) in data.iter().enumerate() {
            match value.as_deref().and_then(|l| self.rank(l)) {
                Some(rank) => result[row] = rank as f64,
                None => {
                    result[row] = match self.handle_unknown {
                        HandleUnknown::Error | HandleUnknown::Ignore => {
                            return Err(PreprocessingError::InvalidParameter(format!(
                                "Unknown category {:?} at row {}",
                                value, row
                            )));
                        }
                        HandleUnknown::UseEncodedValue(code) => code as f64,
                    };
                }
            }
        }

        Ok(result)
    }

    fn n_features_out(&self) -> usize {
        1
    }
}
