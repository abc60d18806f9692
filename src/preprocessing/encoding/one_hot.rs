//! One-hot encoding for a categorical column.
//!
//! Categories are learned in first-seen order, so the output layout follows
//! the training rows.

use crate::preprocessing::encoding::HandleUnknown;
use crate::preprocessing::error::{PreprocessingError, Result};
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use ndarray::Array2;
use std::collections::HashMap;

/// One-hot encoder for a single categorical column.
///
/// # Example
/// ```ignore
/// use ames_prep::preprocessing::{HandleUnknown, OneHotEncoder, Transformer, FittedTransformer};
///
/// let train = vec![Some("RL".to_string()), Some("RM".to_string())];
/// let fitted = OneHotEncoder::new()
///     .with_handle_unknown(HandleUnknown::Ignore)
///     .fit(&train)?;
///
/// // "FV" was never seen: its row is all zeros.
/// let encoded = fitted.transform(&[Some("FV".to_string())])?;
/// ```
#[derive(Clone, Debug, Default)]
pub struct OneHotEncoder {
    /// How to handle unknown categories during transform.
    handle_unknown: HandleUnknown,
}

impl OneHotEncoder {
    /// Create a new OneHotEncoder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the strategy for handling unknown categories.
    pub fn with_handle_unknown(mut self, strategy: HandleUnknown) -> Self {
        self.handle_unknown = strategy;
        self
    }
}

impl Transformer for OneHotEncoder {
    type Input = [Option<String>];
    type Output = Array2<f64>;
    type Fitted = FittedOneHotEncoder;

    fn fit(&self, data: &[Option<String>]) -> Result<FittedOneHotEncoder> {
        if data.is_empty() {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit OneHotEncoder on empty data".to_string(),
            ));
        }
        if let HandleUnknown::UseEncodedValue(code) = self.handle_unknown {
            return Err(PreprocessingError::InvalidParameter(format!(
                "OneHotEncoder cannot encode unknown categories as {}",
                code
            )));
        }

        let mut categories: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for value in data.iter().flatten() {
            if !index.contains_key(value) {
                index.insert(value.clone(), categories.len());
                categories.push(value.clone());
            }
        }

        Ok(FittedOneHotEncoder {
            categories,
            index,
            handle_unknown: self.handle_unknown,
        })
    }
}

/// Fitted OneHotEncoder ready for inference.
#[derive(Clone, Debug)]
pub struct FittedOneHotEncoder {
    /// Categories in first-seen order.
    categories: Vec<String>,
    index: HashMap<String, usize>,
    handle_unknown: HandleUnknown,
}

impl FittedOneHotEncoder {
    /// Get the categories learned during fit.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Output names `"<column>_<category>"` for this encoder's block.
    pub fn feature_names(&self, column: &str) -> Vec<String> {
        self.categories
            .iter()
            .map(|cat| format!("{}_{}", column, cat))
            .collect()
    }

    /// Number of present values that are not in the learned vocabulary.
    pub fn count_unknown(&self, data: &[Option<String>]) -> usize {
        data.iter()
            .flatten()
            .filter(|v| !self.index.contains_key(*v))
            .count()
    }
}

impl FittedTransformer for FittedOneHotEncoder {
    type Input = [Option<String>];
    type Output = Array2<f64>;

    fn transform(&self, data: &[Option<String>]) -> Result<Array2<f64>> {
        let mut result = Array2::<f64>::zeros((data.len(), self.categories.len()));

        for (row, value) in data.iter().enumerate() {
            let Some(value) = value else { continue };
            match self.index.get(value) {
                Some(&idx) => result[[row, idx]] = 1.0,
                None => {
                    if self.handle_unknown == HandleUnknown::Error {
                        return Err(PreprocessingError::InvalidParameter(format!(
                            "Unknown category '{}' at row {}",
                            value, row
                        )));
                    }
                    // With Ignore, leave as zeros
                }
            }
        }

        Ok(result)
    }

    fn n_features_out(&self) -> usize {
        self.categories.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    #[test]
    fn test_one_hot_encoder_first_seen_order() {
        let data = labels(&[Some("RM"), Some("RL"), Some("RM"), Some("FV")]);
        let fitted = OneHotEncoder::new().fit(&data).unwrap();

        assert_eq!(fitted.categories(), &["RM", "RL", "FV"]);
        assert_eq!(fitted.n_features_out(), 3);

        let out = fitted.transform(&data).unwrap();
        assert_eq!(out.shape(), &[4, 3]);
        assert_eq!(out.row(0).to_vec(), vec![1.0, 0.0, 0.0]);
        assert_eq!(out.row(1).to_vec(), vec![0.0, 1.0, 0.0]);
        assert_eq!(out.row(3).to_vec(), vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_one_hot_encoder_rows_sum_to_one_on_training_data() {
        let data = labels(&[Some("a"), Some("b"), Some("c"), Some("a")]);
        let out = OneHotEncoder::new().fit_transform(&data).unwrap();
        for row in out.rows() {
            assert!((row.sum() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_one_hot_encoder_unknown_error() {
        let fitted = OneHotEncoder::new().fit(&labels(&[Some("a")])).unwrap();
        let result = fitted.transform(&labels(&[Some("z")]));
        assert!(matches!(result, Err(PreprocessingError::InvalidParameter(_))));
    }

    #[test]
    fn test_one_hot_encoder_unknown_ignore() {
        let fitted = OneHotEncoder::new()
            .with_handle_unknown(HandleUnknown::Ignore)
            .fit(&labels(&[Some("a"), Some("b")]))
            .unwrap();

        let test = labels(&[Some("z"), Some("b")]);
        let out = fitted.transform(&test).unwrap();
        assert_eq!(out.shape(), &[2, 2]);
        assert_eq!(out.row(0).to_vec(), vec![0.0, 0.0]);
        assert_eq!(out.row(1).to_vec(), vec![0.0, 1.0]);
        assert_eq!(fitted.count_unknown(&test), 1);
    }

    #[test]
    fn test_one_hot_encoder_missing_values_are_not_categories() {
        let data = labels(&[None, Some("a"), None]);
        let fitted = OneHotEncoder::new().fit(&data).unwrap();
        assert_eq!(fitted.categories(), &["a"]);

        let out = fitted.transform(&data).unwrap();
        assert_eq!(out.column(0).to_vec(), vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_one_hot_encoder_all_missing_gives_empty_block() {
        let data = labels(&[None, None]);
        let fitted = OneHotEncoder::new().fit(&data).unwrap();
        let out = fitted.transform(&data).unwrap();
        assert_eq!(out.shape(), &[2, 0]);
    }

    #[test]
    fn test_one_hot_encoder_feature_names() {
        let fitted = OneHotEncoder::new()
            .fit(&labels(&[Some("Pave"), Some("Grvl")]))
            .unwrap();
        assert_eq!(
            fitted.feature_names("Street"),
            vec!["Street_Pave".to_string(), "Street_Grvl".to_string()]
        );
    }

    #[test]
    fn test_one_hot_encoder_empty_data() {
        let result = OneHotEncoder::new().fit(&[]);
        assert!(matches!(result, Err(PreprocessingError::EmptyData(_))));
    }

    #[test]
    fn test_one_hot_encoder_rejects_encoded_value() {
        let result = OneHotEncoder::new()
            .with_handle_unknown(HandleUnknown::UseEncodedValue(-1))
            .fit(&labels(&[Some("a")]));
        assert!(matches!(result, Err(PreprocessingError::InvalidParameter(_))));
    }

    #[test]
    fn test_one_hot_encoder_empty_transform() {
        let fitted = OneHotEncoder::new().fit(&labels(&[Some("a")])).unwrap();
        let out = fitted.transform(&[]).unwrap();
        assert_eq!(out.shape(), &[0, 1]);
    }
}
