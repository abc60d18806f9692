//! Core traits for preprocessing transformers.
//!
//! This module defines the two central traits:
//! - [`Transformer`]: Used during fitting; holds configuration and learns from data.
//! - [`FittedTransformer`]: After fitting; holds frozen state and transforms new data.
//!
//! Fitting never mutates the transformer. It returns a new fitted value, so
//! refitting replaces the previous state wholesale and a fitted value can be
//! shared read-only between callers.

use crate::preprocessing::error::Result;

/// Trait for unfitted transformers.
///
/// # Example
/// ```ignore
/// use ames_prep::preprocessing::{OneHotEncoder, Transformer, FittedTransformer};
///
/// let encoder = OneHotEncoder::new();
/// let fitted = encoder.fit(&train_values)?;
/// let encoded = fitted.transform(&test_values)?;
/// ```
pub trait Transformer: Clone {
    /// Input data type.
    type Input: ?Sized;
    /// Output data type after transformation.
    type Output;
    /// The fitted transformer type ready for inference.
    type Fitted: FittedTransformer<Input = Self::Input, Output = Self::Output>;

    /// Learn state from training data.
    ///
    /// # Errors
    /// Returns [`PreprocessingError`](crate::preprocessing::PreprocessingError) if:
    /// - Data is empty
    /// - Required columns are absent
    /// - Values have the wrong kind for this transformer
    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted>;

    /// Fit the transformer and transform the same data in one step.
    fn fit_transform(&self, data: &Self::Input) -> Result<Self::Output> {
        let fitted = self.fit(data)?;
        fitted.transform(data)
    }
}

/// Trait for fitted transformers ready for inference.
///
/// # Guarantees
/// - `transform` never changes the fitted state.
/// - The output width depends only on the fitted state, never on the input values.
pub trait FittedTransformer {
    /// Input data type for transformation.
    type Input: ?Sized;
    /// Output data type after transformation.
    type Output;

    /// Transform data using the learned state.
    fn transform(&self, data: &Self::Input) -> Result<Self::Output>;

    /// Number of output features produced per row.
    fn n_features_out(&self) -> usize;
}
