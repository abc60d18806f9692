//! Categorical feature encoding transformers.
//!
//! This module provides encoders for converting one categorical column to
//! numerical features that a regression model can consume.
//!
//! # Available Encoders
//!
//! ## OneHotEncoder
//! Expands a column into one indicator per category observed during fit.
//!
//! ```ignore
//! // Input: ["RL", "RM", "RL"]
//! // Output: [[1,0], [0,1], [1,0]]
//! ```
//!
//! ## OrdinalEncoder
//! Maps labels to their rank in a fixed, ordered scale (0, 1, 2, ...).
//!
//! # Design Notes
//!
//! Encoders consume `Option<String>` labels. Missing labels are expected to
//! be imputed upstream; any that remain are handled like unknown labels
//! except that [`HandleUnknown::Error`] does not fire for them.

mod one_hot;
mod ordinal;

pub use one_hot::{FittedOneHotEncoder, OneHotEncoder};
pub use ordinal::{FittedOrdinalEncoder, OrdinalEncoder};

use serde::{Deserialize, Serialize};

/// Strategy for handling unknown categories during transform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum HandleUnknown {
    /// Raise an error when unknown categories are encountered.
    #[default]
    Error,
    /// Output an all-zero row for unknown categories. One-hot only.
    Ignore,
    /// Encode unknown categories with a fixed code. Ordinal only.
    UseEncodedValue(i64),
}
