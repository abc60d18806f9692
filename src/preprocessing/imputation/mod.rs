//! Imputation transformers for handling missing values.
//!
//! # Available Transformers
//!
//! | Transformer | Description |
//! |-------------|-------------|
//! | [`SimpleImputer`] | Impute one column with its median, most frequent value, or a constant |
//!
//! # Example
//!
//! ```ignore
//! use ames_prep::preprocessing::imputation::{ImputeStrategy, SimpleImputer};
//! use ames_prep::preprocessing::{FittedTransformer, Transformer};
//!
//! let imputer = SimpleImputer::new(ImputeStrategy::Median);
//! let fitted = imputer.fit(&train_values)?;
//! let imputed = fitted.transform(&new_values)?;
//! ```

pub mod simple;

pub use simple::{FillValue, FittedSimpleImputer, ImputeStrategy, SimpleImputer};
