//! Leakage-safe preprocessing transformers.
//!
//! Every stage follows the same fit/transform split: an unfitted
//! [`Transformer`] learns from training rows and returns a separate
//! [`FittedTransformer`] whose state never changes afterwards.
//!
//! # Core Traits
//!
//! - [`Transformer`]: Unfitted transformer with configuration
//! - [`FittedTransformer`]: Fitted transformer ready for inference
//!
//! # Available Transformers
//!
//! ## Schema
//! - [`validate_columns`]: Fail fast on absent expected columns
//! - [`ColumnDropper`]: Remove identifier and leakage columns
//!
//! ## Imputation
//! - [`SimpleImputer`]: Fill missing values with median, most_frequent, or constant
//!
//! ## Encoding
//! - [`OneHotEncoder`]: Indicator columns; unseen categories give all-zero rows
//! - [`OrdinalEncoder`]: Rank on a fixed scale; unseen labels give a sentinel code
//!
//! ## Composition
//! - [`ColumnTransformer`]: Per-group imputation and encoding, concatenated
//! - [`Pipeline`]: Dropper followed by the column transformer
//! - [`PredictivePipeline`]: Pipeline followed by a regression model
//!
//! # Example
//!
//! ```ignore
//! use ames_prep::preprocessing::{FittedTransformer, Pipeline};
//! use ames_prep::taxonomy::ColumnTaxonomy;
//!
//! let taxonomy = ColumnTaxonomy::ames();
//! let fitted = Pipeline::new(&taxonomy)?.fit_xy(&x_train, Some(&y_train))?;
//!
//! // Same columns, same order, whatever values the batch holds.
//! let features = fitted.transform(&x_test)?;
//! ```

pub mod column_transformer;
pub mod drop;
pub mod encoding;
pub mod error;
pub mod feature_table;
pub mod imputation;
pub mod pipeline;
pub mod predictive_pipeline;
pub mod traits;
pub mod validation;

// Re-export main types
pub use column_transformer::{
    ColumnGroup, ColumnTransformer, FittedColumnGroup, FittedColumnTransformer,
};
pub use drop::ColumnDropper;
pub use encoding::{
    FittedOneHotEncoder, FittedOrdinalEncoder, HandleUnknown, OneHotEncoder, OrdinalEncoder,
};
pub use error::{PreprocessingError, Result};
pub use feature_table::FeatureTable;
pub use imputation::{FillValue, FittedSimpleImputer, ImputeStrategy, SimpleImputer};
pub use pipeline::{fit_transform_preview, FittedPipeline, Pipeline, PreviewReport};
pub use predictive_pipeline::{FittedPredictivePipeline, PredictivePipeline};
pub use traits::{FittedTransformer, Transformer};
pub use validation::{unclassified_columns, validate_columns};
