//! Leakage-safe feature preprocessing for the Ames housing dataset.
//!
//! Raw tables are split into features and target, identifier and leakage
//! columns are dropped, and every remaining column is imputed and encoded
//! according to its group in a [`ColumnTaxonomy`]. All learned state comes
//! from training rows only, and inference tolerates categories that were
//! never seen during fit.
//!
//! # Example
//!
//! ```ignore
//! use ames_prep::dataset::split_x_y;
//! use ames_prep::model_selection::{validate_with_cv, CrossValidationConfig};
//! use ames_prep::preprocessing::{FittedTransformer, Pipeline};
//! use ames_prep::taxonomy::ColumnTaxonomy;
//!
//! let taxonomy = ColumnTaxonomy::ames();
//! let (x, y) = split_x_y(&df, &taxonomy)?;
//!
//! let fitted = Pipeline::new(&taxonomy)?.fit_xy(&x, Some(&y))?;
//! let features = fitted.transform(&x)?;
//!
//! let report = validate_with_cv(&df, &taxonomy, &CrossValidationConfig::default())?;
//! println!("{}", report.to_json()?);
//! ```

pub mod dataset;
pub mod metrics;
pub mod model;
pub mod model_selection;
pub mod preprocessing;
pub mod taxonomy;

pub use dataset::split_x_y;
pub use metrics::{Metrics, Scoring};
pub use model::{InferenceModel, Regressor, RidgeRegression};
pub use model_selection::{cross_val_score, validate_with_cv, CrossValidationConfig, CvReport, KFold};
pub use preprocessing::{FittedPipeline, Pipeline, PreprocessingError};
pub use taxonomy::{ColumnTaxonomy, OrdinalScale};
