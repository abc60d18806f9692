//! Full preprocessing pipeline: column dropper followed by the group-wise encoder.
//!
//! # Available Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`Pipeline`] | Drop → encode, fitted as one unit |
//! | [`fit_transform_preview`] | Fit on a labeled table and summarize the result |
//!
//! # Example
//!
//! ```ignore
//! use ames_prep::dataset::split_x_y;
//! use ames_prep::preprocessing::pipeline::Pipeline;
//! use ames_prep::taxonomy::ColumnTaxonomy;
//!
//! let taxonomy = ColumnTaxonomy::ames();
//! let (x, y) = split_x_y(&df, &taxonomy)?;
//!
//! let fitted = Pipeline::new(&taxonomy)?.fit_xy(&x, Some(&y))?;
//! let features = fitted.transform(&new_rows)?;
//! ```

#[allow(clippy::module_inception)]
pub mod pipeline;
pub mod preview;

pub use pipeline::{FittedPipeline, Pipeline};
pub use preview::{fit_transform_preview, PreviewReport};
