//! ColumnTransformer for applying a fixed imputation/encoding policy per column group.
//!
//! Each [`ColumnGroup`] variant names a set of columns and implies its steps;
//! fitted groups run independently and their outputs are concatenated.

#[allow(clippy::module_inception)]
mod column_transformer;

pub use column_transformer::{
    ColumnGroup, ColumnTransformer, FittedColumnGroup, FittedColumnTransformer, NominalColumn,
    NumericColumn, OrdinalColumn,
};
