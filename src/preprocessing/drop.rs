//! Column dropper: the first pipeline stage.
//!
//! Removes identifier and leakage-prone columns. Absent columns are skipped,
//! so the same stage works on raw training tables and on inference tables
//! that were already cleaned upstream.

use crate::dataset::columns::has_column;
use crate::preprocessing::error::Result;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use polars::prelude::DataFrame;

/// Stateless transformer removing a fixed list of columns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnDropper {
    columns: Vec<String>,
}

impl ColumnDropper {
    /// Create a dropper for the given column names.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Columns this dropper removes.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Return a copy of `df` without the configured columns.
    pub fn drop_columns(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut out = df.clone();
        for name in &self.columns {
            if has_column(&out, name) {
                out = out.drop(name)?;
            }
        }
        Ok(out)
    }
}

impl Transformer for ColumnDropper {
    type Input = DataFrame;
    type Output = DataFrame;
    type Fitted = ColumnDropper;

    fn fit(&self, _data: &DataFrame) -> Result<ColumnDropper> {
        Ok(self.clone())
    }
}

impl FittedTransformer for ColumnDropper {
    type Input = DataFrame;
    type Output = DataFrame;

    fn transform(&self, data: &DataFrame) -> Result<DataFrame> {
        self.drop_columns(data)
    }

    /// Not meaningful for a table-to-table stage; always 0.
    fn n_features_out(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn frame() -> DataFrame {
        df!(
            "Order" => &[1i64, 2],
            "PID" => &[10i64, 20],
            "Lot Area" => &[8450.0f64, 9600.0],
        )
        .unwrap()
    }

    #[test]
    fn test_drops_listed_columns() {
        let dropper = ColumnDropper::new(["Order", "PID"]);
        let out = dropper.transform(&frame()).unwrap();
        assert_eq!(out.width(), 1);
        assert_eq!(out.height(), 2);
        assert!(has_column(&out, "Lot Area"));
    }

    #[test]
    fn test_absent_columns_are_ignored() {
        let dropper = ColumnDropper::new(["Order", "Fence"]);
        let out = dropper.transform(&frame()).unwrap();
        assert_eq!(out.width(), 2);
    }

    #[test]
    fn test_drop_is_idempotent() {
        let dropper = ColumnDropper::new(["Order", "PID"]);
        let once = dropper.transform(&frame()).unwrap();
        let twice = dropper.transform(&once).unwrap();
        assert!(once.equals(&twice));
    }

    #[test]
    fn test_fit_returns_same_configuration() {
        let dropper = ColumnDropper::new(["Order"]);
        let fitted = dropper.fit(&frame()).unwrap();
        assert_eq!(fitted.columns(), dropper.columns());
        let out = dropper.fit_transform(&frame()).unwrap();
        assert!(!has_column(&out, "Order"));
    }
}
