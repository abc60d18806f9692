//! Dense output of the group-wise encoder.

use ndarray::{Array2, ArrayView1, Axis};

/// A fixed-width numeric matrix with one name per column.
///
/// Column order is numeric columns, one-hot blocks, ordinal-numeric
/// columns, then ordinal-encoded columns.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureTable {
    names: Vec<String>,
    values: Array2<f64>,
}

impl FeatureTable {
    pub(crate) fn new(names: Vec<String>, values: Array2<f64>) -> Self {
        debug_assert_eq!(names.len(), values.ncols());
        Self { names, values }
    }

    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }

    /// Output feature names, in column order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// The column called `name`, if any.
    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| self.values.column(idx))
    }

    /// The first `n` rows (fewer if the table is shorter).
    pub fn head(&self, n: usize) -> FeatureTable {
        let n = n.min(self.nrows());
        let rows: Vec<usize> = (0..n).collect();
        FeatureTable {
            names: self.names.clone(),
            values: self.values.select(Axis(0), &rows),
        }
    }

    /// Whether any cell is `NaN`.
    pub fn has_missing(&self) -> bool {
        self.values.iter().any(|v| v.is_nan())
    }
}
