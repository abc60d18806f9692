//! Deterministic Ames-like tables for demos, benchmarks and tests.
//!
//! Every column of [`ColumnTaxonomy::ames`] is present, plus the target.
//! Values cycle through small, fixed patterns so that the same `n_rows`
//! always produces the same table, and the target is a noise-free linear
//! function of a few features so that a regressor has signal to fit.

use crate::preprocessing::error::Result;
use crate::taxonomy::ColumnTaxonomy;
use polars::prelude::*;

/// Build an `n_rows` table with every Ames taxonomy column and `SalePrice`.
pub fn ames_frame(n_rows: usize) -> Result<DataFrame> {
    let taxonomy = ColumnTaxonomy::ames();
    let mut columns: Vec<Column> = Vec::new();

    for (j, name) in taxonomy.dropped.iter().enumerate() {
        let values: Vec<i64> = (0..n_rows).map(|i| (i as i64 + 1) * (j as i64 + 1)).collect();
        columns.push(Column::new(name.as_str().into(), values));
    }

    for (j, name) in taxonomy.numeric.iter().enumerate() {
        let values: Vec<f64> = (0..n_rows).map(|i| numeric_value(i, j)).collect();
        columns.push(Column::new(name.as_str().into(), values));
    }

    for (j, name) in taxonomy.nominal.iter().enumerate() {
        let values: Vec<String> = (0..n_rows)
            .map(|i| format!("C{}", (i * (j + 1)) % (2 + j % 3)))
            .collect();
        columns.push(Column::new(name.as_str().into(), values));
    }

    for (j, name) in taxonomy.ordinal_numeric.iter().enumerate() {
        let values: Vec<i64> = (0..n_rows).map(|i| ordinal_rank(i, j)).collect();
        columns.push(Column::new(name.as_str().into(), values));
    }

    for (j, scale) in taxonomy.ordinal_encoded.iter().enumerate() {
        let values: Vec<String> = (0..n_rows)
            .map(|i| scale.categories[(i + j) % scale.categories.len()].clone())
            .collect();
        columns.push(Column::new(scale.column.as_str().into(), values));
    }

    let target: Vec<f64> = (0..n_rows)
        .map(|i| {
            40_000.0
                + 55.0 * numeric_value(i, 1)
                + 90.0 * numeric_value(i, 10)
                + 12_000.0 * ordinal_rank(i, 0) as f64
        })
        .collect();
    columns.push(Column::new(taxonomy.target.as_str().into(), target));

    Ok(DataFrame::new(columns)?)
}

fn numeric_value(row: usize, col: usize) -> f64 {
    (((row * (7 + col) + 3 * col) % 23) * (col + 1)) as f64
}

fn ordinal_rank(row: usize, col: usize) -> i64 {
    1 + ((row * (col + 2)) % 10) as i64
}
