use ames_prep::dataset::synthetic::ames_frame;
use ames_prep::dataset::split_x_y;
use ames_prep::preprocessing::{validate_columns, FittedTransformer, Pipeline, PreprocessingError};
use ames_prep::taxonomy::ColumnTaxonomy;
use polars::prelude::*;
use std::collections::HashSet;

fn string_column(df: &DataFrame, name: &str) -> Vec<Option<String>> {
    df.column(name)
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect()
}

fn float_column(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    df.column(name)
        .unwrap()
        .as_materialized_series()
        .strict_cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect()
}

#[test]
fn test_split_keeps_dropped_columns() {
    let taxonomy = ColumnTaxonomy::ames();
    let df = ames_frame(12).unwrap();

    let (x, y) = split_x_y(&df, &taxonomy).unwrap();

    assert_eq!(x.height(), df.height());
    assert_eq!(x.width(), df.width() - 1);
    assert_eq!(y.len(), 12);
    assert_eq!(y.name().as_str(), "SalePrice");
    for dropped in &taxonomy.dropped {
        assert!(x.column(dropped).is_ok(), "{} should survive the split", dropped);
    }
    assert!(x.column("SalePrice").is_err());
}

#[test]
fn test_refit_is_deterministic() {
    let taxonomy = ColumnTaxonomy::ames();
    let (x, y) = split_x_y(&ames_frame(20).unwrap(), &taxonomy).unwrap();

    let first = Pipeline::new(&taxonomy).unwrap().fit_xy(&x, Some(&y)).unwrap();
    let second = Pipeline::new(&taxonomy).unwrap().fit_xy(&x, Some(&y)).unwrap();

    let a = first.transform(&x).unwrap();
    let b = second.transform(&x).unwrap();
    assert_eq!(a.names(), b.names());
    assert_eq!(a.values(), b.values());
}

#[test]
fn test_unseen_nominal_gives_zero_block() {
    let taxonomy = ColumnTaxonomy::ames();
    let (x, y) = split_x_y(&ames_frame(10).unwrap(), &taxonomy).unwrap();
    let fitted = Pipeline::new(&taxonomy).unwrap().fit_xy(&x, Some(&y)).unwrap();
    let width = fitted.n_features_out();

    let mut batch = x.slice(0, 3);
    batch
        .with_column(Column::new(
            "Neighborhood".into(),
            &["Atlantis", "Atlantis", "Atlantis"],
        ))
        .unwrap();
    let features = fitted.transform(&batch).unwrap();

    assert_eq!(features.ncols(), width);
    let block: Vec<&String> = features
        .names()
        .iter()
        .filter(|n| n.starts_with("Neighborhood_"))
        .collect();
    assert!(!block.is_empty());
    for name in block {
        let column = features.column(name).unwrap();
        assert!(column.iter().all(|&v| v == 0.0), "{} not zero", name);
    }
}

#[test]
fn test_ordinal_missing_and_unknown_codes() {
    let taxonomy = ColumnTaxonomy::ames();
    let (x, y) = split_x_y(&ames_frame(10).unwrap(), &taxonomy).unwrap();
    let fitted = Pipeline::new(&taxonomy).unwrap().fit_xy(&x, Some(&y)).unwrap();

    let mut batch = x.slice(0, 3);
    batch
        .with_column(Column::new(
            "Bsmt Qual".into(),
            &[None, Some("None"), Some("Superb")],
        ))
        .unwrap();
    let features = fitted.transform(&batch).unwrap();

    let bsmt = features.column("Bsmt Qual").unwrap();
    assert_eq!(bsmt[0], 0.0);
    assert_eq!(bsmt[0], bsmt[1]);
    assert_eq!(bsmt[2], -1.0);
}

#[test]
fn test_validator_lists_sorted_missing_columns() {
    let taxonomy = ColumnTaxonomy::ames();
    let df = ames_frame(5)
        .unwrap()
        .drop("SalePrice")
        .unwrap()
        .drop("Lot Area")
        .unwrap();

    let err = validate_columns(&df, &taxonomy, true).unwrap_err();
    match &err {
        PreprocessingError::MissingColumns(cols) => {
            assert_eq!(cols, &["Lot Area".to_string(), "SalePrice".to_string()]);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err.to_string().contains(r#"["Lot Area", "SalePrice"]"#));

    let split_err = split_x_y(&df, &taxonomy).unwrap_err();
    assert_eq!(split_err.to_string(), err.to_string());
}

#[test]
fn test_inference_requires_every_feature_column() {
    let taxonomy = ColumnTaxonomy::ames();
    let (x, y) = split_x_y(&ames_frame(8).unwrap(), &taxonomy).unwrap();
    let fitted = Pipeline::new(&taxonomy).unwrap().fit_xy(&x, Some(&y)).unwrap();

    let result = fitted.transform(&x.drop("Garage Area").unwrap());
    assert!(matches!(
        result,
        Err(PreprocessingError::MissingColumns(ref cols)) if cols == &["Garage Area"]
    ));
}

#[test]
fn test_ten_row_holdout_scenario() {
    let taxonomy = ColumnTaxonomy::ames();
    let mut df = ames_frame(10).unwrap();

    let mut frontage = float_column(&df, "Lot Frontage");
    frontage[1] = None;
    frontage[4] = None;
    df.with_column(Column::new("Lot Frontage".into(), frontage))
        .unwrap();

    let mut neighborhood = string_column(&df, "Neighborhood");
    neighborhood[9] = Some("Unseen Hills".to_string());
    df.with_column(Column::new("Neighborhood".into(), neighborhood))
        .unwrap();

    let mut kitchen = string_column(&df, "Kitchen Qual");
    kitchen[2] = None;
    df.with_column(Column::new("Kitchen Qual".into(), kitchen))
        .unwrap();

    let (x, y) = split_x_y(&df, &taxonomy).unwrap();
    let x_train = x.slice(0, 8);
    let y_train = y.slice(0, 8);

    let fitted = Pipeline::new(&taxonomy)
        .unwrap()
        .fit_xy(&x_train, Some(&y_train))
        .unwrap();
    let features = fitted.transform(&x).unwrap();

    let vocab: usize = taxonomy
        .nominal
        .iter()
        .map(|col| {
            string_column(&x_train, col)
                .into_iter()
                .flatten()
                .collect::<HashSet<String>>()
                .len()
        })
        .sum();
    let expected_width = taxonomy.numeric.len()
        + vocab
        + taxonomy.ordinal_numeric.len()
        + taxonomy.ordinal_encoded.len();

    assert_eq!(features.nrows(), 10);
    assert_eq!(features.ncols(), expected_width);
    assert!(!features.has_missing());

    // Imputed from the six observed training values.
    let mut observed: Vec<f64> = float_column(&x_train, "Lot Frontage")
        .into_iter()
        .flatten()
        .collect();
    observed.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let median = (observed[2] + observed[3]) / 2.0;
    let frontage_out = features.column("Lot Frontage").unwrap();
    assert!((frontage_out[1] - median).abs() < 1e-12);
    assert!((frontage_out[4] - median).abs() < 1e-12);

    let kitchen_out = features.column("Kitchen Qual").unwrap();
    assert_eq!(kitchen_out[2], 0.0);

    let held_out = features.values().row(9);
    for (name, value) in features.names().iter().zip(held_out.iter()) {
        if name.starts_with("Neighborhood_") {
            assert_eq!(*value, 0.0, "{} should be zero for an unseen category", name);
        }
    }
}

#[test]
fn test_feature_order_follows_groups() {
    let taxonomy = ColumnTaxonomy::ames();
    let (x, y) = split_x_y(&ames_frame(10).unwrap(), &taxonomy).unwrap();
    let fitted = Pipeline::new(&taxonomy).unwrap().fit_xy(&x, Some(&y)).unwrap();
    let names = fitted.feature_names_out();

    assert_eq!(&names[..taxonomy.numeric.len()], taxonomy.numeric.as_slice());

    let n = names.len();
    let ordinal_tail: Vec<&str> = taxonomy
        .ordinal_numeric
        .iter()
        .map(String::as_str)
        .chain(taxonomy.ordinal_encoded_columns())
        .collect();
    let tail: Vec<&str> = names[n - ordinal_tail.len()..]
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(tail, ordinal_tail);

    // First-seen order within a nominal block: row 0 is C0, row 1 is C1.
    assert_eq!(names[taxonomy.numeric.len()], "MS Zoning_C0");
    assert_eq!(names[taxonomy.numeric.len() + 1], "MS Zoning_C1");
}

#[test]
fn test_extra_columns_are_ignored() {
    let taxonomy = ColumnTaxonomy::ames();
    let (x, y) = split_x_y(&ames_frame(10).unwrap(), &taxonomy).unwrap();
    let fitted = Pipeline::new(&taxonomy).unwrap().fit_xy(&x, Some(&y)).unwrap();

    let mut extended = x.clone();
    extended
        .with_column(Column::new("Notes".into(), vec!["n/a"; 10]))
        .unwrap();

    let plain = fitted.transform(&x).unwrap();
    let with_extra = fitted.transform(&extended).unwrap();
    assert_eq!(plain.values(), with_extra.values());
}
