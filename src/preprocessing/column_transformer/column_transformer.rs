//! ColumnTransformer implementation.
//!
//! Applies the group policy to each column and concatenates results:
//!
//! | Group | Imputation | Encoding |
//! |-------|-----------|----------|
//! | `Numeric` | median | none |
//! | `Nominal` | most frequent | one-hot, unknown → all zeros |
//! | `OrdinalNumeric` | median | none |
//! | `OrdinalCategorical` | constant `"None"` | rank on the scale, unknown → `-1` |
//!
//! Columns that belong to no group are dropped.

use crate::dataset::columns::{absent_columns, column_names};
use crate::dataset::ColumnValues;
use crate::preprocessing::encoding::{
    FittedOneHotEncoder, FittedOrdinalEncoder, HandleUnknown, OneHotEncoder, OrdinalEncoder,
};
use crate::preprocessing::error::{PreprocessingError, Result};
use crate::preprocessing::feature_table::FeatureTable;
use crate::preprocessing::imputation::{FillValue, FittedSimpleImputer, ImputeStrategy, SimpleImputer};
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use crate::taxonomy::{ColumnTaxonomy, OrdinalScale, NOT_APPLICABLE, UNKNOWN_ORDINAL_CODE};
use ndarray::{s, Array2};
use polars::prelude::DataFrame;
use std::collections::HashSet;
use tracing::{debug, warn};

/// A set of columns sharing one imputation/encoding policy.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnGroup {
    Numeric(Vec<String>),
    Nominal(Vec<String>),
    /// Small integer ranks that need no re-encoding.
    OrdinalNumeric(Vec<String>),
    /// Labels encoded by their rank on a fixed scale.
    OrdinalCategorical(Vec<OrdinalScale>),
}

impl ColumnGroup {
    fn name(&self) -> &'static str {
        match self {
            ColumnGroup::Numeric(_) => "numeric",
            ColumnGroup::Nominal(_) => "nominal",
            ColumnGroup::OrdinalNumeric(_) => "ordinal_numeric",
            ColumnGroup::OrdinalCategorical(_) => "ordinal_categorical",
        }
    }

    /// Input columns, in output order.
    pub fn columns(&self) -> Vec<&str> {
        match self {
            ColumnGroup::Numeric(cols)
            | ColumnGroup::Nominal(cols)
            | ColumnGroup::OrdinalNumeric(cols) => cols.iter().map(String::as_str).collect(),
            ColumnGroup::OrdinalCategorical(scales) => {
                scales.iter().map(|s| s.column.as_str()).collect()
            }
        }
    }

    fn fit(&self, df: &DataFrame) -> Result<FittedColumnGroup> {
        match self {
            ColumnGroup::Numeric(cols) => Ok(FittedColumnGroup::Numeric(fit_numeric(df, cols)?)),
            ColumnGroup::OrdinalNumeric(cols) => {
                Ok(FittedColumnGroup::OrdinalNumeric(fit_numeric(df, cols)?))
            }
            ColumnGroup::Nominal(cols) => {
                let mut fitted = Vec::with_capacity(cols.len());
                for col in cols {
                    let values = ColumnValues::categorical(df, col)?;
                    let imputer = SimpleImputer::new(ImputeStrategy::MostFrequent).fit(&values)?;
                    let imputed = imputer.transform(&values)?;
                    let encoder = OneHotEncoder::new()
                        .with_handle_unknown(HandleUnknown::Ignore)
                        .fit(labels(&imputed))?;
                    if encoder.n_features_out() == 0 {
                        warn!(column = %col, "Nominal column has no observed values; it adds no features");
                    }
                    fitted.push(NominalColumn {
                        column: col.clone(),
                        imputer,
                        encoder,
                    });
                }
                Ok(FittedColumnGroup::Nominal(fitted))
            }
            ColumnGroup::OrdinalCategorical(scales) => {
                let mut fitted = Vec::with_capacity(scales.len());
                for scale in scales {
                    let values = ColumnValues::categorical(df, &scale.column)?;
                    let imputer =
                        SimpleImputer::constant(FillValue::Categorical(NOT_APPLICABLE.to_string()))
                            .fit(&values)?;
                    let encoder = OrdinalEncoder::new(scale.categories.iter().cloned())
                        .with_handle_unknown(HandleUnknown::UseEncodedValue(UNKNOWN_ORDINAL_CODE))
                        .fit(labels(&imputer.transform(&values)?))?;
                    fitted.push(OrdinalColumn {
                        column: scale.column.clone(),
                        imputer,
                        encoder,
                    });
                }
                Ok(FittedColumnGroup::OrdinalCategorical(fitted))
            }
        }
    }
}

fn fit_numeric(df: &DataFrame, cols: &[String]) -> Result<Vec<NumericColumn>> {
    let mut fitted = Vec::with_capacity(cols.len());
    for col in cols {
        let values = ColumnValues::numeric(df, col)?;
        let imputer = SimpleImputer::new(ImputeStrategy::Median).fit(&values)?;
        if imputer.fitted_on_all_missing() {
            warn!(column = %col, "Numeric column is entirely missing; imputing 0.0");
        }
        fitted.push(NumericColumn {
            column: col.clone(),
            imputer,
        });
    }
    Ok(fitted)
}

fn labels(values: &ColumnValues) -> &[Option<String>] {
    match values {
        ColumnValues::Categorical(v) => v,
        ColumnValues::Numeric(_) => &[],
    }
}

fn numbers(values: ColumnValues) -> Vec<f64> {
    match values {
        ColumnValues::Numeric(v) => v.into_iter().map(|x| x.unwrap_or(f64::NAN)).collect(),
        ColumnValues::Categorical(v) => vec![f64::NAN; v.len()],
    }
}

/// Fitted state of a numeric or ordinal-numeric column.
#[derive(Clone, Debug)]
pub struct NumericColumn {
    column: String,
    imputer: FittedSimpleImputer,
}

#[derive(Clone, Debug)]
pub struct NominalColumn {
    column: String,
    imputer: FittedSimpleImputer,
    encoder: FittedOneHotEncoder,
}

#[derive(Clone, Debug)]
pub struct OrdinalColumn {
    column: String,
    imputer: FittedSimpleImputer,
    encoder: FittedOrdinalEncoder,
}

/// Frozen per-column state of one group.
#[derive(Clone, Debug)]
pub enum FittedColumnGroup {
    Numeric(Vec<NumericColumn>),
    Nominal(Vec<NominalColumn>),
    OrdinalNumeric(Vec<NumericColumn>),
    OrdinalCategorical(Vec<OrdinalColumn>),
}

impl FittedColumnGroup {
    /// Get the group name.
    pub fn group_name(&self) -> &'static str {
        match self {
            FittedColumnGroup::Numeric(_) => "numeric",
            FittedColumnGroup::Nominal(_) => "nominal",
            FittedColumnGroup::OrdinalNumeric(_) => "ordinal_numeric",
            FittedColumnGroup::OrdinalCategorical(_) => "ordinal_categorical",
        }
    }

    fn columns(&self) -> Vec<&str> {
        match self {
            FittedColumnGroup::Numeric(c) | FittedColumnGroup::OrdinalNumeric(c) => {
                c.iter().map(|c| c.column.as_str()).collect()
            }
            FittedColumnGroup::Nominal(c) => c.iter().map(|c| c.column.as_str()).collect(),
            FittedColumnGroup::OrdinalCategorical(c) => {
                c.iter().map(|c| c.column.as_str()).collect()
            }
        }
    }

    /// Output feature names of this group.
    pub fn feature_names(&self) -> Vec<String> {
        match self {
            FittedColumnGroup::Nominal(c) => c
                .iter()
                .flat_map(|c| c.encoder.feature_names(&c.column))
                .collect(),
            _ => self.columns().into_iter().map(str::to_string).collect(),
        }
    }

    /// Get the number of output features.
    pub fn n_features_out(&self) -> usize {
        match self {
            FittedColumnGroup::Nominal(c) => c.iter().map(|c| c.encoder.n_features_out()).sum(),
            _ => self.columns().len(),
        }
    }

    /// Imputation value learned for `column`, if it belongs to this group.
    pub fn statistic(&self, column: &str) -> Option<&FillValue> {
        let imputer = match self {
            FittedColumnGroup::Numeric(c) | FittedColumnGroup::OrdinalNumeric(c) => {
                c.iter().find(|c| c.column == column).map(|c| &c.imputer)
            }
            FittedColumnGroup::Nominal(c) => {
                c.iter().find(|c| c.column == column).map(|c| &c.imputer)
            }
            FittedColumnGroup::OrdinalCategorical(c) => {
                c.iter().find(|c| c.column == column).map(|c| &c.imputer)
            }
        };
        imputer.and_then(FittedSimpleImputer::statistic)
    }

    /// One-hot vocabulary learned for `column`, if it is nominal.
    pub fn categories(&self, column: &str) -> Option<&[String]> {
        match self {
            FittedColumnGroup::Nominal(c) => c
                .iter()
                .find(|c| c.column == column)
                .map(|c| c.encoder.categories()),
            _ => None,
        }
    }

    /// Write this group's block into `out` starting at column `offset`.
    fn transform_into(&self, df: &DataFrame, out: &mut Array2<f64>, offset: usize) -> Result<()> {
        let mut offset = offset;
        match self {
            FittedColumnGroup::Numeric(cols) | FittedColumnGroup::OrdinalNumeric(cols) => {
                for c in cols {
                    let values = c.imputer.transform(&ColumnValues::numeric(df, &c.column)?)?;
                    for (row, v) in numbers(values).into_iter().enumerate() {
                        out[[row, offset]] = v;
                    }
                    offset += 1;
                }
            }
            FittedColumnGroup::Nominal(cols) => {
                for c in cols {
                    let values = c.imputer.transform(&ColumnValues::categorical(df, &c.column)?)?;
                    let unknown = c.encoder.count_unknown(labels(&values));
                    if unknown > 0 {
                        debug!(column = %c.column, unknown, "Unseen categories encoded as all-zero rows");
                    }
                    let block = c.encoder.transform(labels(&values))?;
                    let width = block.ncols();
                    out.slice_mut(s![.., offset..offset + width]).assign(&block);
                    offset += width;
                }
            }
            FittedColumnGroup::OrdinalCategorical(cols) => {
                for c in cols {
                    let values = c.imputer.transform(&ColumnValues::categorical(df, &c.column)?)?;
                    let unknown = c.encoder.count_unknown(labels(&values));
                    if unknown > 0 {
                        debug!(column = %c.column, unknown, "Labels outside the ordinal scale encoded as {}", UNKNOWN_ORDINAL_CODE);
                    }
                    let encoded = c.encoder.transform(labels(&values))?;
                    out.column_mut(offset).assign(&encoded);
                    offset += 1;
                }
            }
        }
        Ok(())
    }
}

/// ColumnTransformer (unfitted).
///
/// # Example
/// ```ignore
/// use ames_prep::preprocessing::{ColumnTransformer, FittedTransformer, Transformer};
/// use ames_prep::taxonomy::ColumnTaxonomy;
///
/// let ct = ColumnTransformer::from_taxonomy(&ColumnTaxonomy::ames());
/// let fitted = ct.fit(&train_df)?;
/// let features = fitted.transform(&test_df)?;
/// ```
#[derive(Clone, Debug, Default)]
pub struct ColumnTransformer {
    groups: Vec<ColumnGroup>,
}

impl ColumnTransformer {
    /// Create an empty ColumnTransformer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Numeric, nominal, ordinal-numeric, then ordinal-encoded groups of `taxonomy`.
    pub fn from_taxonomy(taxonomy: &ColumnTaxonomy) -> Self {
        Self::new()
            .add(ColumnGroup::Numeric(taxonomy.numeric.clone()))
            .add(ColumnGroup::Nominal(taxonomy.nominal.clone()))
            .add(ColumnGroup::OrdinalNumeric(taxonomy.ordinal_numeric.clone()))
            .add(ColumnGroup::OrdinalCategorical(taxonomy.ordinal_encoded.clone()))
    }

    /// Append a group. Outputs are concatenated in insertion order.
    pub fn add(mut self, group: ColumnGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn groups(&self) -> &[ColumnGroup] {
        &self.groups
    }

    /// Get the number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub(crate) fn input_columns(&self) -> Vec<&str> {
        self.groups.iter().flat_map(ColumnGroup::columns).collect()
    }
}

impl Transformer for ColumnTransformer {
    type Input = DataFrame;
    type Output = FeatureTable;
    type Fitted = FittedColumnTransformer;

    fn fit(&self, data: &DataFrame) -> Result<FittedColumnTransformer> {
        if self.groups.is_empty() {
            return Err(PreprocessingError::InvalidParameter(
                "ColumnTransformer has no column groups".to_string(),
            ));
        }
        if data.height() == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit ColumnTransformer on empty data".to_string(),
            ));
        }

        let inputs = self.input_columns();
        let mut seen = HashSet::new();
        let duplicates: Vec<&str> = inputs.iter().copied().filter(|c| !seen.insert(*c)).collect();
        if !duplicates.is_empty() {
            return Err(PreprocessingError::InvalidParameter(format!(
                "Columns assigned to more than one group: {:?}",
                duplicates
            )));
        }

        let missing = absent_columns(data, inputs.iter().copied());
        if !missing.is_empty() {
            return Err(PreprocessingError::MissingColumns(missing));
        }

        let mut groups = Vec::with_capacity(self.groups.len());
        for group in &self.groups {
            debug!(group = group.name(), columns = group.columns().len(), "Fitting column group");
            groups.push(group.fit(data)?);
        }

        let fitted = FittedColumnTransformer { groups };
        debug!(
            rows = data.height(),
            n_features_out = fitted.n_features_out(),
            "Fitted ColumnTransformer"
        );
        Ok(fitted)
    }
}

/// Fitted ColumnTransformer ready for inference.
#[derive(Clone, Debug)]
pub struct FittedColumnTransformer {
    groups: Vec<FittedColumnGroup>,
}

impl FittedColumnTransformer {
    /// Get the fitted groups.
    pub fn groups(&self) -> &[FittedColumnGroup] {
        &self.groups
    }

    /// Output feature names, in column order.
    pub fn feature_names_out(&self) -> Vec<String> {
        self.groups.iter().flat_map(|g| g.feature_names()).collect()
    }

    /// Imputation value learned for `column`.
    pub fn statistic(&self, column: &str) -> Option<&FillValue> {
        self.groups.iter().find_map(|g| g.statistic(column))
    }

    /// One-hot vocabulary learned for a nominal `column`.
    pub fn categories(&self, column: &str) -> Option<&[String]> {
        self.groups.iter().find_map(|g| g.categories(column))
    }

    fn input_columns(&self) -> Vec<&str> {
        self.groups.iter().flat_map(|g| g.columns()).collect()
    }
}

impl FittedTransformer for FittedColumnTransformer {
    type Input = DataFrame;
    type Output = FeatureTable;

    fn transform(&self, data: &DataFrame) -> Result<FeatureTable> {
        let inputs = self.input_columns();
        let missing = absent_columns(data, inputs.iter().copied());
        if !missing.is_empty() {
            return Err(PreprocessingError::MissingColumns(missing));
        }

        let known: HashSet<&str> = inputs.into_iter().collect();
        let remainder: Vec<String> = column_names(data)
            .into_iter()
            .filter(|c| !known.contains(c.as_str()))
            .collect();
        if !remainder.is_empty() {
            debug!(columns = ?remainder, "Dropping columns outside every group");
        }

        let mut out = Array2::<f64>::zeros((data.height(), self.n_features_out()));
        let mut offset = 0;
        for group in &self.groups {
            group.transform_into(data, &mut out, offset)?;
            offset += group.n_features_out();
        }

        Ok(FeatureTable::new(self.feature_names_out(), out))
    }

    fn n_features_out(&self) -> usize {
        self.groups.iter().map(FittedColumnGroup::n_features_out).sum()
    }
}
