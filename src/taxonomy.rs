//! Column taxonomy: the fixed partition of the input schema into
//! dropped, numeric, nominal and ordinal groups.
//!
//! A taxonomy is plain immutable data. It is built once (usually with
//! [`ColumnTaxonomy::ames`] or from a JSON file) and passed explicitly into
//! [`Pipeline::new`](crate::preprocessing::Pipeline::new).
//!
//! # Example
//! ```ignore
//! use ames_prep::taxonomy::ColumnTaxonomy;
//!
//! // Fails with `InvalidTaxonomy` if a column is listed in two groups.
//! let taxonomy = ColumnTaxonomy::from_json_file("config/taxonomy.json")?;
//! ```

use crate::preprocessing::error::{PreprocessingError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Category label used to fill missing ordinal values ("not applicable").
pub const NOT_APPLICABLE: &str = "None";

/// Code emitted for an ordinal category that is not on its scale.
pub const UNKNOWN_ORDINAL_CODE: i64 = -1;

/// Ordered category labels for one ordinal-encoded column.
///
/// The position of a label in `categories` is its rank.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdinalScale {
    /// Column the scale applies to.
    pub column: String,
    /// Labels from lowest to highest rank.
    pub categories: Vec<String>,
}

impl OrdinalScale {
    /// Create a scale from a column name and labels ordered low to high.
    pub fn new<S: Into<String>>(column: impl Into<String>, categories: Vec<S>) -> Self {
        Self {
            column: column.into(),
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }
}

/// Partition of the input schema into column groups.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnTaxonomy {
    /// Target column name.
    pub target: String,
    /// Identifier and leakage-prone columns removed before encoding.
    #[serde(default)]
    pub dropped: Vec<String>,
    /// Continuous or count columns: median imputation.
    #[serde(default)]
    pub numeric: Vec<String>,
    /// Unordered categoricals: mode imputation, then one-hot encoding.
    #[serde(default)]
    pub nominal: Vec<String>,
    /// Ordinal columns already expressed as integer ranks: median imputation.
    #[serde(default)]
    pub ordinal_numeric: Vec<String>,
    /// Ordinal categoricals: "None" imputation, then rank encoding.
    #[serde(default)]
    pub ordinal_encoded: Vec<OrdinalScale>,
}

impl ColumnTaxonomy {
    /// Parse a taxonomy from JSON and check that it is a valid partition.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let taxonomy: Self = serde_json::from_str(json)?;
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    /// Read and parse a taxonomy from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Names of the ordinal-encoded columns, in configured order.
    pub fn ordinal_encoded_columns(&self) -> impl Iterator<Item = &str> {
        self.ordinal_encoded.iter().map(|s| s.column.as_str())
    }

    /// Every taxonomy column (excluding the target), group by group.
    pub fn feature_columns(&self) -> Vec<&str> {
        self.dropped
            .iter()
            .chain(&self.numeric)
            .chain(&self.nominal)
            .chain(&self.ordinal_numeric)
            .map(String::as_str)
            .chain(self.ordinal_encoded_columns())
            .collect()
    }

    /// Columns the input must contain, optionally including the target.
    pub fn expected_columns(&self, require_target: bool) -> Vec<&str> {
        let mut cols = self.feature_columns();
        if require_target {
            cols.push(self.target.as_str());
        }
        cols
    }

    /// Whether `column` belongs to any group or is the target.
    pub fn classifies(&self, column: &str) -> bool {
        column == self.target || self.feature_columns().contains(&column)
    }

    /// Check that the groups are disjoint and every ordinal scale is well formed.
    pub fn validate(&self) -> Result<()> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut duplicates: Vec<&str> = Vec::new();
        for col in self.feature_columns() {
            if !seen.insert(col) {
                duplicates.push(col);
            }
        }
        if !duplicates.is_empty() {
            duplicates.sort_unstable();
            duplicates.dedup();
            return Err(PreprocessingError::InvalidTaxonomy(format!(
                "columns assigned more than once: {:?}",
                duplicates
            )));
        }
        if seen.contains(self.target.as_str()) {
            return Err(PreprocessingError::InvalidTaxonomy(format!(
                "target '{}' is also listed as a feature column",
                self.target
            )));
        }
        for scale in &self.ordinal_encoded {
            if scale.categories.is_empty() {
                return Err(PreprocessingError::InvalidTaxonomy(format!(
                    "ordinal scale for '{}' is empty",
                    scale.column
                )));
            }
            let unique: HashSet<&String> = scale.categories.iter().collect();
            if unique.len() != scale.categories.len() {
                return Err(PreprocessingError::InvalidTaxonomy(format!(
                    "ordinal scale for '{}' repeats a label",
                    scale.column
                )));
            }
        }
        Ok(())
    }

    /// The Ames housing taxonomy.
    pub fn ames() -> Self {
        let qual = || vec!["None", "Po", "Fa", "TA", "Gd", "Ex"];
        let fin_type = || vec!["None", "Unf", "LwQ", "Rec", "BLQ", "ALQ", "GLQ"];

        Self {
            target: "SalePrice".to_string(),
            dropped: strings(&[
                "Order",
                "PID",
                "Mo Sold",
                "Yr Sold",
                "Sale Type",
                "Sale Condition",
                "Pool QC",
                "Alley",
                "Fence",
                "Misc Feature",
            ]),
            numeric: strings(&[
                "Lot Frontage",
                "Lot Area",
                "Mas Vnr Area",
                "BsmtFin SF 1",
                "BsmtFin SF 2",
                "Bsmt Unf SF",
                "Total Bsmt SF",
                "1st Flr SF",
                "2nd Flr SF",
                "Low Qual Fin SF",
                "Gr Liv Area",
                "Bsmt Full Bath",
                "Bsmt Half Bath",
                "Full Bath",
                "Half Bath",
                "Bedroom AbvGr",
                "Kitchen AbvGr",
                "TotRms AbvGrd",
                "Fireplaces",
                "Garage Cars",
                "Garage Area",
                "Wood Deck SF",
                "Open Porch SF",
                "Enclosed Porch",
                "3Ssn Porch",
                "Screen Porch",
                "Pool Area",
                "Misc Val",
            ]),
            nominal: strings(&[
                "MS Zoning",
                "Street",
                "Land Contour",
                "Utilities",
                "Lot Config",
                "Neighborhood",
                "Condition 1",
                "Condition 2",
                "Bldg Type",
                "House Style",
                "Roof Style",
                "Roof Matl",
                "Exterior 1st",
                "Exterior 2nd",
                "Mas Vnr Type",
                "Foundation",
                "Heating",
                "Central Air",
                "Electrical",
                "Garage Type",
            ]),
            ordinal_numeric: strings(&["Overall Qual", "Overall Cond"]),
            ordinal_encoded: vec![
                OrdinalScale::new("Exter Qual", qual()),
                OrdinalScale::new("Exter Cond", qual()),
                OrdinalScale::new("Bsmt Qual", qual()),
                OrdinalScale::new("Bsmt Cond", qual()),
                OrdinalScale::new("Bsmt Exposure", vec!["None", "No", "Mn", "Av", "Gd"]),
                OrdinalScale::new("BsmtFin Type 1", fin_type()),
                OrdinalScale::new("BsmtFin Type 2", fin_type()),
                OrdinalScale::new("Heating QC", qual()),
                OrdinalScale::new("Kitchen Qual", qual()),
                OrdinalScale::new(
                    "Functional",
                    vec!["Sal", "Sev", "Maj2", "Maj1", "Mod", "Min2", "Min1", "Typ"],
                ),
                OrdinalScale::new("Fireplace Qu", qual()),
                OrdinalScale::new("Garage Finish", vec!["None", "Unf", "RFn", "Fin"]),
                OrdinalScale::new("Garage Qual", qual()),
                OrdinalScale::new("Garage Cond", qual()),
                OrdinalScale::new("Land Slope", vec!["Gtl", "Mod", "Sev"]),
                OrdinalScale::new("Lot Shape", vec!["IR3", "IR2", "IR1", "Reg"]),
                OrdinalScale::new("Paved Drive", vec!["N", "P", "Y"]),
            ],
        }
    }
}

impl Default for ColumnTaxonomy {
    fn default() -> Self {
        Self::ames()
    }
}

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
