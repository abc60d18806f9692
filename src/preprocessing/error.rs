//! Error types for preprocessing operations.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PreprocessingError>;

/// Error type for preprocessing operations.
#[derive(Debug, Error)]
pub enum PreprocessingError {
    /// Expected columns are absent from the input table. Names are sorted.
    #[error("Missing expected columns in dataframe: {0:?}")]
    MissingColumns(Vec<String>),
    /// Empty data provided where non-empty was required.
    #[error("Empty data: {0}")]
    EmptyData(String),
    /// Invalid hyperparameter or argument value.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// The column taxonomy is not a valid partition.
    #[error("Invalid taxonomy: {0}")]
    InvalidTaxonomy(String),
    /// Row or column counts disagree between two inputs.
    #[error("Shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: String, got: String },
    /// The target column contains missing values.
    #[error("Target column '{column}' has {count} missing values")]
    MissingTarget { column: String, count: usize },
    /// Numerical computation failed (singular system, non-finite values).
    #[error("Computation error: {0}")]
    Computation(String),
    /// Failure raised by the table library, passed through unchanged.
    #[error(transparent)]
    Polars(#[from] polars::error::PolarsError),
    /// Configuration could not be parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
    /// I/O error while reading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PreprocessingError {
    /// Build a [`PreprocessingError::MissingColumns`] with the names sorted and deduplicated.
    pub fn missing_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = columns.into_iter().map(Into::into).collect();
        names.sort();
        names.dedup();
        PreprocessingError::MissingColumns(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_sorted_in_message() {
        let err = PreprocessingError::missing_columns(["SalePrice", "Lot Area"]);
        assert_eq!(
            err.to_string(),
            r#"Missing expected columns in dataframe: ["Lot Area", "SalePrice"]"#
        );
    }

    #[test]
    fn test_missing_columns_deduplicated() {
        let err = PreprocessingError::missing_columns(["b", "a", "b"]);
        assert!(matches!(err, PreprocessingError::MissingColumns(ref c) if c == &["a", "b"]));
    }

    #[test]
    fn test_error_display_shape_mismatch() {
        let err = PreprocessingError::ShapeMismatch {
            expected: "10 rows".to_string(),
            got: "8 rows".to_string(),
        };
        assert!(err.to_string().contains("Shape mismatch"));
    }

    #[test]
    fn test_error_display_missing_target() {
        let err = PreprocessingError::MissingTarget {
            column: "SalePrice".to_string(),
            count: 2,
        };
        assert_eq!(
            err.to_string(),
            "Target column 'SalePrice' has 2 missing values"
        );
    }

    #[test]
    fn test_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: PreprocessingError = io_err.into();
        assert!(matches!(err, PreprocessingError::Io(_)));
    }

    #[test]
    fn test_error_from_json_error() {
        let json_err = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        let err: PreprocessingError = json_err.into();
        assert!(matches!(err, PreprocessingError::Config(_)));
    }

    #[test]
    fn test_error_is_std_error() {
        let err = PreprocessingError::InvalidParameter("test".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
