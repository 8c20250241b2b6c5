//! Error types for the data layer

use thiserror::Error;

/// Failures while loading or aggregating an experiment table.
#[derive(Error, Debug)]
pub enum DataError {
    /// The input file could not be opened or read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Header or row structure is malformed
    #[error("parse error: {0}")]
    Parse(String),

    /// A column needed for plotting is absent from the table
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    /// A cell in a numeric column is not a number
    #[error("row {row}: column '{column}' has non-numeric value '{value}'")]
    Conversion {
        /// Zero-based data row (header excluded)
        row: usize,
        /// Column that failed to convert
        column: &'static str,
        /// The offending cell, as text
        value: String,
    },

    /// Error reported by the Parquet / Arrow reader
    #[error("parquet error: {0}")]
    Parquet(String),
}

impl From<csv::Error> for DataError {
    fn from(e: csv::Error) -> Self {
        if e.is_io_error() {
            match e.into_kind() {
                csv::ErrorKind::Io(io) => DataError::Io(io),
                other => DataError::Parse(format!("{other:?}")),
            }
        } else {
            DataError::Parse(e.to_string())
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(e: serde_json::Error) -> Self {
        DataError::Parse(e.to_string())
    }
}

impl From<parquet::errors::ParquetError> for DataError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        DataError::Parquet(e.to_string())
    }
}

impl From<arrow::error::ArrowError> for DataError {
    fn from(e: arrow::error::ArrowError) -> Self {
        DataError::Parquet(e.to_string())
    }
}
