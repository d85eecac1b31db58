//! Store Layer Error Types

use std::path::PathBuf;
use thiserror::Error;

/// Result type for catalog-store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Ingestion errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Data directory does not exist
    #[error("Data directory not found: {0}")]
    DataDirNotFound(PathBuf),

    /// Required column missing after alias normalization
    #[error("Missing column '{column}' in {file}")]
    MissingColumn { file: PathBuf, column: String },

    /// A cell could not be parsed into the expected type
    #[error("Invalid value '{value}' for column '{column}' in {file}, line {line}")]
    InvalidValue {
        file: PathBuf,
        line: u64,
        column: String,
        value: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

// Helper methods
impl StoreError {
    pub fn missing_column(file: impl Into<PathBuf>, column: impl Into<String>) -> Self {
        StoreError::MissingColumn {
            file: file.into(),
            column: column.into(),
        }
    }

    pub fn invalid_value(
        file: impl Into<PathBuf>,
        line: u64,
        column: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        StoreError::InvalidValue {
            file: file.into(),
            line,
            column: column.into(),
            value: value.into(),
        }
    }
}
