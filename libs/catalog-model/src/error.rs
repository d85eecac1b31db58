//! Model Layer Error Types

use thiserror::Error;

/// Result type for catalog-model operations
pub type Result<T> = std::result::Result<T, SelectionError>;

/// Selection errors
///
/// Both variants are recoverable business outcomes, not crashes: a missing
/// table is a configuration problem the caller must surface by name, while
/// a no-match is legitimate "no catalog coverage" for the given measurement.
/// Neither may ever be collapsed into a valid-looking code string.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SelectionError {
    /// Reference table absent from the loaded catalog
    #[error("Reference table missing: {0}")]
    TableMissing(String),

    /// Measurement falls outside every available range for the filters given
    #[error("No range in table '{table}' covers measurement {measurement}")]
    NoMatch { table: String, measurement: f64 },
}

// Helper methods
impl SelectionError {
    pub fn table_missing(table: impl Into<String>) -> Self {
        SelectionError::TableMissing(table.into())
    }

    pub fn no_match(table: impl Into<String>, measurement: f64) -> Self {
        SelectionError::NoMatch {
            table: table.into(),
            measurement,
        }
    }

    /// Whether this outcome names a missing table (configuration error)
    /// rather than a legitimate out-of-range result
    pub fn is_table_missing(&self) -> bool {
        matches!(self, SelectionError::TableMissing(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SelectionError::table_missing("cable_range_25kv");
        assert_eq!(err.to_string(), "Reference table missing: cable_range_25kv");
        assert!(err.is_table_missing());

        let err = SelectionError::no_match("shear_bolt_lugs", 300.0);
        assert_eq!(
            err.to_string(),
            "No range in table 'shear_bolt_lugs' covers measurement 300"
        );
        assert!(!err.is_table_missing());
    }
}
