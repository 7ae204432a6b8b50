//! Error types for the csv2sql model.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building column rules or parsing model arguments.
#[derive(Debug, Error)]
pub enum ModelError {
    // === Rules Errors ===
    /// A column was placed in more than one specialized set.
    #[error("column '{column}' is listed as both {first} and {second}")]
    ConflictingKinds {
        column: String,
        first: &'static str,
        second: &'static str,
    },

    /// A max-length entry of zero would erase every value.
    #[error("max length for column '{column}' must be greater than zero")]
    ZeroMaxLength { column: String },

    /// A rule entry names an empty column.
    #[error("rules contain an empty column name in {table}")]
    EmptyColumnName { table: &'static str },

    /// Failed to read the rules file.
    #[error("failed to read rules file {path}: {source}")]
    RulesRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rules file is not valid TOML for the rules schema.
    #[error("failed to parse rules file {path}: {message}")]
    RulesParse { path: PathBuf, message: String },

    // === Argument Errors ===
    /// Extra-column argument does not follow `name:start=N[:end=M]` or `name:file=PATH`.
    #[error("invalid extra column '{spec}': {reason}")]
    InvalidExtraColumn { spec: String, reason: String },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelError::ConflictingKinds {
            column: "qty".to_string(),
            first: "integer",
            second: "decimal",
        };
        assert_eq!(
            err.to_string(),
            "column 'qty' is listed as both integer and decimal"
        );
    }
}
