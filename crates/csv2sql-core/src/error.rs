//! Error types for conversion.

use thiserror::Error;

/// Errors that abort a conversion run.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The injected column has fewer values than the table has rows.
    #[error("extra column '{column}' has {available} values but the input has {rows} rows")]
    ExtraValuesExhausted {
        column: String,
        available: usize,
        rows: usize,
    },

    /// A generated sequence value does not fit in 64 bits.
    #[error("extra column '{column}' sequence overflows starting at {start}")]
    SequenceOverflow { column: String, start: i64 },

    /// A row carries a different number of values than there are columns.
    #[error("row {row} has {found} values but {expected} columns were declared")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The injected column has the same name as a CSV column.
    #[error("extra column '{column}' duplicates a column of the input")]
    DuplicateColumn { column: String },
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, CoreError>;
