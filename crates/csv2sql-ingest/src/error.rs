//! Error types for CSV ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading input files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file is empty.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Header row has no usable column names.
    #[error("could not detect header row in {path}")]
    NoHeaderDetected { path: PathBuf },

    /// A data row has more fields than the header.
    #[error("row {row} in {path} has {found} fields but the header has {expected}")]
    RowTooWide {
        path: PathBuf,
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Input uses an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {path} (expected UTF-8)")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === Column Errors ===
    /// Required column not found in the header.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },
}

impl IngestError {
    /// Maps an I/O error to `FileNotFound` or `FileRead`.
    pub(crate) fn from_io(path: &std::path::Path, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source: error,
            }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
