//! CSV ingestion for csv2sql.
//!
//! Reads a whole CSV file into memory as a header plus rows of raw text.
//!
//! # Features
//!
//! - **Header handling**: first row is the header; names are trimmed
//! - **BOM tolerance**: a UTF-8 byte-order mark is stripped, UTF-16 is rejected
//! - **Row shaping**: short rows are padded with empty cells, wide rows are an error
//! - **Value lists**: plain one-value-per-line files for injected columns
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use csv2sql_ingest::read_csv_table;
//!
//! let table = read_csv_table(Path::new("items.csv"))?;
//! println!("{} rows, columns: {:?}", table.len(), table.columns);
//! ```

mod csv_table;
mod error;
mod header;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv_table::{CsvTable, read_csv_table, read_value_lines, validate_encoding};
pub use header::{normalize_header, normalize_key};
