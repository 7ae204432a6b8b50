//! CSV file reading into an in-memory table.

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};
use crate::header::{normalize_header, normalize_key};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// A CSV file held fully in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTable {
    /// Source path, for error messages.
    pub path: PathBuf,
    /// Trimmed header names in file order.
    pub columns: Vec<String>,
    /// Raw cell text; every row has exactly `columns.len()` cells.
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Finds a column by name, ignoring case and surrounding whitespace.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let key = normalize_key(name);
        self.columns.iter().position(|c| normalize_key(c) == key)
    }

    /// Like [`column_index`](Self::column_index) but fails with `MissingColumn`.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| IngestError::MissingColumn {
                column: name.to_string(),
                path: self.path.clone(),
            })
    }

    /// All values of one column in row order.
    pub fn column_values(&self, name: &str) -> Result<Vec<&str>> {
        let idx = self.require_column(name)?;
        Ok(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }
}

/// Rejects UTF-16 input, which would otherwise surface as a confusing parse error.
pub fn validate_encoding(bytes: &[u8], path: &Path) -> Result<()> {
    if bytes.len() >= 2 {
        if bytes[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if bytes[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }
    Ok(())
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::from_io(path, e))?;
    validate_encoding(&bytes, path)?;
    Ok(bytes)
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

/// Reads a CSV file whose first row is the header.
///
/// Blank lines are skipped. Rows shorter than the header are padded with
/// empty cells; rows longer than the header are an error.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let bytes = read_bytes(path)?;
    let data = strip_bom(&bytes);
    if data.iter().all(u8::is_ascii_whitespace) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let parse_error = |e: csv::Error| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let columns: Vec<String> = reader
        .headers()
        .map_err(parse_error)?
        .iter()
        .map(normalize_header)
        .collect();
    if columns.is_empty() || columns.iter().all(String::is_empty) {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(parse_error)?;
        if record.len() == 1 && record[0].is_empty() && columns.len() > 1 {
            continue;
        }
        if record.len() > columns.len() {
            return Err(IngestError::RowTooWide {
                path: path.to_path_buf(),
                row: index + 1,
                expected: columns.len(),
                found: record.len(),
            });
        }
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(columns.len(), String::new());
        rows.push(row);
    }

    tracing::debug!(
        path = %path.display(),
        columns = columns.len(),
        rows = rows.len(),
        "loaded CSV table"
    );
    Ok(CsvTable {
        path: path.to_path_buf(),
        columns,
        rows,
    })
}

/// Reads a plain text file as one value per line.
///
/// A trailing newline does not add an empty value; `\r\n` endings are accepted.
pub fn read_value_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = read_bytes(path)?;
    let text = String::from_utf8(strip_bom(&bytes).to_vec()).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
    })?;
    Ok(text.lines().map(str::to_string).collect())
}
