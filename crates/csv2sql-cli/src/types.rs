use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub table: String,
    pub rows_read: usize,
    pub duplicates_removed: usize,
    pub statements: usize,
    pub extra_column: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinResult {
    pub keys_input: PathBuf,
    pub names_input: PathBuf,
    pub output: PathBuf,
    pub table: String,
    pub keys_loaded: usize,
    pub matched: usize,
    pub unmatched: usize,
}
