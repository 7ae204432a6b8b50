//! Extra-column argument grammar.
//!
//! An extra column is injected ahead of the CSV columns:
//!
//! - `item_id:start=100` numbers rows 100, 101, ... for as many rows as the CSV has
//! - `item_id:start=100:end=199` same, but fails if the CSV has more than 100 rows
//! - `item_id:file=ids.txt` takes one value per line from a file

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{ModelError, Result};

/// Where the injected column's values come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtraSource {
    /// Sequential integers starting at `start`, optionally capped at `end` (inclusive).
    Sequence { start: i64, end: Option<i64> },
    /// Values read from a file, one per line.
    File(PathBuf),
}

/// Parsed extra-column argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraColumnSpec {
    pub name: String,
    pub source: ExtraSource,
}

impl FromStr for ExtraColumnSpec {
    type Err = ModelError;

    fn from_str(spec: &str) -> Result<Self> {
        let invalid = |reason: &str| ModelError::InvalidExtraColumn {
            spec: spec.to_string(),
            reason: reason.to_string(),
        };

        let (name, rest) = spec
            .split_once(':')
            .ok_or_else(|| invalid("expected name:start=N or name:file=PATH"))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid("column name is empty"));
        }

        // Paths may contain ':' so the file form takes everything after the key.
        if let Some(path) = rest.strip_prefix("file=") {
            if path.trim().is_empty() {
                return Err(invalid("file path is empty"));
            }
            return Ok(Self {
                name: name.to_string(),
                source: ExtraSource::File(PathBuf::from(path.trim())),
            });
        }

        let mut start = None;
        let mut end = None;
        for part in rest.split(':') {
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| invalid(&format!("expected key=value, found '{part}'")))?;
            let parsed = value
                .trim()
                .parse::<i64>()
                .map_err(|_| invalid(&format!("{} must be an integer", key.trim())))?;
            match key.trim() {
                "start" if start.is_none() => start = Some(parsed),
                "end" if end.is_none() => end = Some(parsed),
                "start" | "end" => return Err(invalid(&format!("{} given twice", key.trim()))),
                other => return Err(invalid(&format!("unknown key '{other}'"))),
            }
        }

        let start = start.ok_or_else(|| invalid("start is required"))?;
        if let Some(end) = end
            && end < start
        {
            return Err(invalid("end must not be less than start"));
        }
        Ok(Self {
            name: name.to_string(),
            source: ExtraSource::Sequence { start, end },
        })
    }
}

impl fmt::Display for ExtraColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            ExtraSource::Sequence { start, end: None } => write!(f, "{}:start={start}", self.name),
            ExtraSource::Sequence {
                start,
                end: Some(end),
            } => write!(f, "{}:start={start}:end={end}", self.name),
            ExtraSource::File(path) => write!(f, "{}:file={}", self.name, path.display()),
        }
    }
}
