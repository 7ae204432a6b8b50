//! Injected leading column.
//!
//! The extra column is prepended to every row and draws its value by row
//! index, independent of the CSV content.

use csv2sql_model::SqlLiteral;

use crate::error::{CoreError, Result};
use crate::format::{ValueFormatter, format_text};

/// Source of the injected values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtraValues {
    /// `start, start + 1, ...`; with `end`, never past `end` (inclusive).
    Sequence { start: i64, end: Option<i64> },
    /// Explicit values, one per row.
    Provided(Vec<String>),
}

/// A named column injected ahead of the CSV columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraColumn {
    pub name: String,
    pub values: ExtraValues,
}

impl ExtraColumn {
    pub fn sequence(name: impl Into<String>, start: i64) -> Self {
        Self {
            name: name.into(),
            values: ExtraValues::Sequence { start, end: None },
        }
    }

    pub fn provided(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values: ExtraValues::Provided(values),
        }
    }

    /// Produces exactly `rows` literals, or fails if the source runs short.
    pub fn literals(&self, rows: usize, formatter: &ValueFormatter<'_>) -> Result<Vec<SqlLiteral>> {
        match &self.values {
            ExtraValues::Sequence { start, end } => {
                if let Some(end) = end {
                    let span = i128::from(*end) - i128::from(*start) + 1;
                    let available = usize::try_from(span.max(0)).unwrap_or(usize::MAX);
                    if available < rows {
                        return Err(self.exhausted(available, rows));
                    }
                }
                let values = sequence_values(*start, rows).ok_or_else(|| {
                    CoreError::SequenceOverflow {
                        column: self.name.clone(),
                        start: *start,
                    }
                })?;
                Ok(values
                    .into_iter()
                    .map(|v| SqlLiteral::Number(v.to_string()))
                    .collect())
            }
            ExtraValues::Provided(values) => {
                if values.len() < rows {
                    return Err(self.exhausted(values.len(), rows));
                }
                let max_len = formatter.rules().max_length(&self.name);
                Ok(values
                    .iter()
                    .take(rows)
                    .map(|value| provided_literal(value, formatter, max_len))
                    .collect())
            }
        }
    }

    fn exhausted(&self, available: usize, rows: usize) -> CoreError {
        CoreError::ExtraValuesExhausted {
            column: self.name.clone(),
            available,
            rows,
        }
    }
}

/// `start, start + 1, ..., start + rows - 1`, or `None` on overflow.
pub fn sequence_values(start: i64, rows: usize) -> Option<Vec<i64>> {
    let mut values = Vec::with_capacity(rows);
    let mut next = start;
    for index in 0..rows {
        values.push(next);
        if index + 1 < rows {
            next = next.checked_add(1)?;
        }
    }
    Some(values)
}

fn provided_literal(
    value: &str,
    formatter: &ValueFormatter<'_>,
    max_len: Option<usize>,
) -> SqlLiteral {
    let cell = formatter.rules().cell(value);
    if !cell.missing
        && let Ok(number) = cell.trimmed().parse::<i64>()
    {
        return SqlLiteral::Number(number.to_string());
    }
    format_text(cell, max_len)
}
