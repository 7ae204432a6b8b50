//! Value formatter.
//!
//! Turns one raw cell into the SQL literal placed in a VALUES list. Every cell
//! is handled as its CSV text; the column name alone decides the path:
//!
//! 1. a missing value in a column with a missing default (`condition`) becomes
//!    that default, quoted
//! 2. decimal columns: `0` when missing, malformed, or with an exponent beyond
//!    [`MAX_DECIMAL_SCALE`], otherwise the plain decimal with grouping commas
//!    removed
//! 3. integer columns: `NULL` when missing or malformed, otherwise the value
//!    parsed as a float and truncated toward zero
//! 4. boolean columns: `TRUE` for `1`/`true`/`yes`/`y`, `FALSE` for anything else
//! 5. HTML columns: see [`crate::html`]
//! 6. everything else: `NULL` when missing, otherwise escaped, truncated to the
//!    column's max length, and quoted

use std::str::FromStr;

use bigdecimal::BigDecimal;
use csv2sql_model::{Cell, ColumnKind, ColumnRules, SqlLiteral, double_quotes};

use crate::html::format_html;

/// Largest scale magnitude rendered in plain notation. `1e100000000` would
/// otherwise expand to a literal of a hundred million digits.
pub const MAX_DECIMAL_SCALE: u64 = 1000;

/// Lower-cased tokens accepted as true.
pub const TRUE_TOKENS: &[&str] = &["1", "true", "yes", "y"];

/// Per-column formatting decision, computed once from the column name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPlan {
    pub kind: ColumnKind,
    pub missing_default: Option<String>,
}

/// Formats cells according to a set of column rules.
#[derive(Debug, Clone, Copy)]
pub struct ValueFormatter<'a> {
    rules: &'a ColumnRules,
}

impl<'a> ValueFormatter<'a> {
    pub fn new(rules: &'a ColumnRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'a ColumnRules {
        self.rules
    }

    /// Looks up the kind and missing default for a column.
    pub fn plan(&self, column: &str) -> ColumnPlan {
        ColumnPlan {
            kind: self.rules.classify(column),
            missing_default: self.rules.missing_default(column).map(str::to_string),
        }
    }

    /// Formats one raw value for the named column.
    pub fn format(&self, column: &str, raw: &str) -> SqlLiteral {
        self.format_planned(&self.plan(column), raw)
    }

    /// Formats one raw value using a precomputed plan.
    pub fn format_planned(&self, plan: &ColumnPlan, raw: &str) -> SqlLiteral {
        let cell = self.rules.cell(raw);
        if cell.missing
            && let Some(default) = &plan.missing_default
        {
            return SqlLiteral::Text(escape_text(default));
        }
        match plan.kind {
            ColumnKind::Decimal => format_decimal(cell),
            ColumnKind::Integer => format_integer(cell),
            ColumnKind::Boolean => format_boolean(cell),
            ColumnKind::Html => format_html(cell),
            ColumnKind::Text { max_len } => format_text(cell, max_len),
        }
    }
}

/// Doubles single quotes and replaces each CR and LF with a space.
pub fn escape_text(value: &str) -> String {
    double_quotes(value).replace(['\r', '\n'], " ")
}

fn format_decimal(cell: Cell<'_>) -> SqlLiteral {
    if cell.missing {
        return SqlLiteral::Number("0".to_string());
    }
    let cleaned = cell.raw.replace(',', "");
    match BigDecimal::from_str(cleaned.trim()) {
        Ok(value) => {
            let (_, scale) = value.as_bigint_and_exponent();
            if scale.unsigned_abs() > MAX_DECIMAL_SCALE {
                tracing::trace!(scale, "decimal exponent out of range replaced with 0");
                return SqlLiteral::Number("0".to_string());
            }
            SqlLiteral::Number(value.to_plain_string())
        }
        Err(_) => {
            tracing::trace!("malformed decimal replaced with 0");
            SqlLiteral::Number("0".to_string())
        }
    }
}

fn format_integer(cell: Cell<'_>) -> SqlLiteral {
    if cell.missing {
        return SqlLiteral::Null;
    }
    match cell.trimmed().parse::<f64>() {
        Ok(value) if value.is_finite() => SqlLiteral::Number(truncate_float(value)),
        _ => {
            tracing::trace!("malformed integer replaced with NULL");
            SqlLiteral::Null
        }
    }
}

/// Renders a finite float truncated toward zero as an integer token.
fn truncate_float(value: f64) -> String {
    let truncated = value.trunc();
    if truncated == 0.0 {
        // Avoids "-0" for inputs such as "-0.5".
        "0".to_string()
    } else if truncated.abs() < 9.0e15 {
        // Exactly representable, so the cast is lossless.
        #[allow(clippy::cast_possible_truncation)]
        let whole = truncated as i64;
        whole.to_string()
    } else {
        format!("{truncated:.0}")
    }
}

fn format_boolean(cell: Cell<'_>) -> SqlLiteral {
    if cell.missing {
        return SqlLiteral::Bool(false);
    }
    let token = cell.trimmed().to_lowercase();
    SqlLiteral::Bool(TRUE_TOKENS.contains(&token.as_str()))
}

/// Default text path: escape, truncate, quote.
pub(crate) fn format_text(cell: Cell<'_>, max_len: Option<usize>) -> SqlLiteral {
    if cell.missing {
        return SqlLiteral::Null;
    }
    let escaped = escape_text(cell.raw);
    let body = match max_len {
        Some(max_len) => truncate_escaped(escaped, max_len),
        None => escaped,
    };
    SqlLiteral::Text(body)
}

/// Cuts an escaped string to `max_len` characters.
///
/// Quotes in an escaped string always come in runs of even length, so an odd
/// trailing run means the cut split a doubled quote; the dangling half is
/// dropped.
fn truncate_escaped(escaped: String, max_len: usize) -> String {
    if escaped.chars().count() <= max_len {
        return escaped;
    }
    let mut cut: String = escaped.chars().take(max_len).collect();
    let trailing_quotes = cut.chars().rev().take_while(|c| *c == '\'').count();
    if trailing_quotes % 2 == 1 {
        cut.pop();
    }
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> ColumnRules {
        ColumnRules::builtin()
    }

    fn fmt(column: &str, raw: &str) -> String {
        ValueFormatter::new(&rules()).format(column, raw).to_string()
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(fmt("serial_no", ""), "NULL");
        assert_eq!(fmt("serial_no", "  "), "NULL");
        assert_eq!(fmt("serial_no", "NaN"), "NULL");
        assert_eq!(fmt("serial_no", "O'Brien"), "'O''Brien'");
        assert_eq!(fmt("serial_no", "a\r\nb"), "'a  b'");
        assert_eq!(fmt("serial_no", "42"), "'42'");
    }

    #[test]
    fn test_truncated_text() {
        let long = "x".repeat(60);
        assert_eq!(fmt("status", &long), format!("'{}'", "x".repeat(50)));
        assert_eq!(fmt("Status", "short"), "'short'");
    }

    #[test]
    fn test_truncation_counts_escaped_length() {
        // 49 x's plus one quote escapes to 51 characters.
        let value = format!("{}'", "x".repeat(49));
        assert_eq!(fmt("status", &value), format!("'{}'", "x".repeat(49)));
        // 48 x's plus one quote escapes to exactly 50.
        let value = format!("{}'", "x".repeat(48));
        assert_eq!(fmt("status", &value), format!("'{}'''", "x".repeat(48)));
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let value = "é".repeat(60);
        assert_eq!(fmt("status", &value), format!("'{}'", "é".repeat(50)));
    }

    #[test]
    fn test_decimal() {
        assert_eq!(fmt("unit_cost", "1,234.50"), "1234.50");
        assert_eq!(fmt("unit_cost", ""), "0");
        assert_eq!(fmt("unit_cost", "abc"), "0");
        assert_eq!(fmt("unit_cost", " -12 "), "-12");
        assert_eq!(fmt("UNIT_COST", "1e3"), "1000");
        assert_eq!(fmt("amount", "$5"), "0");
    }

    #[test]
    fn test_decimal_exponent_bounds() {
        assert_eq!(fmt("unit_cost", "1e100000000"), "0");
        assert_eq!(fmt("unit_cost", "1e-100000000"), "0");
        assert_eq!(fmt("unit_cost", "1e10000000000"), "0");
        assert_eq!(fmt("unit_cost", "1.5e-3"), "0.0015");
        assert_eq!(fmt("unit_cost", "2e1000"), format!("2{}", "0".repeat(1000)));
    }

    #[test]
    fn test_integer() {
        assert_eq!(fmt("quantity", "12.9"), "12");
        assert_eq!(fmt("quantity", "-12.9"), "-12");
        assert_eq!(fmt("quantity", "-0.5"), "0");
        assert_eq!(fmt("quantity", "7"), "7");
        assert_eq!(fmt("quantity", ""), "NULL");
        assert_eq!(fmt("quantity", "twelve"), "NULL");
        assert_eq!(fmt("quantity", "inf"), "NULL");
        assert_eq!(fmt("quantity", "1,000"), "NULL");
    }

    #[test]
    fn test_boolean() {
        for value in ["Y", "yes", "1", "true", " TRUE "] {
            assert_eq!(fmt("is_active", value), "TRUE", "{value}");
        }
        for value in ["n", "", "maybe", "0", "false"] {
            assert_eq!(fmt("is_active", value), "FALSE", "{value}");
        }
    }

    #[test]
    fn test_condition_default() {
        assert_eq!(fmt("condition", ""), "'SERVICEABLE'");
        assert_eq!(fmt("CONDITION", "null"), "'SERVICEABLE'");
        assert_eq!(fmt("condition", "UNSERVICEABLE"), "'UNSERVICEABLE'");
    }

    #[test]
    fn test_missing_default_precedes_kind() {
        let file = csv2sql_model::RulesFile {
            integer: vec!["condition".to_string()],
            missing_defaults: [("condition".to_string(), "SERVICEABLE".to_string())].into(),
            ..Default::default()
        };
        let rules = ColumnRules::try_from(file).unwrap();
        let formatter = ValueFormatter::new(&rules);
        assert_eq!(formatter.format("condition", "").to_string(), "'SERVICEABLE'");
        assert_eq!(formatter.format("condition", "3.2").to_string(), "3");
    }

    #[test]
    fn test_missing_default_is_escaped() {
        let file = csv2sql_model::RulesFile {
            missing_defaults: [("status".to_string(), "N/A'd\r\nlater".to_string())].into(),
            ..Default::default()
        };
        let rules = ColumnRules::try_from(file).unwrap();
        let formatter = ValueFormatter::new(&rules);
        assert_eq!(formatter.format("status", "").to_string(), "'N/A''d  later'");
    }

    #[test]
    fn test_html_column_delegates() {
        assert_eq!(
            fmt("specifications", "Line1\nLine2"),
            "'<p>Line1<br>Line2</p>'"
        );
    }

    #[test]
    fn test_plan_matches_format() {
        let rules = rules();
        let formatter = ValueFormatter::new(&rules);
        let plan = formatter.plan("Unit_Cost");
        assert_eq!(plan.kind, ColumnKind::Decimal);
        assert_eq!(
            formatter.format_planned(&plan, "1,000"),
            formatter.format("unit_cost", "1,000")
        );
    }
}
