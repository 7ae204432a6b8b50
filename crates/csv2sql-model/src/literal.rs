//! SQL literal fragments.

use std::fmt;

/// The exact text placed in a VALUES list for one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlLiteral {
    /// `NULL`
    Null,
    /// `TRUE` or `FALSE`
    Bool(bool),
    /// A bare numeric token, already canonical.
    Number(String),
    /// String body with quotes already doubled; rendered inside single quotes.
    Text(String),
}

impl SqlLiteral {
    /// Builds a quoted literal from unescaped text, doubling single quotes.
    pub fn text(value: &str) -> Self {
        Self::Text(double_quotes(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for SqlLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(true) => f.write_str("TRUE"),
            Self::Bool(false) => f.write_str("FALSE"),
            Self::Number(value) => f.write_str(value),
            Self::Text(body) => write!(f, "'{body}'"),
        }
    }
}

/// Doubles every single quote so the text can sit inside a SQL string literal.
pub fn double_quotes(value: &str) -> String {
    value.replace('\'', "''")
}
