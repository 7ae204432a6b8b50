//! Column kinds assigned by name lookup.

use std::fmt;

/// Formatting category for a column.
///
/// A column is classified by its lower-cased name only, never by its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Quoted text, optionally truncated to `max_len` characters after escaping.
    Text { max_len: Option<usize> },
    /// Arbitrary-precision decimal; missing or malformed becomes `0`.
    Decimal,
    /// Integer truncated from a float parse; missing or malformed becomes `NULL`.
    Integer,
    /// `TRUE`/`FALSE`; anything unrecognized is `FALSE`.
    Boolean,
    /// HTML-escaped paragraph with `<br>` line breaks.
    Html,
}

impl ColumnKind {
    /// Plain text without truncation.
    pub const PLAIN: Self = Self::Text { max_len: None };

    /// Short label used in listings and error messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Text { max_len: None } => "text",
            Self::Text { max_len: Some(_) } => "truncated text",
            Self::Decimal => "decimal",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Html => "html",
        }
    }
}

impl Default for ColumnKind {
    fn default() -> Self {
        Self::PLAIN
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text {
                max_len: Some(max_len),
            } => write!(f, "text({max_len})"),
            other => write!(f, "{}", other.label()),
        }
    }
}
