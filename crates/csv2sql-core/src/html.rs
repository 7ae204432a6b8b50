//! HTML paragraph formatting for rich-text columns.

use csv2sql_model::{Cell, SqlLiteral};

/// Formats a cell as a single `<p>` paragraph with `<br>` line breaks.
///
/// The text is HTML-escaped first, then single quotes are doubled so the
/// paragraph can sit inside a SQL string literal.
pub fn format_html(cell: Cell<'_>) -> SqlLiteral {
    if cell.missing {
        return SqlLiteral::Null;
    }
    let escaped = escape_html(cell.raw);
    let normalized = escaped.replace("\r\n", "\n").replace('\r', "\n");
    let body = normalized.trim().replace('\n', "<br>");
    SqlLiteral::text(&format!("<p>{body}</p>"))
}

/// Escapes `&`, `<`, `>`, and `"`.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}
