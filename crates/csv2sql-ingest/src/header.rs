//! Header normalization.

/// Normalizes a header value by trimming whitespace.
pub fn normalize_header(value: &str) -> String {
    value.trim().to_string()
}

/// Key used for case-insensitive header lookups.
pub fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}
