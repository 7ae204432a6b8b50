//! Raw cell values.

/// One raw CSV cell together with its missing flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell<'a> {
    /// Decoded cell text, untouched.
    pub raw: &'a str,
    /// True for empty, whitespace-only, or null-marker content.
    pub missing: bool,
}

impl<'a> Cell<'a> {
    pub fn new(raw: &'a str, missing: bool) -> Self {
        Self { raw, missing }
    }

    /// The cell text with surrounding whitespace removed.
    pub fn trimmed(&self) -> &'a str {
        self.raw.trim()
    }
}
