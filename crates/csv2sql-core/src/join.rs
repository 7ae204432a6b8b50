//! Name-key join between a keyed table and a table of display names.
//!
//! The keyed table maps `(first name, last name)` to an identifier. Each
//! display name of the form `"LAST, FIRST M."` is parsed, looked up exactly,
//! and rendered either as an INSERT or as a `-- No match found` comment.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::format::escape_text;

/// `(FIRST, LAST)`, trimmed and upper-cased.
pub type NameKey = (String, String);

static MIDDLE_INITIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+[A-Z]\.?$").expect("middle initial pattern is valid"));

/// Header names read from the two inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinColumns {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub name: String,
}

impl Default for JoinColumns {
    fn default() -> Self {
        Self {
            id: "uuid".to_string(),
            first_name: "first_name".to_string(),
            last_name: "last_name".to_string(),
            name: "name".to_string(),
        }
    }
}

/// Builds the lookup key for a first and last name.
pub fn name_key(first: &str, last: &str) -> NameKey {
    (first.trim().to_uppercase(), last.trim().to_uppercase())
}

/// Strips surrounding double quotes, then whitespace.
pub fn clean_display_name(raw: &str) -> &str {
    raw.trim_matches('"').trim()
}

/// Parses `"DELOS REYES, JULIETA A."` into `("JULIETA", "DELOS REYES")`.
///
/// Splits on the first comma and drops one trailing single-letter middle
/// initial from the first name. Names without a comma do not parse.
pub fn parse_display_name(display: &str) -> Option<NameKey> {
    let upper = display.trim().to_uppercase();
    let (last, first) = upper.split_once(',')?;
    let first = MIDDLE_INITIAL.replace(first.trim(), "");
    Some((first.into_owned(), last.trim().to_string()))
}

/// Upper-cases each letter that follows a non-letter and lower-cases the rest.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous_is_letter = false;
    for c in value.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }
    out
}

/// Exact-match index from name key to identifier.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    ids: BTreeMap<NameKey, String>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record; a later record with the same key replaces the earlier one.
    pub fn insert(&mut self, first: &str, last: &str, id: &str) -> Option<String> {
        self.ids.insert(name_key(first, last), id.to_string())
    }

    pub fn from_records<'r, I>(records: I) -> Self
    where
        I: IntoIterator<Item = (&'r str, &'r str, &'r str)>,
    {
        let mut index = Self::new();
        for (first, last, id) in records {
            if let Some(previous) = index.insert(first, last, id) {
                tracing::debug!(previous_id = %previous, id, "duplicate name key replaced");
            }
        }
        index
    }

    pub fn get(&self, key: &NameKey) -> Option<&str> {
        self.ids.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Lines produced by a join plus hit/miss counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinOutput {
    pub lines: Vec<String>,
    pub matched: usize,
    pub unmatched: usize,
    /// Cleaned display names that found no key, in input order.
    pub unmatched_names: Vec<String>,
}

/// Renders one line per display name.
pub fn render_join<'n, I>(index: &NameIndex, table: &str, names: I) -> JoinOutput
where
    I: IntoIterator<Item = &'n str>,
{
    let mut output = JoinOutput::default();
    for raw in names {
        let display = clean_display_name(raw);
        let hit = parse_display_name(display)
            .and_then(|key| index.get(&key).map(|id| (key, id)));
        match hit {
            Some(((first, last), id)) => {
                output.lines.push(format!(
                    "INSERT INTO {table} (uuid, first_name, last_name, name) \
                     VALUES ('{}', '{}', '{}', '{}');",
                    escape_text(id),
                    escape_text(&title_case(&first)),
                    escape_text(&title_case(&last)),
                    escape_text(display),
                ));
                output.matched += 1;
            }
            None => {
                tracing::debug!("no match for display name");
                let flat = display.replace(['\r', '\n'], " ");
                output.lines.push(format!("-- No match found for: {flat}"));
                output.unmatched += 1;
                output.unmatched_names.push(flat);
            }
        }
    }
    output
}
