//! Column rule tables.
//!
//! [`ColumnRules`] holds the static name lookups that decide how each column
//! is formatted. The built-in tables cover the inventory exports this tool was
//! written for; a TOML file with the [`RulesFile`] layout replaces them:
//!
//! ```toml
//! decimal = ["unit_cost"]
//! integer = ["quantity"]
//! boolean = ["is_active"]
//! html = ["specifications"]
//!
//! [max_lengths]
//! status = 50
//!
//! [missing_defaults]
//! condition = "SERVICEABLE"
//! ```
//!
//! Omitted tables are empty, except `null_markers`, which falls back to the
//! built-in list.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::{ModelError, Result};
use crate::kind::ColumnKind;

/// Tokens treated as an explicit null, matching the pandas CSV reader defaults.
pub const DEFAULT_NULL_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Normalizes a column name for rule lookups (trimmed, lower-case).
pub fn normalize_column(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Serialized form of the rule tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesFile {
    pub decimal: Vec<String>,
    pub integer: Vec<String>,
    pub boolean: Vec<String>,
    pub html: Vec<String>,
    pub max_lengths: BTreeMap<String, usize>,
    pub missing_defaults: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub null_markers: Option<Vec<String>>,
}

impl RulesFile {
    /// The built-in tables.
    #[must_use]
    pub fn builtin() -> Self {
        fn names(values: &[&str]) -> Vec<String> {
            values.iter().map(|v| (*v).to_string()).collect()
        }
        Self {
            decimal: names(&[
                "acquisition_cost",
                "amount",
                "total_cost",
                "unit_cost",
                "unit_price",
            ]),
            integer: names(&["estimated_useful_life", "quantity", "qty", "useful_life"]),
            boolean: names(&["is_active", "is_consumable", "is_deleted", "is_serviceable"]),
            html: names(&["details", "specifications"]),
            max_lengths: BTreeMap::from([
                ("description".to_string(), 255),
                ("remarks".to_string(), 255),
                ("status".to_string(), 50),
            ]),
            missing_defaults: BTreeMap::from([(
                "condition".to_string(),
                "SERVICEABLE".to_string(),
            )]),
            null_markers: None,
        }
    }

    /// Parses TOML text.
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| ModelError::RulesParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn validate(&self) -> Result<()> {
        let tables: [(&'static str, &Vec<String>); 4] = [
            ("decimal", &self.decimal),
            ("integer", &self.integer),
            ("boolean", &self.boolean),
            ("html", &self.html),
        ];
        let mut assigned: BTreeMap<String, &'static str> = BTreeMap::new();
        for (label, names) in tables {
            for name in names {
                let column = normalize_column(name);
                if column.is_empty() {
                    return Err(ModelError::EmptyColumnName { table: label });
                }
                match assigned.get(&column) {
                    Some(&first) if first != label => {
                        return Err(ModelError::ConflictingKinds {
                            column,
                            first,
                            second: label,
                        });
                    }
                    Some(_) => {}
                    None => {
                        assigned.insert(column, label);
                    }
                }
            }
        }
        for (name, max_len) in &self.max_lengths {
            if normalize_column(name).is_empty() {
                return Err(ModelError::EmptyColumnName {
                    table: "max_lengths",
                });
            }
            if *max_len == 0 {
                return Err(ModelError::ZeroMaxLength {
                    column: name.clone(),
                });
            }
        }
        if self
            .missing_defaults
            .keys()
            .any(|name| normalize_column(name).is_empty())
        {
            return Err(ModelError::EmptyColumnName {
                table: "missing_defaults",
            });
        }
        Ok(())
    }
}

/// One row of the effective rules listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleEntry {
    pub column: String,
    pub kind: ColumnKind,
    pub missing_default: Option<String>,
}

/// Immutable lookup tables consulted by the value formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRules {
    decimal: BTreeSet<String>,
    integer: BTreeSet<String>,
    boolean: BTreeSet<String>,
    html: BTreeSet<String>,
    max_lengths: BTreeMap<String, usize>,
    missing_defaults: BTreeMap<String, String>,
    null_markers: BTreeSet<String>,
}

impl ColumnRules {
    /// Rules built from [`RulesFile::builtin`].
    #[must_use]
    pub fn builtin() -> Self {
        Self::assemble(RulesFile::builtin())
    }

    /// Loads and validates a TOML rules file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ModelError::RulesRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::try_from(RulesFile::from_toml_str(&text, path)?)
    }

    fn assemble(file: RulesFile) -> Self {
        fn set(names: &[String]) -> BTreeSet<String> {
            names.iter().map(|n| normalize_column(n)).collect()
        }
        let null_markers = match file.null_markers {
            Some(markers) => markers.iter().map(|m| m.trim().to_string()).collect(),
            None => DEFAULT_NULL_MARKERS
                .iter()
                .map(|m| (*m).to_string())
                .collect(),
        };
        Self {
            decimal: set(&file.decimal),
            integer: set(&file.integer),
            boolean: set(&file.boolean),
            html: set(&file.html),
            max_lengths: file
                .max_lengths
                .into_iter()
                .map(|(name, len)| (normalize_column(&name), len))
                .collect(),
            missing_defaults: file
                .missing_defaults
                .into_iter()
                .map(|(name, value)| (normalize_column(&name), value))
                .collect(),
            null_markers,
        }
    }

    /// Classifies a column by name.
    pub fn classify(&self, column: &str) -> ColumnKind {
        let column = normalize_column(column);
        self.classify_normalized(&column)
    }

    fn classify_normalized(&self, column: &str) -> ColumnKind {
        if self.decimal.contains(column) {
            ColumnKind::Decimal
        } else if self.integer.contains(column) {
            ColumnKind::Integer
        } else if self.boolean.contains(column) {
            ColumnKind::Boolean
        } else if self.html.contains(column) {
            ColumnKind::Html
        } else {
            ColumnKind::Text {
                max_len: self.max_lengths.get(column).copied(),
            }
        }
    }

    /// Replacement text for a missing value in this column, if any.
    pub fn missing_default(&self, column: &str) -> Option<&str> {
        self.missing_defaults
            .get(&normalize_column(column))
            .map(String::as_str)
    }

    pub fn max_length(&self, column: &str) -> Option<usize> {
        self.max_lengths.get(&normalize_column(column)).copied()
    }

    /// True for empty, whitespace-only, or null-marker text.
    pub fn is_missing(&self, raw: &str) -> bool {
        let trimmed = raw.trim();
        trimmed.is_empty() || self.null_markers.contains(trimmed)
    }

    /// Wraps raw text with its missing flag.
    pub fn cell<'a>(&self, raw: &'a str) -> Cell<'a> {
        Cell::new(raw, self.is_missing(raw))
    }

    /// Every column named by any table, sorted, with its effective kind.
    pub fn entries(&self) -> Vec<RuleEntry> {
        let mut names: BTreeSet<&String> = BTreeSet::new();
        names.extend(&self.decimal);
        names.extend(&self.integer);
        names.extend(&self.boolean);
        names.extend(&self.html);
        names.extend(self.max_lengths.keys());
        names.extend(self.missing_defaults.keys());
        names
            .into_iter()
            .map(|name| RuleEntry {
                column: name.clone(),
                kind: self.classify_normalized(name),
                missing_default: self.missing_defaults.get(name).cloned(),
            })
            .collect()
    }

    /// Converts back to the serialized layout.
    pub fn to_file(&self) -> RulesFile {
        fn list(set: &BTreeSet<String>) -> Vec<String> {
            set.iter().cloned().collect()
        }
        RulesFile {
            decimal: list(&self.decimal),
            integer: list(&self.integer),
            boolean: list(&self.boolean),
            html: list(&self.html),
            max_lengths: self.max_lengths.clone(),
            missing_defaults: self.missing_defaults.clone(),
            null_markers: Some(list(&self.null_markers)),
        }
    }
}

impl Default for ColumnRules {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TryFrom<RulesFile> for ColumnRules {
    type Error = ModelError;

    fn try_from(file: RulesFile) -> Result<Self> {
        file.validate()?;
        Ok(Self::assemble(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_tables_are_valid() {
        assert!(RulesFile::builtin().validate().is_ok());
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        let rules = ColumnRules::builtin();
        assert_eq!(rules.classify("Unit_Cost"), ColumnKind::Decimal);
        assert_eq!(rules.classify(" QUANTITY "), ColumnKind::Integer);
        assert_eq!(rules.classify("is_active"), ColumnKind::Boolean);
        assert_eq!(rules.classify("Specifications"), ColumnKind::Html);
        assert_eq!(
            rules.classify("STATUS"),
            ColumnKind::Text { max_len: Some(50) }
        );
        assert_eq!(rules.classify("serial_no"), ColumnKind::PLAIN);
    }

    #[test]
    fn test_missing_values() {
        let rules = ColumnRules::builtin();
        assert!(rules.is_missing(""));
        assert!(rules.is_missing("   "));
        assert!(rules.is_missing("NaN"));
        assert!(rules.is_missing(" null "));
        assert!(!rules.is_missing("0"));
        assert!(!rules.is_missing("Nothing"));
    }

    #[test]
    fn test_missing_default() {
        let rules = ColumnRules::builtin();
        assert_eq!(rules.missing_default("Condition"), Some("SERVICEABLE"));
        assert_eq!(rules.missing_default("status"), None);
    }

    #[test]
    fn test_conflicting_sets_rejected() {
        let file = RulesFile {
            decimal: vec!["qty".to_string()],
            integer: vec!["QTY".to_string()],
            ..RulesFile::default()
        };
        let err = ColumnRules::try_from(file).unwrap_err();
        assert!(matches!(
            err,
            ModelError::ConflictingKinds {
                first: "decimal",
                second: "integer",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_max_length_rejected() {
        let file = RulesFile {
            max_lengths: BTreeMap::from([("status".to_string(), 0)]),
            ..RulesFile::default()
        };
        assert!(matches!(
            ColumnRules::try_from(file),
            Err(ModelError::ZeroMaxLength { .. })
        ));
    }

    #[test]
    fn test_load_toml_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "decimal = [\"Price\"]\nhtml = [\"body\"]\n\n[max_lengths]\nname = 10\n"
        )
        .unwrap();
        let rules = ColumnRules::load(file.path()).unwrap();

        assert_eq!(rules.classify("price"), ColumnKind::Decimal);
        assert_eq!(rules.classify("body"), ColumnKind::Html);
        assert_eq!(rules.max_length("NAME"), Some(10));
        // Built-in tables are replaced, not merged.
        assert_eq!(rules.classify("unit_cost"), ColumnKind::PLAIN);
        assert_eq!(rules.missing_default("condition"), None);
        // Null markers fall back to the defaults.
        assert!(rules.is_missing("NaN"));
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "decimals = [\"price\"]\n").unwrap();
        assert!(matches!(
            ColumnRules::load(file.path()),
            Err(ModelError::RulesParse { .. })
        ));
    }

    #[test]
    fn test_entries_sorted() {
        let rules = ColumnRules::builtin();
        let entries = rules.entries();
        let names: Vec<&str> = entries.iter().map(|e| e.column.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        let condition = entries.iter().find(|e| e.column == "condition").unwrap();
        assert_eq!(condition.kind, ColumnKind::PLAIN);
        assert_eq!(condition.missing_default.as_deref(), Some("SERVICEABLE"));
    }

    #[test]
    fn test_to_file_round_trips() {
        let rules = ColumnRules::builtin();
        let text = toml::to_string(&rules.to_file()).unwrap();
        let reparsed = RulesFile::from_toml_str(&text, Path::new("rules.toml")).unwrap();
        assert_eq!(ColumnRules::try_from(reparsed).unwrap(), rules);
    }
}
