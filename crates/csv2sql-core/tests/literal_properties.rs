//! Property tests: every formatted literal is a standalone SQL value token.

use csv2sql_core::ValueFormatter;
use csv2sql_model::ColumnRules;
use proptest::prelude::*;

const COLUMNS: &[&str] = &[
    "serial_no",
    "status",
    "description",
    "condition",
    "unit_cost",
    "quantity",
    "is_active",
    "specifications",
];

/// Quoted literals must have no CR/LF and only even runs of quotes inside.
fn is_valid_token(literal: &str) -> bool {
    if literal.contains(['\r', '\n']) {
        return false;
    }
    if !literal.starts_with('\'') {
        return !literal.contains('\'');
    }
    if literal.len() < 2 || !literal.ends_with('\'') {
        return false;
    }
    let body = &literal[1..literal.len() - 1];
    let mut run = 0usize;
    for c in body.chars() {
        if c == '\'' {
            run += 1;
        } else {
            if run % 2 == 1 {
                return false;
            }
            run = 0;
        }
    }
    run % 2 == 0
}

proptest! {
    #[test]
    fn literal_is_valid_sql_token(
        column in proptest::sample::select(COLUMNS),
        raw in "[a-zA-Z0-9 ,.'\"<>&\r\n-]{0,300}",
    ) {
        let rules = ColumnRules::builtin();
        let literal = ValueFormatter::new(&rules).format(column, &raw).to_string();
        prop_assert!(is_valid_token(&literal), "{column}: {literal:?}");
    }

    #[test]
    fn truncated_columns_respect_max_length(raw in "[a-z' ]{0,400}") {
        let rules = ColumnRules::builtin();
        let literal = ValueFormatter::new(&rules).format("status", &raw).to_string();
        if literal != "NULL" {
            prop_assert!(literal.chars().count() <= 50 + 2);
        }
    }

    #[test]
    fn formatting_is_deterministic(
        column in proptest::sample::select(COLUMNS),
        raw in "\\PC{0,40}",
    ) {
        let rules = ColumnRules::builtin();
        let formatter = ValueFormatter::new(&rules);
        prop_assert_eq!(formatter.format(column, &raw), formatter.format(column, &raw));
    }
}

#[test]
fn validity_check_rejects_broken_literals() {
    assert!(is_valid_token("'O''Brien'"));
    assert!(is_valid_token("NULL"));
    assert!(!is_valid_token("'O'Brien'"));
    assert!(!is_valid_token("'a\nb'"));
}
