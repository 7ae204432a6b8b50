//! Duplicate row removal.

use std::collections::BTreeSet;

use csv2sql_model::ColumnRules;

/// Drops rows equal to an earlier row, keeping first occurrences in order.
///
/// Missing cells compare equal to each other whatever their raw text, so
/// `""` and `NaN` in the same position do not make two rows distinct.
/// Returns the number of rows removed.
pub fn dedupe_rows(rows: &mut Vec<Vec<String>>, rules: &ColumnRules) -> usize {
    let before = rows.len();
    let mut seen: BTreeSet<Vec<Option<String>>> = BTreeSet::new();
    rows.retain(|row| {
        let key = row
            .iter()
            .map(|cell| (!rules.is_missing(cell)).then(|| cell.clone()))
            .collect();
        seen.insert(key)
    });
    let removed = before - rows.len();
    if removed > 0 {
        tracing::debug!(removed, kept = rows.len(), "dropped duplicate rows");
    }
    removed
}
