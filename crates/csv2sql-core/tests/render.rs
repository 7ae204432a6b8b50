//! Integration tests for rendering whole tables.

use csv2sql_core::{
    CoreError, ExtraColumn, InsertRenderer, NameIndex, ValueFormatter, dedupe_rows, render_join,
};
use csv2sql_model::ColumnRules;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

fn inventory() -> (Vec<String>, Vec<Vec<String>>) {
    let columns = strings(&[
        "Name",
        "Condition",
        "Unit_Cost",
        "Quantity",
        "Is_Active",
        "Specifications",
        "Remarks",
    ]);
    let rows = vec![
        strings(&[
            "Office Chair",
            "",
            "1,234.50",
            "12.9",
            "Y",
            "Line1\nLine2",
            "Bought in '24",
        ]),
        strings(&["Desk", "UNSERVICEABLE", "abc", "", "maybe", "", "NaN"]),
        strings(&["Lamp <LED>", "NULL", "", "3", "", "a < b & it's fine", ""]),
    ];
    (columns, rows)
}

#[test]
fn renders_inventory_table() {
    let rules = ColumnRules::builtin();
    let (columns, rows) = inventory();
    let renderer = InsertRenderer::new("items", &columns, ValueFormatter::new(&rules));
    let extra = ExtraColumn::sequence("item_id", 5);

    let lines = renderer.render_all(&rows, Some(&extra)).unwrap();

    insta::assert_snapshot!(lines.join("\n"), @r"
    INSERT INTO items (item_id, Name, Condition, Unit_Cost, Quantity, Is_Active, Specifications, Remarks) VALUES (5, 'Office Chair', 'SERVICEABLE', 1234.50, 12, TRUE, '<p>Line1<br>Line2</p>', 'Bought in ''24');
    INSERT INTO items (item_id, Name, Condition, Unit_Cost, Quantity, Is_Active, Specifications, Remarks) VALUES (6, 'Desk', 'UNSERVICEABLE', 0, NULL, FALSE, NULL, NULL);
    INSERT INTO items (item_id, Name, Condition, Unit_Cost, Quantity, Is_Active, Specifications, Remarks) VALUES (7, 'Lamp <LED>', 'SERVICEABLE', 0, 3, FALSE, '<p>a &lt; b &amp; it''s fine</p>', NULL);
    ");
}

#[test]
fn rendering_twice_is_identical() {
    let rules = ColumnRules::builtin();
    let (columns, rows) = inventory();
    let renderer = InsertRenderer::new("items", &columns, ValueFormatter::new(&rules));

    let first = renderer.render_all(&rows, None).unwrap();
    let second = renderer.render_all(&rows, None).unwrap();
    assert_eq!(first, second);
}

#[test]
fn short_extra_values_fail_before_rendering() {
    let rules = ColumnRules::builtin();
    let (columns, rows) = inventory();
    let renderer = InsertRenderer::new("items", &columns, ValueFormatter::new(&rules));
    let extra = ExtraColumn::provided("item_id", strings(&["1", "2"]));

    let result = renderer.render_all(&rows, Some(&extra));
    assert!(matches!(
        result,
        Err(CoreError::ExtraValuesExhausted {
            available: 2,
            rows: 3,
            ..
        })
    ));
}

#[test]
fn dedupe_then_render_without_column_list() {
    let rules = ColumnRules::builtin();
    let columns = strings(&["custodian", "quantity"]);
    let mut rows = vec![
        strings(&["Ana", "1"]),
        strings(&["Ana", "1"]),
        strings(&["Ben", "2"]),
    ];
    assert_eq!(dedupe_rows(&mut rows, &rules), 1);

    let renderer = InsertRenderer::new("item_custodies", &columns, ValueFormatter::new(&rules))
        .with_column_list(false);
    let lines = renderer.render_all(&rows, None).unwrap();
    assert_eq!(
        lines,
        vec![
            "INSERT INTO item_custodies VALUES ('Ana', 1);",
            "INSERT INTO item_custodies VALUES ('Ben', 2);",
        ]
    );
}

#[test]
fn join_matches_and_comments() {
    let index = NameIndex::from_records([
        ("JULIETA", "DELOS REYES", "0b6f"),
        ("Juan", "Cruz", "91aa"),
    ]);
    let output = render_join(
        &index,
        "your_table",
        [
            "\"DELOS REYES, JULIETA A.\"",
            "CRUZ, JUAN",
            "SANTOS, MARIA",
            "Madonna",
        ],
    );

    insta::assert_snapshot!(output.lines.join("\n"), @r"
    INSERT INTO your_table (uuid, first_name, last_name, name) VALUES ('0b6f', 'Julieta', 'Delos Reyes', 'DELOS REYES, JULIETA A.');
    INSERT INTO your_table (uuid, first_name, last_name, name) VALUES ('91aa', 'Juan', 'Cruz', 'CRUZ, JUAN');
    -- No match found for: SANTOS, MARIA
    -- No match found for: Madonna
    ");
    assert_eq!(output.matched, 2);
    assert_eq!(output.unmatched, 2);
}
