use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use csv2sql_cli::types::{ConvertResult, JoinResult};

pub fn print_convert_summary(result: &ConvertResult) {
    println!("Input: {}", result.input.display());
    println!("Output: {}", result.output.display());
    let mut table = summary_table();
    table.add_row(vec![Cell::new("Table"), table_cell(&result.table)]);
    table.add_row(vec![Cell::new("Rows read"), Cell::new(result.rows_read)]);
    if result.duplicates_removed > 0 {
        table.add_row(vec![
            Cell::new("Duplicates removed"),
            count_cell(result.duplicates_removed, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("Statements"),
        Cell::new(result.statements).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Extra column"),
        match &result.extra_column {
            Some(name) => Cell::new(name),
            None => dim_cell("-"),
        },
    ]);
    println!("{table}");
}

pub fn print_join_summary(result: &JoinResult) {
    println!("Keys: {}", result.keys_input.display());
    println!("Names: {}", result.names_input.display());
    println!("Output: {}", result.output.display());
    let mut table = summary_table();
    table.add_row(vec![Cell::new("Table"), table_cell(&result.table)]);
    table.add_row(vec![Cell::new("Keys loaded"), Cell::new(result.keys_loaded)]);
    table.add_row(vec![
        Cell::new("Matched"),
        count_cell(result.matched, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Unmatched"),
        count_cell(result.unmatched, Color::Yellow),
    ]);
    println!("{table}");
}

fn summary_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Step"), header_cell("Count")]);
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    align_column(&mut table, 1, CellAlignment::Right);
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn table_cell(name: &str) -> Cell {
    Cell::new(name)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
