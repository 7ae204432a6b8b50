use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::debug;

use csv2sql_cli::pipeline::{ConvertOptions, JoinOptions, convert, join};
use csv2sql_cli::types::{ConvertResult, JoinResult};
use csv2sql_core::JoinColumns;
use csv2sql_model::ColumnRules;

use crate::cli::{ConvertArgs, JoinArgs, RulesArgs};
use crate::summary::{apply_table_style, dim_cell, header_cell};

fn load_rules(path: Option<&std::path::Path>) -> Result<ColumnRules> {
    match path {
        Some(path) => {
            let rules = ColumnRules::load(path)
                .with_context(|| format!("load rules from {}", path.display()))?;
            debug!(path = %path.display(), "loaded column rules");
            Ok(rules)
        }
        None => Ok(ColumnRules::builtin()),
    }
}

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertResult> {
    let mut options = ConvertOptions::new(&args.csv_file, &args.table_name, &args.output_sql);
    options.extra = args.extra_column.clone();
    options.rules = load_rules(args.rules.as_deref())?;
    options.dedupe = args.dedupe;
    options.include_column_list = !args.no_column_list;
    convert(&options)
}

pub fn run_join(args: &JoinArgs) -> Result<JoinResult> {
    let options = JoinOptions {
        keys_input: args.keys_csv.clone(),
        names_input: args.names_csv.clone(),
        table: args.table_name.clone(),
        output: args.output_sql.clone(),
        columns: JoinColumns {
            id: args.id_column.clone(),
            first_name: args.first_name_column.clone(),
            last_name: args.last_name_column.clone(),
            name: args.name_column.clone(),
        },
    };
    join(&options)
}

pub fn run_rules(args: &RulesArgs) -> Result<()> {
    let rules = load_rules(args.rules.as_deref())?;
    if args.toml {
        print!("{}", rules_toml(&rules)?);
    } else {
        println!("{}", rules_table(&rules));
    }
    Ok(())
}

/// The effective rules in the `--rules` file layout.
fn rules_toml(rules: &ColumnRules) -> Result<String> {
    toml::to_string(&rules.to_file()).context("serialize rules")
}

fn rules_table(rules: &ColumnRules) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Kind"),
        header_cell("Missing default"),
    ]);
    apply_table_style(&mut table);
    for entry in rules.entries() {
        let default = match entry.missing_default {
            Some(value) => comfy_table::Cell::new(value),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            comfy_table::Cell::new(entry.column),
            comfy_table::Cell::new(entry.kind.to_string()),
            default,
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv2sql_model::{ColumnKind, RulesFile};

    #[test]
    fn test_rules_toml_loads_back() {
        let rules = ColumnRules::builtin();
        let text = rules_toml(&rules).unwrap();
        assert!(text.contains("decimal = ["));
        assert!(text.contains("[missing_defaults]"));
        let parsed: RulesFile = toml::from_str(&text).unwrap();
        assert_eq!(ColumnRules::try_from(parsed).unwrap(), rules);
    }

    #[test]
    fn test_rules_table_lists_every_column() {
        let rules = ColumnRules::builtin();
        let rendered = rules_table(&rules).to_string();
        for entry in rules.entries() {
            assert!(rendered.contains(&entry.column), "{}", entry.column);
        }
        assert!(rendered.contains("SERVICEABLE"));
        assert!(rendered.contains(&ColumnKind::Text { max_len: Some(50) }.to_string()));
    }

    #[test]
    fn test_rules_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("rules.toml");
        std::fs::write(&path, "integer = [\"pieces\"]\n").unwrap();
        let rules = load_rules(Some(path.as_path())).unwrap();
        assert_eq!(rules.classify("Pieces"), ColumnKind::Integer);
        assert_eq!(rules.classify("quantity"), ColumnKind::PLAIN);
        assert!(rules_table(&rules).to_string().contains("pieces"));
    }

    #[test]
    fn test_bad_rules_file_names_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("rules.toml");
        std::fs::write(&path, "decimal = [\"a\"]\ninteger = [\"a\"]\n").unwrap();
        let error = load_rules(Some(path.as_path())).unwrap_err();
        assert!(format!("{error:#}").contains("rules.toml"));
    }
}
