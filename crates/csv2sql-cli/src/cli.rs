//! CLI argument definitions for csv2sql.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use csv2sql_model::ExtraColumnSpec;

#[derive(Parser)]
#[command(
    name = "csv2sql",
    version,
    about = "Convert CSV files into SQL INSERT scripts",
    long_about = "Convert CSV files into SQL INSERT scripts.\n\n\
                  Each cell is formatted by its column name: decimals, integers,\n\
                  booleans, HTML text, and plain text with escaping and truncation.\n\
                  The output is one statement per line, ready to run by hand."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell values (such as unmatched names) in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a CSV file into INSERT statements.
    Convert(ConvertArgs),

    /// Match display names against a keyed CSV and emit INSERT statements.
    Join(JoinArgs),

    /// Show the effective column rules.
    Rules(RulesArgs),
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// CSV file to convert; the first row is the header.
    #[arg(value_name = "CSV_FILE")]
    pub csv_file: PathBuf,

    /// Table named in every INSERT statement.
    #[arg(value_name = "TABLE_NAME")]
    pub table_name: String,

    /// SQL file to write.
    #[arg(value_name = "OUTPUT_SQL")]
    pub output_sql: PathBuf,

    /// Column injected ahead of the CSV columns.
    ///
    /// `name:start=N` numbers rows from N. `name:start=N:end=M` fails when
    /// the CSV has more rows than N..=M covers. `name:file=PATH` takes one
    /// value per line from PATH.
    #[arg(value_name = "EXTRA_COLUMN")]
    pub extra_column: Option<ExtraColumnSpec>,

    /// TOML file replacing the built-in column rules.
    #[arg(long = "rules", value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Drop rows identical to an earlier row.
    #[arg(long = "dedupe")]
    pub dedupe: bool,

    /// Emit `INSERT INTO table VALUES (...)` without a column list.
    #[arg(long = "no-column-list")]
    pub no_column_list: bool,
}

#[derive(Parser)]
pub struct JoinArgs {
    /// CSV with identifier, first name, and last name columns.
    #[arg(value_name = "KEYS_CSV")]
    pub keys_csv: PathBuf,

    /// CSV with a "LAST, FIRST M." display name column.
    #[arg(value_name = "NAMES_CSV")]
    pub names_csv: PathBuf,

    /// Table named in every INSERT statement.
    #[arg(value_name = "TABLE_NAME")]
    pub table_name: String,

    /// SQL file to write.
    #[arg(value_name = "OUTPUT_SQL")]
    pub output_sql: PathBuf,

    /// Identifier column in KEYS_CSV.
    #[arg(long = "id-column", default_value = "uuid")]
    pub id_column: String,

    /// First name column in KEYS_CSV.
    #[arg(long = "first-name-column", default_value = "first_name")]
    pub first_name_column: String,

    /// Last name column in KEYS_CSV.
    #[arg(long = "last-name-column", default_value = "last_name")]
    pub last_name_column: String,

    /// Display name column in NAMES_CSV.
    #[arg(long = "name-column", default_value = "name")]
    pub name_column: String,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// TOML file to show instead of the built-in rules.
    #[arg(long = "rules", value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Print the rules as TOML (a starting point for --rules).
    #[arg(long = "toml")]
    pub toml: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use csv2sql_model::ExtraSource;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_convert_positionals() {
        let cli = Cli::try_parse_from([
            "csv2sql",
            "convert",
            "items.csv",
            "items",
            "items.sql",
            "item_id:start=5",
            "--dedupe",
        ])
        .unwrap();
        let Command::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.table_name, "items");
        assert!(args.dedupe);
        let extra = args.extra_column.unwrap();
        assert_eq!(
            extra.source,
            ExtraSource::Sequence {
                start: 5,
                end: None
            }
        );
    }

    #[test]
    fn test_missing_positionals_is_usage_error() {
        let err = Cli::try_parse_from(["csv2sql", "convert", "items.csv"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_invalid_extra_column_rejected() {
        let result = Cli::try_parse_from([
            "csv2sql", "convert", "a.csv", "t", "a.sql", "item_id:begin=1",
        ]);
        assert!(result.is_err());
    }
}
