//! Data model for csv2sql.
//!
//! Column rule tables, the column kinds they assign, the SQL literal type
//! produced by the formatter, and the extra-column argument grammar.

pub mod cell;
pub mod error;
pub mod extra;
pub mod kind;
pub mod literal;
pub mod rules;

pub use cell::Cell;
pub use error::{ModelError, Result};
pub use extra::{ExtraColumnSpec, ExtraSource};
pub use kind::ColumnKind;
pub use literal::{SqlLiteral, double_quotes};
pub use rules::{ColumnRules, RuleEntry, RulesFile, normalize_column};
