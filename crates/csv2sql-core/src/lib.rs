//! Core conversion logic for csv2sql.
//!
//! # Modules
//!
//! - [`format`]: per-column value formatting into SQL literals
//! - [`html`]: HTML paragraph formatting for rich-text columns
//! - [`extra`]: injected leading column (sequence or provided values)
//! - [`statement`]: INSERT statement rendering
//! - [`dedupe`]: duplicate row removal
//! - [`join`]: name-key join between two tables

pub mod dedupe;
pub mod error;
pub mod extra;
pub mod format;
pub mod html;
pub mod join;
pub mod statement;

pub use dedupe::dedupe_rows;
pub use error::{CoreError, Result};
pub use extra::{ExtraColumn, ExtraValues, sequence_values};
pub use format::{ColumnPlan, ValueFormatter, escape_text};
pub use html::format_html;
pub use join::{
    JoinColumns, JoinOutput, NameIndex, NameKey, clean_display_name, name_key,
    parse_display_name, render_join, title_case,
};
pub use statement::InsertRenderer;
