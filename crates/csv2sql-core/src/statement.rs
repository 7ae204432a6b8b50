//! INSERT statement rendering.

use csv2sql_model::{SqlLiteral, normalize_column};

use crate::error::{CoreError, Result};
use crate::extra::ExtraColumn;
use crate::format::{ColumnPlan, ValueFormatter};

/// Renders rows of raw cells as `INSERT INTO ... VALUES (...);` lines.
#[derive(Debug, Clone)]
pub struct InsertRenderer<'a> {
    table: String,
    columns: Vec<String>,
    plans: Vec<ColumnPlan>,
    formatter: ValueFormatter<'a>,
    include_column_list: bool,
}

impl<'a> InsertRenderer<'a> {
    /// Plans every column once; rows are then formatted positionally.
    pub fn new(table: impl Into<String>, columns: &[String], formatter: ValueFormatter<'a>) -> Self {
        Self {
            table: table.into(),
            columns: columns.to_vec(),
            plans: columns.iter().map(|c| formatter.plan(c)).collect(),
            formatter,
            include_column_list: true,
        }
    }

    /// Emit `INSERT INTO t VALUES (...)` without naming the columns.
    #[must_use]
    pub fn with_column_list(mut self, include: bool) -> Self {
        self.include_column_list = include;
        self
    }

    /// Renders every row. Extra-column values are generated first, so a short
    /// source or a clashing column name fails before any line exists.
    pub fn render_all(&self, rows: &[Vec<String>], extra: Option<&ExtraColumn>) -> Result<Vec<String>> {
        let extra_values = match extra {
            Some(column) => {
                self.check_extra_name(&column.name)?;
                Some(column.literals(rows.len(), &self.formatter)?)
            }
            None => None,
        };
        let extra_name = extra.map(|column| column.name.as_str());
        let header = self.header(extra_name);

        let mut lines = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let leading = extra_values.as_ref().map(|values| &values[index]);
            lines.push(self.render_row(&header, index, row, leading)?);
        }
        tracing::debug!(
            table = %self.table,
            rows = rows.len(),
            extra_column = extra_name.unwrap_or("-"),
            "rendered insert statements"
        );
        Ok(lines)
    }

    fn check_extra_name(&self, name: &str) -> Result<()> {
        let key = normalize_column(name);
        if self.columns.iter().any(|c| normalize_column(c) == key) {
            return Err(CoreError::DuplicateColumn {
                column: name.to_string(),
            });
        }
        Ok(())
    }

    fn header(&self, extra_name: Option<&str>) -> String {
        if !self.include_column_list {
            return format!("INSERT INTO {}", self.table);
        }
        let names: Vec<&str> = extra_name
            .into_iter()
            .chain(self.columns.iter().map(String::as_str))
            .collect();
        format!("INSERT INTO {} ({})", self.table, names.join(", "))
    }

    fn render_row(
        &self,
        header: &str,
        index: usize,
        row: &[String],
        leading: Option<&SqlLiteral>,
    ) -> Result<String> {
        if row.len() != self.plans.len() {
            return Err(CoreError::RowWidth {
                row: index + 1,
                expected: self.plans.len(),
                found: row.len(),
            });
        }
        let mut values: Vec<String> = Vec::with_capacity(row.len() + 1);
        if let Some(literal) = leading {
            values.push(literal.to_string());
        }
        for (plan, raw) in self.plans.iter().zip(row) {
            values.push(self.formatter.format_planned(plan, raw).to_string());
        }
        Ok(format!("{header} VALUES ({});", values.join(", ")))
    }
}
