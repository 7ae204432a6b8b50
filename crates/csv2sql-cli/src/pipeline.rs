//! Conversion pipelines behind the CLI commands.
//!
//! Each pipeline reads its inputs fully, renders every output line in memory,
//! and only then writes the output file. The file is written to a temporary
//! sibling and renamed into place, so a failed run leaves no partial output.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span, warn};

use csv2sql_core::{
    ExtraColumn, ExtraValues, InsertRenderer, JoinColumns, NameIndex, ValueFormatter, dedupe_rows,
    render_join,
};
use csv2sql_ingest::{read_csv_table, read_value_lines};
use csv2sql_model::{ColumnRules, ExtraColumnSpec, ExtraSource};

use crate::logging::redact_value;
use crate::types::{ConvertResult, JoinResult};

/// Inputs for a CSV to INSERT conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub input: PathBuf,
    pub table: String,
    pub output: PathBuf,
    pub extra: Option<ExtraColumnSpec>,
    pub rules: ColumnRules,
    pub dedupe: bool,
    pub include_column_list: bool,
}

impl ConvertOptions {
    pub fn new(input: impl Into<PathBuf>, table: impl Into<String>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            table: table.into(),
            output: output.into(),
            extra: None,
            rules: ColumnRules::builtin(),
            dedupe: false,
            include_column_list: true,
        }
    }
}

/// Inputs for a name-key join.
#[derive(Debug, Clone)]
pub struct JoinOptions {
    pub keys_input: PathBuf,
    pub names_input: PathBuf,
    pub table: String,
    pub output: PathBuf,
    pub columns: JoinColumns,
}

/// Converts one CSV file into an INSERT script.
pub fn convert(options: &ConvertOptions) -> Result<ConvertResult> {
    let span = info_span!("convert", table = %options.table);
    let _guard = span.enter();
    let start = Instant::now();

    let mut csv = read_csv_table(&options.input)
        .with_context(|| format!("read {}", options.input.display()))?;
    let rows_read = csv.len();
    info!(
        input = %options.input.display(),
        columns = csv.columns.len(),
        rows = rows_read,
        "loaded input"
    );

    let duplicates_removed = if options.dedupe {
        dedupe_rows(&mut csv.rows, &options.rules)
    } else {
        0
    };

    if let Some(spec) = &options.extra
        && csv.column_index(&spec.name).is_some()
    {
        bail!(
            "extra column '{}' duplicates a column of {}",
            spec.name,
            options.input.display()
        );
    }
    let extra = options.extra.as_ref().map(resolve_extra).transpose()?;

    let formatter = ValueFormatter::new(&options.rules);
    let renderer = InsertRenderer::new(&options.table, &csv.columns, formatter)
        .with_column_list(options.include_column_list);
    let lines = renderer
        .render_all(&csv.rows, extra.as_ref())
        .context("render insert statements")?;

    write_lines(&options.output, &lines)?;
    info!(
        output = %options.output.display(),
        statements = lines.len(),
        duration_ms = start.elapsed().as_millis(),
        "wrote SQL script"
    );

    Ok(ConvertResult {
        input: options.input.clone(),
        output: options.output.clone(),
        table: options.table.clone(),
        rows_read,
        duplicates_removed,
        statements: lines.len(),
        extra_column: extra.map(|column| column.name),
    })
}

/// Turns the parsed argument into a column with concrete values.
fn resolve_extra(spec: &ExtraColumnSpec) -> Result<ExtraColumn> {
    let values = match &spec.source {
        ExtraSource::Sequence { start, end } => ExtraValues::Sequence {
            start: *start,
            end: *end,
        },
        ExtraSource::File(path) => {
            let values = read_value_lines(path)
                .with_context(|| format!("read extra column values from {}", path.display()))?;
            debug!(column = %spec.name, values = values.len(), "loaded extra column values");
            ExtraValues::Provided(values)
        }
    };
    Ok(ExtraColumn {
        name: spec.name.clone(),
        values,
    })
}

/// Joins display names against a keyed table and writes the script.
pub fn join(options: &JoinOptions) -> Result<JoinResult> {
    let span = info_span!("join", table = %options.table);
    let _guard = span.enter();

    let keys = read_csv_table(&options.keys_input)
        .with_context(|| format!("read {}", options.keys_input.display()))?;
    let first = keys.require_column(&options.columns.first_name)?;
    let last = keys.require_column(&options.columns.last_name)?;
    let id = keys.require_column(&options.columns.id)?;
    let index = NameIndex::from_records(
        keys.rows
            .iter()
            .map(|row| (row[first].as_str(), row[last].as_str(), row[id].as_str())),
    );
    info!(
        input = %options.keys_input.display(),
        keys = index.len(),
        "built name index"
    );

    let names = read_csv_table(&options.names_input)
        .with_context(|| format!("read {}", options.names_input.display()))?;
    let display_names = names.column_values(&options.columns.name)?;

    let output = render_join(&index, &options.table, display_names.iter().copied());
    for name in &output.unmatched_names {
        warn!(name = redact_value(name), "no match found");
    }

    write_lines(&options.output, &output.lines)?;
    info!(
        output = %options.output.display(),
        matched = output.matched,
        unmatched = output.unmatched,
        "wrote SQL script"
    );

    Ok(JoinResult {
        keys_input: options.keys_input.clone(),
        names_input: options.names_input.clone(),
        output: options.output.clone(),
        table: options.table.clone(),
        keys_loaded: index.len(),
        matched: output.matched,
        unmatched: output.unmatched,
    })
}

/// Writes newline-terminated lines, replacing `path` only on success.
///
/// The temporary file is created with the usual `0o666` minus umask mode; an
/// existing target keeps its own permissions.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut builder = tempfile::Builder::new();
    builder.prefix(".csv2sql-").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut file = builder
        .tempfile_in(dir)
        .with_context(|| format!("create temporary file in {}", dir.display()))?;
    {
        let mut writer = std::io::BufWriter::new(file.as_file_mut());
        for line in lines {
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
    }
    if let Ok(existing) = std::fs::metadata(path) {
        std::fs::set_permissions(file.path(), existing.permissions())
            .with_context(|| format!("copy permissions of {}", path.display()))?;
    }
    file.persist(path)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
