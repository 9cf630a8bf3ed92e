//! Sheet persistence: CSV files plus an optional JSON column sidecar.
//!
//! The first CSV record is the header. Editor kinds for each column
//! come from `<stem>.griddle.json` when present; otherwise they are
//! inferred by inspecting the column's values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::{Alignment, Cell, Column, Sheet, default_alignment};
use crate::editors::is_numeric;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("failed to parse sidecar {path}: {source}")]
    Sidecar {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("sidecar {path} describes {spec} columns but the table has {actual}")]
    ColumnMismatch {
        path: PathBuf,
        spec: usize,
        actual: usize,
    },
}

/// Sidecar file contents: one entry per table column, in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetSpec {
    pub columns: Vec<ColumnConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Display name override; the CSV header wins when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Editor registry key ("price", "numeric", "text", ...).
    pub editor: String,
    /// "left" or "right"; defaults follow the editor kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
}

/// The sidecar path for a table file: `prices.csv` -> `prices.griddle.json`.
pub fn sidecar_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map_or_else(|| "table".to_string(), |s| s.to_string_lossy().to_string());
    path.with_file_name(format!("{stem}.griddle.json"))
}

/// Load a sheet from a CSV file.
///
/// # Errors
///
/// Returns [`SheetError`] when the file cannot be read, a record fails
/// CSV parsing, or a present sidecar is malformed or does not match
/// the table shape.
pub fn load(path: &Path) -> Result<Sheet, SheetError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SheetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if raw.trim().is_empty() {
        debug!(path = %path.display(), "loaded empty table");
        return Ok(Sheet::empty());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(raw.as_bytes());

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| SheetError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        records.push(
            record
                .iter()
                .map(|field| Cell::new(field.to_string()))
                .collect::<Vec<_>>(),
        );
    }

    let Some(header) = records.first().cloned() else {
        return Ok(Sheet::empty());
    };
    let rows: Vec<Vec<Cell>> = records.into_iter().skip(1).collect();

    let columns = match load_sidecar(path)? {
        Some(spec) => columns_from_spec(path, &header, &spec)?,
        None => infer_columns(&header, &rows),
    };

    debug!(
        path = %path.display(),
        columns = columns.len(),
        rows = rows.len(),
        "loaded table"
    );
    Ok(Sheet::new(columns, rows))
}

/// Write a sheet back as CSV. Cell markup is stored verbatim, so
/// unedited cells round-trip byte-for-byte.
///
/// # Errors
///
/// Returns [`SheetError`] on I/O or CSV serialization failure.
pub fn save(path: &Path, sheet: &Sheet) -> Result<(), SheetError> {
    let csv_err = |source| SheetError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(sheet.columns().iter().map(|c| c.name.as_str()))
        .map_err(csv_err)?;
    for row in sheet.rows() {
        writer
            .write_record(row.iter().map(Cell::markup))
            .map_err(csv_err)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|source| csv_err(source.into_error().into()))?;
    std::fs::write(path, bytes).map_err(|source| SheetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), rows = sheet.row_count(), "saved table");
    Ok(())
}

fn load_sidecar(path: &Path) -> Result<Option<SheetSpec>, SheetError> {
    let sidecar = sidecar_path(path);
    if !sidecar.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(&sidecar).map_err(|source| SheetError::Io {
        path: sidecar.clone(),
        source,
    })?;
    let spec = serde_json::from_str(&raw).map_err(|source| SheetError::Sidecar {
        path: sidecar,
        source,
    })?;
    Ok(Some(spec))
}

fn columns_from_spec(
    path: &Path,
    header: &[Cell],
    spec: &SheetSpec,
) -> Result<Vec<Column>, SheetError> {
    if spec.columns.len() != header.len() {
        return Err(SheetError::ColumnMismatch {
            path: sidecar_path(path),
            spec: spec.columns.len(),
            actual: header.len(),
        });
    }
    Ok(header
        .iter()
        .zip(&spec.columns)
        .map(|(cell, config)| {
            let name = config
                .name
                .clone()
                .unwrap_or_else(|| cell.display_text().trim().to_string());
            let align = match config.align.as_deref() {
                Some("left") => Alignment::Left,
                Some("right") => Alignment::Right,
                _ => default_alignment(&config.editor),
            };
            Column {
                name,
                editor: config.editor.clone(),
                align,
            }
        })
        .collect())
}

fn infer_columns(header: &[Cell], rows: &[Vec<Cell>]) -> Vec<Column> {
    header
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let editor = infer_editor(rows, idx);
            Column::new(cell.display_text().trim().to_string(), editor)
        })
        .collect()
}

/// Pick an editor kind by inspecting a column's non-empty values:
/// every value leads with `$` -> price; every value is numeric ->
/// numeric; anything else -> text.
fn infer_editor(rows: &[Vec<Cell>], col: usize) -> &'static str {
    let values: Vec<String> = rows
        .iter()
        .filter_map(|row| row.get(col))
        .map(|cell| cell.display_text().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect();
    if values.is_empty() {
        return "text";
    }
    if values.iter().all(|text| text.starts_with('$')) {
        return "price";
    }
    if values.iter().all(|text| is_numeric(text)) {
        return "numeric";
    }
    "text"
}
