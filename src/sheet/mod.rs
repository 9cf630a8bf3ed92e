//! Table data model.
//!
//! A [`Sheet`] is a header row of [`Column`]s plus a grid of [`Cell`]s.
//! Cells hold *rendered markup*: the verbatim display text from the
//! source file, which for exports from web spreadsheets routinely
//! carries a leading currency symbol and HTML `&nbsp;` entities. The
//! model preserves that text untouched; only display and the cell
//! editors interpret it.

mod loader;

pub use loader::{ColumnConfig, SheetError, SheetSpec, load, save, sidecar_path};

use unicode_width::UnicodeWidthStr;

/// The one HTML entity the grid understands.
pub const NBSP_ENTITY: &str = "&nbsp;";

/// Minimum rendered column width in terminal cells.
pub const MIN_COLUMN_WIDTH: u16 = 6;
/// Maximum rendered column width in terminal cells.
pub const MAX_COLUMN_WIDTH: u16 = 40;

/// Replace every `&nbsp;` occurrence with a literal space.
///
/// Nothing else is decoded; other entities pass through as-is.
pub fn decode_nbsp(s: &str) -> String {
    s.replace(NBSP_ENTITY, " ")
}

/// Horizontal text alignment within a grid column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Right,
}

/// A single table cell.
///
/// `markup` is the display text exactly as loaded; it round-trips to
/// disk verbatim unless the cell is committed through an editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    markup: String,
}

impl Cell {
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
        }
    }

    /// The verbatim markup, entities and all.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// The text painted into the grid: markup with `&nbsp;` decoded.
    pub fn display_text(&self) -> String {
        decode_nbsp(&self.markup)
    }

    pub fn set_markup(&mut self, markup: String) {
        self.markup = markup;
    }

    pub fn is_empty(&self) -> bool {
        self.markup.trim().is_empty()
    }
}

/// A column header plus the editor wiring for its cells.
///
/// `editor` is a registry key (see `editors::EditorRegistry`); the
/// grid instantiates the matching editor when a cell in this column
/// enters editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub editor: String,
    pub align: Alignment,
}

impl Column {
    pub fn new(name: impl Into<String>, editor: impl Into<String>) -> Self {
        let editor = editor.into();
        let align = default_alignment(&editor);
        Self {
            name: name.into(),
            editor,
            align,
        }
    }
}

/// Right-align the numeric editor families, left-align everything else.
pub fn default_alignment(editor: &str) -> Alignment {
    match editor {
        "price" | "numeric" => Alignment::Right,
        _ => Alignment::Left,
    }
}

/// Render a committed editor value back into cell markup.
///
/// Price columns regain exactly one leading `$`; all other columns
/// store the value verbatim. No locale or thousands formatting.
pub fn render_markup(editor: &str, value: &str) -> String {
    if editor == "price" {
        format!("${value}")
    } else {
        value.to_string()
    }
}

/// The loaded table: columns plus a rectangular grid of cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    columns: Vec<Column>,
    rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Build a sheet, padding ragged rows out to the column count.
    pub fn new(columns: Vec<Column>, mut rows: Vec<Vec<Cell>>) -> Self {
        let width = columns.len();
        for row in &mut rows {
            while row.len() < width {
                row.push(Cell::default());
            }
            row.truncate(width);
        }
        Self { columns, rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row)?.get(col)
    }

    pub fn column(&self, col: usize) -> Option<&Column> {
        self.columns.get(col)
    }

    /// Write a committed editor value into a cell, re-rendered for the
    /// owning column. Returns false when the coordinates are out of
    /// bounds.
    pub fn commit(&mut self, row: usize, col: usize, value: &str) -> bool {
        let Some(editor) = self.columns.get(col).map(|c| c.editor.clone()) else {
            return false;
        };
        let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) else {
            return false;
        };
        cell.set_markup(render_markup(&editor, value));
        true
    }

    /// Rendered width of each column: the widest of header and cell
    /// display texts, clamped to the global bounds.
    pub fn column_widths(&self) -> Vec<u16> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, col)| {
                let mut width = col.name.width();
                for row in &self.rows {
                    if let Some(cell) = row.get(idx) {
                        width = width.max(cell.display_text().width());
                    }
                }
                clamp_width(width)
            })
            .collect()
    }
}

fn clamp_width(width: usize) -> u16 {
    u16::try_from(width)
        .unwrap_or(MAX_COLUMN_WIDTH)
        .clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
}
