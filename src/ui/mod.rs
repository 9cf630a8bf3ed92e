//! Terminal UI components.
//!
//! This module contains all UI-related code:
//! - [`render`]: painting the grid, the inline editor, and the bars
//! - [`viewport`]: the visible window over the sheet
//! - [`style`]: themes and per-column styles
//! - [`status`]: status, toast, and edit bars
//! - [`overlays`]: the help overlay
//!
//! Plus the shared layout arithmetic: where each cell lands on screen,
//! and which cell is under a mouse position.

pub mod overlays;
pub mod render;
pub mod status;
pub mod style;
pub mod viewport;

pub use render::render;

use ratatui::layout::Rect;

use crate::app::Model;
use crate::editors::CellEditor;

/// Terminal rows above the data rows (the column header).
pub const HEADER_ROWS: u16 = 1;

/// Column separator glyph.
pub const SEPARATOR: &str = "│";

/// The terminal area occupied by data rows.
pub fn grid_rows_area(model: &Model) -> Rect {
    Rect::new(0, HEADER_ROWS, model.viewport.width(), model.viewport.height())
}

/// Screen rectangle of a visible cell: content plus padding, separator
/// excluded. `None` when the cell is scrolled out of view.
pub fn cell_rect(model: &Model, row: usize, col: usize) -> Option<Rect> {
    let advances = model.column_advances();
    let rows = model.viewport.visible_rows();
    let cols = model.viewport.visible_cols(&advances);
    if !rows.contains(&row) || !cols.contains(&col) {
        return None;
    }
    let x: u16 = advances[cols.start..col].iter().sum();
    #[allow(clippy::cast_possible_truncation)]
    let y = HEADER_ROWS + (row - rows.start) as u16;
    Some(Rect::new(x, y, advances[col].saturating_sub(1), 1))
}

/// The input rectangle of the active edit session: the cell rectangle
/// shrunk by the resolved chrome inset on each side.
pub fn editor_input_rect(model: &Model) -> Option<Rect> {
    let session = model.session.as_ref()?;
    let rect = cell_rect(model, session.row, session.col)?;
    let inset = session.editor.core().chrome().inset;
    Some(Rect {
        x: rect.x + inset,
        width: rect.width.saturating_sub(2 * inset),
        ..rect
    })
}

/// The cell under a screen position, if any.
pub fn cell_at(model: &Model, x: u16, y: u16) -> Option<(usize, usize)> {
    let area = grid_rows_area(model);
    if y < area.y || y >= area.y + area.height {
        return None;
    }
    let row = model.viewport.visible_rows().start + (y - area.y) as usize;
    if row >= model.sheet.row_count() {
        return None;
    }
    let advances = model.column_advances();
    let mut edge = 0u16;
    for col in model.viewport.visible_cols(&advances) {
        let next = edge.saturating_add(advances[col]);
        if x < next {
            return Some((row, col));
        }
        edge = next;
    }
    None
}

/// True when a screen position falls inside a rectangle.
pub const fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}
