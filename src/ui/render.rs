use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::Model;
use crate::config::CELL_PADDING;
use crate::editors::CellEditor;
use crate::sheet::{Alignment, Cell};

use super::{HEADER_ROWS, SEPARATOR, editor_input_rect, overlays, status};

/// Render the complete UI.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();

    let toast_active = model.active_toast().is_some();
    let edit_active = model.editing();
    let footer_rows = 1 + u16::from(toast_active) + u16::from(edit_active);
    let grid_area = Rect {
        height: area.height.saturating_sub(footer_rows),
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };
    let edit_area = Rect {
        y: area.y + area.height.saturating_sub(1 + u16::from(edit_active)),
        height: 1,
        ..area
    };
    let toast_area = Rect {
        y: area.y
            + area
                .height
                .saturating_sub(1 + u16::from(edit_active) + u16::from(toast_active)),
        height: 1,
        ..area
    };

    frame.render_widget(Clear, grid_area);
    render_grid(model, frame, grid_area);
    render_session_input(model, frame);

    if toast_active {
        status::render_toast_bar(model, frame, toast_area);
    }
    if edit_active {
        status::render_edit_bar(model, frame, edit_area);
    }
    status::render_status_bar(model, frame, status_area);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_grid(model: &Model, frame: &mut Frame, area: Rect) {
    if area.height == 0 || model.sheet.is_empty() {
        let empty = Paragraph::new("  (empty table)")
            .style(Style::default().add_modifier(Modifier::DIM));
        frame.render_widget(empty, area);
        return;
    }

    let widths = model.sheet.column_widths();
    let advances = model.column_advances();
    let visible_cols = model.viewport.visible_cols(&advances);

    let mut content: Vec<Line> = Vec::new();

    // Header row
    let mut header_spans: Vec<Span> = Vec::new();
    for col in visible_cols.clone() {
        let column = &model.sheet.columns()[col];
        header_spans.push(Span::styled(
            padded(&column.name, widths[col] as usize, column.align),
            model.theme.header,
        ));
        header_spans.push(Span::styled(SEPARATOR, model.theme.grid_border));
    }
    content.push(Line::from(header_spans));

    // Data rows
    let editing = model.session.as_ref().map(|s| (s.row, s.col));
    let max_rows = area.height.saturating_sub(HEADER_ROWS) as usize;
    for row in model.viewport.visible_rows().take(max_rows) {
        let mut spans: Vec<Span> = Vec::new();
        for col in visible_cols.clone() {
            let column = &model.sheet.columns()[col];
            let base = model.theme.style_for_editor(&column.editor);
            let text = if editing == Some((row, col)) {
                // The input exclusively owns this cell's display
                // content; paint an empty cell under it.
                String::new()
            } else {
                model
                    .sheet
                    .cell(row, col)
                    .map(Cell::display_text)
                    .unwrap_or_default()
            };
            let selected = model.cursor == (row, col) && editing.is_none();
            let style = if selected { base.reversed() } else { base };
            spans.push(Span::styled(
                padded(&text, widths[col] as usize, column.align),
                style,
            ));
            spans.push(Span::styled(SEPARATOR, model.theme.grid_border));
        }
        content.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(content), area);
}

/// Paint the active session's input over its cell, visually matching
/// the cell: same width, alignment, and column style, with a block
/// cursor. The grid's padding is already carved off via the chrome
/// inset.
fn render_session_input(model: &Model, frame: &mut Frame) {
    let Some(session) = &model.session else {
        return;
    };
    let Some(rect) = editor_input_rect(model) else {
        return;
    };
    if rect.width == 0 {
        return;
    }

    let chrome = session.editor.core().chrome();
    let input = session.editor.core().input();
    let text = input.text();
    let avail = rect.width as usize;

    let before = &text[..input.cursor()];
    let cursor_char = text[input.cursor()..].chars().next();
    let after = cursor_char.map_or("", |ch| &text[input.cursor() + ch.len_utf8()..]);

    // Keep the cursor in the window: trim the front when the text
    // before it no longer fits.
    let mut before_trimmed = before;
    while before_trimmed.width() + 1 > avail {
        let Some(first) = before_trimmed.chars().next() else {
            break;
        };
        before_trimmed = &before_trimmed[first.len_utf8()..];
    }

    let cursor_cell = cursor_char.map_or_else(|| " ".to_string(), |ch| ch.to_string());
    let content_width =
        before_trimmed.width() + cursor_cell.width() + after.width();
    let lead = match chrome.align {
        Alignment::Right if content_width < avail => avail - content_width,
        _ => 0,
    };

    let mut spans: Vec<Span> = Vec::new();
    if lead > 0 {
        spans.push(Span::styled(" ".repeat(lead), chrome.style));
    }
    if !before_trimmed.is_empty() {
        spans.push(Span::styled(before_trimmed.to_string(), chrome.style));
    }
    spans.push(Span::styled(cursor_cell, model.theme.cursor));
    if !after.is_empty() {
        spans.push(Span::styled(after.to_string(), chrome.style));
    }

    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(Line::from(spans)).style(chrome.style), rect);
}

/// Fit text into a padded cell: truncate to the content width, pad to
/// alignment, and wrap in the cell padding.
pub fn padded(text: &str, width: usize, align: Alignment) -> String {
    let mut fitted = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        fitted.push(ch);
        used += w;
    }
    let fill = " ".repeat(width - used);
    let pad = " ".repeat(CELL_PADDING as usize);
    match align {
        Alignment::Left => format!("{pad}{fitted}{fill}{pad}"),
        Alignment::Right => format!("{pad}{fill}{fitted}{pad}"),
    }
}
