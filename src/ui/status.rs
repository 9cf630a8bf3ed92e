use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;
use crate::editors::CellEditor;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let filename = model
        .file_path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "untitled".to_string());

    let percent = model.viewport.scroll_percent();
    let position = format!(
        "R{}/{} C{}",
        model.cursor.0 + 1,
        model.viewport.total_rows(),
        model.cursor.1 + 1
    );

    let dirty_indicator = if model.dirty { " [modified]" } else { "" };
    let watch_indicator = if model.watch_enabled {
        " [watching]"
    } else {
        ""
    };
    let read_only_indicator = if model.read_only { " [read-only]" } else { "" };

    let status = format!(
        " {filename}{dirty_indicator}  [{percent}%]  {position}{watch_indicator}{read_only_indicator}  ?:help"
    );

    let status_bar = Paragraph::new(status).style(
        Style::default()
            .bg(model.theme.status_bg)
            .fg(model.theme.status_fg),
    );

    frame.render_widget(status_bar, area);
}

/// Shown while a cell editor is active.
pub fn render_edit_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(session) = &model.session else {
        return;
    };
    let editor_name = model
        .sheet
        .column(session.col)
        .map_or("text", |c| c.editor.as_str());

    // Passive hint only: the caller-visible signal stays one bit.
    let outcome = if session.editor.is_cancelled() {
        "no change"
    } else {
        "will commit"
    };

    let bar = Paragraph::new(format!(
        " EDIT [{editor_name}]  {outcome}  Enter:commit  Tab:commit+next  Esc:cancel"
    ))
    .style(model.theme.edit_bar);
    frame.render_widget(bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        crate::app::ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        crate::app::ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        crate::app::ToastLevel::Error => {
            ("[error]", Style::default().bg(Color::Red).fg(Color::White))
        }
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
