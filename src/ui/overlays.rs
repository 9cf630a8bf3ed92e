use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).clamp(48, 64);
    let popup_height = area.height.saturating_sub(6).clamp(12, 22);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "(unset)".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "(none)".to_string(), |p| p.display().to_string());

    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::Indexed(245));

    let entry = |key: &str, action: &str| {
        Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{key:<14}"), key_style),
            Span::raw(action.to_string()),
        ])
    };

    let lines = vec![
        entry("arrows/hjkl", "move selection"),
        entry("PgUp/PgDn", "page"),
        entry("g / G", "first / last row"),
        entry("Enter / F2", "edit cell"),
        Line::raw(""),
        Line::from(Span::styled("  while editing:", dim)),
        entry("Enter", "commit (unless unchanged/invalid)"),
        entry("Tab", "commit and move right"),
        entry("Esc", "cancel"),
        Line::raw(""),
        entry("Ctrl+S", "save"),
        entry("r", "reload from disk"),
        entry("w", "toggle file watching"),
        entry("q", "quit"),
        Line::raw(""),
        Line::from(Span::styled(format!("  config: {global_cfg}"), dim)),
        Line::from(Span::styled(format!("  local:  {local_cfg}"), dim)),
    ];

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
