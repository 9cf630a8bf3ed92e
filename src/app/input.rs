use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;
use tracing::trace;

use crate::app::{App, Message, Model};

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(w, h) => {
                trace!(width = w, height = h, "resize queued");
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::HideHelp);
        }

        // An active session claims the keyboard before grid navigation.
        if model.editing() {
            return match key.code {
                KeyCode::Esc => Some(Message::AbandonEdit),
                KeyCode::Enter => Some(Message::CommitEdit),
                KeyCode::Tab => Some(Message::CommitEditAndAdvance),
                KeyCode::Backspace => Some(Message::InputBackspace),
                KeyCode::Delete => Some(Message::InputDelete),
                KeyCode::Left => Some(Message::InputLeft),
                KeyCode::Right => Some(Message::InputRight),
                KeyCode::Home => Some(Message::InputHome),
                KeyCode::End => Some(Message::InputEnd),
                KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(Message::Save)
                }
                KeyCode::Char(c)
                    if !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT) =>
                {
                    Some(Message::InputChar(c))
                }
                _ => None,
            };
        }

        // Grid navigation
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Message::CursorDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Message::CursorUp),
            KeyCode::Char('h') | KeyCode::Left => Some(Message::CursorLeft),
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => Some(Message::CursorRight),
            KeyCode::PageDown => Some(Message::PageDown),
            KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),

            // Editing
            KeyCode::Enter | KeyCode::F(2) => Some(Message::StartEdit),

            // File
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::Save)
            }
            KeyCode::Char('r') => Some(Message::ForceReload),
            KeyCode::Char('w') => Some(Message::ToggleWatch),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),

            // Quit
            KeyCode::Char('q') => Some(Message::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::Quit)
            }

            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            if matches!(mouse.kind, MouseEventKind::Up(MouseButton::Left)) {
                return Some(Message::HideHelp);
            }
            return None;
        }

        // While a session is active, interactions inside the editing
        // cell belong to the input and must not reach grid selection;
        // anything outside ends the session through the commit path.
        if let Some(session) = &model.session {
            let cell = crate::ui::cell_rect(model, session.row, session.col);
            let in_cell = cell.is_some_and(|rect| {
                crate::ui::point_in_rect(mouse.column, mouse.row, rect)
            });
            match mouse.kind {
                MouseEventKind::Down(MouseButton::Left)
                | MouseEventKind::Drag(MouseButton::Left) => {
                    if in_cell {
                        let input = crate::ui::editor_input_rect(model)?;
                        return Some(Message::InputClickAt(
                            mouse.column.saturating_sub(input.x),
                        ));
                    }
                    if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
                        return Some(match crate::ui::cell_at(model, mouse.column, mouse.row) {
                            Some((row, col)) => Message::ClickCell(row, col),
                            None => Message::CommitEdit,
                        });
                    }
                    return None;
                }
                _ => return None,
            }
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let (row, col) = crate::ui::cell_at(model, mouse.column, mouse.row)?;
                if model.cursor == (row, col) {
                    // Second click on the selected cell opens the editor.
                    Some(Message::StartEdit)
                } else {
                    Some(Message::ClickCell(row, col))
                }
            }
            MouseEventKind::ScrollDown => {
                if model.viewport.can_scroll_down() {
                    Some(Message::ScrollDown(3))
                } else {
                    None
                }
            }
            MouseEventKind::ScrollUp => {
                if model.viewport.can_scroll_up() {
                    Some(Message::ScrollUp(3))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    pub(super) fn view(model: &mut Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}
