use crate::app::{Model, ToastLevel};
use crate::editors::CellEditor;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Navigation
    /// Move the selection up one row
    CursorUp,
    /// Move the selection down one row
    CursorDown,
    /// Move the selection left one column
    CursorLeft,
    /// Move the selection right one column
    CursorRight,
    /// Scroll up one page
    PageUp,
    /// Scroll down one page
    PageDown,
    /// Jump to the first row
    GoToTop,
    /// Jump to the last row
    GoToBottom,
    /// Scroll the viewport up by n rows
    ScrollUp(usize),
    /// Scroll the viewport down by n rows
    ScrollDown(usize),
    /// Select a cell (mouse). Ends any active session via the commit
    /// path first: a click outside the input closes the editor.
    ClickCell(usize, usize),

    // Editing
    /// Open an edit session on the selected cell
    StartEdit,
    /// Insert a character at the input cursor
    InputChar(char),
    /// Delete the character before the input cursor (Backspace)
    InputBackspace,
    /// Delete the character at the input cursor (Delete)
    InputDelete,
    /// Move the input cursor left
    InputLeft,
    /// Move the input cursor right
    InputRight,
    /// Move the input cursor to the start (Home)
    InputHome,
    /// Move the input cursor to the end (End)
    InputEnd,
    /// Place the input cursor from a click at a display column
    InputClickAt(u16),
    /// End the session; commit unless the editor reports cancellation
    CommitEdit,
    /// Commit (as above) and move the selection right (Tab)
    CommitEditAndAdvance,
    /// End the session discarding any change (Esc)
    AbandonEdit,

    // File
    /// Save the sheet to disk
    Save,
    /// Force reload from disk
    ForceReload,
    /// File changed externally
    FileChanged,
    /// Toggle file watching
    ToggleWatch,

    // UI
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function.
pub fn update(mut model: Model, msg: Message) -> Model {
    // A second quit only counts when nothing else happened in between.
    if !matches!(msg, Message::Quit | Message::Save) {
        model.quit_confirmed = false;
    }

    match msg {
        // Navigation
        Message::CursorUp => {
            model.cursor.0 = model.cursor.0.saturating_sub(1);
            model.follow_cursor();
        }
        Message::CursorDown => {
            model.cursor.0 = (model.cursor.0 + 1).min(model.sheet.row_count().saturating_sub(1));
            model.follow_cursor();
        }
        Message::CursorLeft => {
            model.cursor.1 = model.cursor.1.saturating_sub(1);
            model.follow_cursor();
        }
        Message::CursorRight => {
            model.cursor.1 =
                (model.cursor.1 + 1).min(model.sheet.column_count().saturating_sub(1));
            model.follow_cursor();
        }
        Message::PageUp => {
            let page = model.viewport.height() as usize;
            model.cursor.0 = model.cursor.0.saturating_sub(page);
            model.viewport.page_up();
            model.follow_cursor();
        }
        Message::PageDown => {
            let page = model.viewport.height() as usize;
            model.cursor.0 =
                (model.cursor.0 + page).min(model.sheet.row_count().saturating_sub(1));
            model.viewport.page_down();
            model.follow_cursor();
        }
        Message::GoToTop => {
            model.cursor.0 = 0;
            model.follow_cursor();
        }
        Message::GoToBottom => {
            model.cursor.0 = model.sheet.row_count().saturating_sub(1);
            model.follow_cursor();
        }
        Message::ScrollUp(n) => {
            model.viewport.scroll_up(n);
        }
        Message::ScrollDown(n) => {
            model.viewport.scroll_down(n);
        }
        Message::ClickCell(row, col) => {
            // The host decision point for click-away: end the session
            // through the commit path before moving the selection.
            model.finish_edit();
            if row < model.sheet.row_count() && col < model.sheet.column_count() {
                model.cursor = (row, col);
                model.follow_cursor();
            }
        }

        // Editing
        Message::StartEdit => {
            model.start_edit();
        }
        Message::InputChar(ch) => {
            if let Some(session) = &mut model.session {
                session.editor.core_mut().input_mut().insert_char(ch);
            }
        }
        Message::InputBackspace => {
            if let Some(session) = &mut model.session {
                session.editor.core_mut().input_mut().backspace();
            }
        }
        Message::InputDelete => {
            if let Some(session) = &mut model.session {
                session.editor.core_mut().input_mut().delete();
            }
        }
        Message::InputLeft => {
            if let Some(session) = &mut model.session {
                session.editor.core_mut().input_mut().move_left();
            }
        }
        Message::InputRight => {
            if let Some(session) = &mut model.session {
                session.editor.core_mut().input_mut().move_right();
            }
        }
        Message::InputHome => {
            if let Some(session) = &mut model.session {
                session.editor.core_mut().input_mut().move_home();
            }
        }
        Message::InputEnd => {
            if let Some(session) = &mut model.session {
                session.editor.core_mut().input_mut().move_end();
            }
        }
        Message::InputClickAt(display_col) => {
            if let Some(session) = &mut model.session {
                session
                    .editor
                    .core_mut()
                    .input_mut()
                    .set_cursor_from_display_col(display_col as usize);
            }
        }
        Message::CommitEdit => {
            model.finish_edit();
        }
        Message::CommitEditAndAdvance => {
            model.finish_edit();
            model.cursor.1 =
                (model.cursor.1 + 1).min(model.sheet.column_count().saturating_sub(1));
            model.follow_cursor();
        }
        Message::AbandonEdit => {
            model.abandon_edit();
        }

        // File
        Message::Save => {
            // Commit any in-flight edit so the save reflects the screen.
            model.finish_edit();
        }
        // ForceReload/FileChanged: side effects in effects.rs
        Message::ForceReload | Message::FileChanged | Message::Redraw => {}
        Message::ToggleWatch => {
            model.watch_enabled = !model.watch_enabled;
        }

        // UI
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }
        Message::Resize(width, height) => {
            model.viewport.resize(width, height.saturating_sub(2));
            model.follow_cursor();
        }

        // Application
        Message::Quit => {
            if model.dirty && !model.quit_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press q again to quit, or Ctrl+S to save",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }
    model
}
