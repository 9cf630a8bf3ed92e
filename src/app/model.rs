use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::debug;

use crate::config::{CELL_PADDING, EditorChrome};
use crate::editors::{CellChrome, CellContext, CellEditor, EditorRegistry};
use crate::sheet::{self, Sheet};
use crate::ui::style::Theme;
use crate::ui::viewport::GridViewport;

/// How long a toast stays on screen.
const TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// One in-flight cell edit.
///
/// Exactly one session exists at a time; the editor inside it
/// exclusively owns the cell's display content until the session ends
/// (the grid paints the input instead of the cell while this is live).
pub struct EditSession {
    pub row: usize,
    pub col: usize,
    pub editor: Box<dyn CellEditor>,
}

impl std::fmt::Debug for EditSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditSession")
            .field("row", &self.row)
            .field("col", &self.col)
            .field("value", &self.editor.value())
            .finish()
    }
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The loaded table
    pub sheet: Sheet,
    /// Viewport over the grid
    pub viewport: GridViewport,
    /// Selected cell (row, col)
    pub cursor: (usize, usize),
    /// Path to the source file
    pub file_path: PathBuf,
    /// Editor factories, built once at startup
    pub registry: EditorRegistry,
    /// Inline-editor inset, resolved once at startup
    pub chrome: EditorChrome,
    /// Active theme
    pub theme: Theme,
    /// The active edit session, if any
    pub session: Option<EditSession>,
    /// Whether the sheet has uncommitted-to-disk changes
    pub dirty: bool,
    /// Whether editing is disabled entirely
    pub read_only: bool,
    /// Whether file watching is enabled
    pub watch_enabled: bool,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    /// Set after first quit attempt with unsaved changes; allows second quit to proceed
    pub quit_confirmed: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    toast: Option<Toast>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("file_path", &self.file_path)
            .field("cursor", &self.cursor)
            .field("dirty", &self.dirty)
            .field("editing", &self.session.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(PathBuf::new(), Sheet::empty(), (80, 24))
    }
}

impl Model {
    /// Create a new model with default settings.
    ///
    /// One terminal row is reserved for the header and one for the
    /// status bar; the viewport gets the rest.
    pub fn new(file_path: PathBuf, sheet: Sheet, terminal_size: (u16, u16)) -> Self {
        let viewport = GridViewport::new(
            terminal_size.0,
            terminal_size.1.saturating_sub(2),
            sheet.row_count(),
            sheet.column_count(),
        );
        Self {
            sheet,
            viewport,
            cursor: (0, 0),
            file_path,
            registry: EditorRegistry::with_builtin(),
            chrome: EditorChrome::default(),
            theme: Theme::default(),
            session: None,
            dirty: false,
            read_only: false,
            watch_enabled: false,
            help_visible: false,
            config_global_path: None,
            config_local_path: None,
            quit_confirmed: false,
            should_quit: false,
            toast: None,
        }
    }

    pub const fn editing(&self) -> bool {
        self.session.is_some()
    }

    /// Full painted width of each column: content, padding on both
    /// sides, and the separator.
    pub fn column_advances(&self) -> Vec<u16> {
        self.sheet
            .column_widths()
            .into_iter()
            .map(|w| w + 2 * CELL_PADDING + 1)
            .collect()
    }

    /// Begin editing the selected cell.
    ///
    /// Looks up the column's editor in the registry, initializes it
    /// against the cell's rendered content and chrome, and installs
    /// the session. No-op when read-only, already editing, or the
    /// cursor is out of bounds.
    pub fn start_edit(&mut self) {
        if self.session.is_some() {
            return;
        }
        if self.read_only {
            self.show_toast(ToastLevel::Warning, "Read-only mode");
            return;
        }
        let (row, col) = self.cursor;
        let Some(column) = self.sheet.column(col) else {
            return;
        };
        let Some(cell) = self.sheet.cell(row, col) else {
            return;
        };

        let content_width = self.sheet.column_widths()[col] + 2 * CELL_PADDING;
        let chrome = CellChrome {
            width: content_width.saturating_sub(2 * self.chrome.inset),
            align: column.align,
            style: self.theme.style_for_editor(&column.editor),
            inset: self.chrome.inset,
        };

        let mut editor = self.registry.create(&column.editor);
        editor.initialize(&CellContext {
            markup: cell.markup(),
            chrome,
        });
        debug!(row, col, editor = %column.editor, "edit session opened");
        self.session = Some(EditSession { row, col, editor });
    }

    /// End the active session through the commit path: the host
    /// consults the editor's cancellation signal and either writes the
    /// value back or discards it. Either way the session is closed.
    pub fn finish_edit(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        if session.editor.is_cancelled() {
            debug!(row = session.row, col = session.col, "edit cancelled");
            return;
        }
        let value = session.editor.value().to_string();
        if self.sheet.commit(session.row, session.col, &value) {
            debug!(row = session.row, col = session.col, "edit committed");
            self.dirty = true;
        }
    }

    /// Drop the active session without consulting the editor.
    pub fn abandon_edit(&mut self) {
        if self.session.take().is_some() {
            debug!("edit abandoned");
        }
    }

    /// Reload the sheet from disk, keeping cursor and scroll position
    /// as close as bounds allow.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn reload_from_disk(&mut self) -> Result<()> {
        let sheet = sheet::load(&self.file_path)?;
        self.sheet = sheet;
        self.dirty = false;
        self.viewport
            .set_totals(self.sheet.row_count(), self.sheet.column_count());
        self.clamp_cursor();
        Ok(())
    }

    pub fn clamp_cursor(&mut self) {
        self.cursor.0 = self.cursor.0.min(self.sheet.row_count().saturating_sub(1));
        self.cursor.1 = self
            .cursor
            .1
            .min(self.sheet.column_count().saturating_sub(1));
    }

    /// Keep the selected cell inside the viewport.
    pub fn follow_cursor(&mut self) {
        let advances = self.column_advances();
        self.viewport.ensure_row_visible(self.cursor.0);
        self.viewport.ensure_col_visible(self.cursor.1, &advances);
    }

    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    /// Clear an expired toast; returns true when one was cleared.
    pub fn expire_toast(&mut self, now: Instant) -> bool {
        if self.toast.as_ref().is_some_and(|t| now >= t.expires_at) {
            self.toast = None;
            return true;
        }
        false
    }
}
