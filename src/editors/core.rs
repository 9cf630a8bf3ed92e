//! The shared editing base composed into every typed cell editor.
//!
//! [`EditorCore`] provides what the typed editors have in common:
//! seeding the input from a cell's rendered content while capturing
//! the initial value, the current-value accessor, and a UTF-8-safe
//! single-line input state. The typed editors own only their seeding
//! rule and their cancellation rule.

use ratatui::style::Style;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::sheet::{Alignment, decode_nbsp};

/// Geometry and styling the input must visually match.
///
/// Captured from the cell being edited and resolved once per session;
/// `inset` is the configured border allowance carved off each side of
/// the cell rectangle (see `config::EditorChrome`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellChrome {
    pub width: u16,
    pub align: Alignment,
    pub style: Style,
    pub inset: u16,
}

/// True when `text` parses as a number for cancellation purposes.
///
/// Surrounding whitespace is ignored (seeded values may carry trailing
/// spaces decoded from `&nbsp;` padding). Empty or whitespace-only
/// text is not a number, and neither is `NaN` even though it parses.
pub fn is_numeric(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return false;
    }
    trimmed.parse::<f64>().is_ok_and(|value| !value.is_nan())
}

/// Derive the seeded input text from a cell's rendered markup.
///
/// When `strip_currency` is set and the first character is `$`, exactly
/// that one character is removed. Every `&nbsp;` becomes a literal
/// space. Anything else passes through untouched.
pub fn seed_text(markup: &str, strip_currency: bool) -> String {
    let stripped = if strip_currency {
        markup.strip_prefix('$').unwrap_or(markup)
    } else {
        markup
    };
    decode_nbsp(stripped)
}

/// Single-line text input with a byte cursor kept on UTF-8 boundaries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    text: String,
    cursor: usize,
}

impl InputState {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the text and place the cursor at the end.
    pub fn set_text(&mut self, text: String) {
        self.cursor = text.len();
        self.text = text;
    }

    pub fn insert_char(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Remove the character before the cursor.
    pub fn backspace(&mut self) {
        let Some(prev) = self.text[..self.cursor].chars().next_back() else {
            return;
        };
        let start = self.cursor - prev.len_utf8();
        self.text.drain(start..self.cursor);
        self.cursor = start;
    }

    /// Remove the character at the cursor.
    pub fn delete(&mut self) {
        let Some(next) = self.text[self.cursor..].chars().next() else {
            return;
        };
        self.text.drain(self.cursor..self.cursor + next.len_utf8());
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.text[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    pub const fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Cursor position in display columns, for painting.
    pub fn display_cursor_col(&self) -> usize {
        self.text[..self.cursor].width()
    }

    /// Place the cursor at a clicked display column.
    pub fn set_cursor_from_display_col(&mut self, col: usize) {
        let mut width = 0usize;
        for (idx, ch) in self.text.char_indices() {
            if width >= col {
                self.cursor = idx;
                return;
            }
            width += ch.width().unwrap_or(0);
        }
        self.cursor = self.text.len();
    }
}

/// The shared base: input state, captured initial value, and the
/// chrome the input must render with.
#[derive(Debug, Clone, Default)]
pub struct EditorCore {
    input: InputState,
    initial_value: String,
    chrome: CellChrome,
}

impl EditorCore {
    /// Assign the input's editable text and capture it as the baseline
    /// that cancellation compares against.
    pub fn seed(&mut self, text: String, chrome: CellChrome) {
        self.initial_value.clone_from(&text);
        self.input.set_text(text);
        self.chrome = chrome;
    }

    /// The current input text.
    pub fn value(&self) -> &str {
        self.input.text()
    }

    /// The value captured at seed time.
    pub fn initial_value(&self) -> &str {
        &self.initial_value
    }

    /// True when the input still holds exactly the seeded text.
    pub fn unchanged(&self) -> bool {
        self.input.text() == self.initial_value
    }

    pub const fn input(&self) -> &InputState {
        &self.input
    }

    pub const fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub const fn chrome(&self) -> CellChrome {
        self.chrome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_accepts_plain_and_padded_numbers() {
        assert!(is_numeric("12.00"));
        assert!(is_numeric("12.00 "));
        assert!(is_numeric(" -3.5"));
        assert!(is_numeric("0"));
    }

    #[test]
    fn test_is_numeric_rejects_empty_garbage_and_grouped_digits() {
        assert!(!is_numeric(""));
        assert!(!is_numeric("   "));
        assert!(!is_numeric("abc"));
        assert!(!is_numeric("1,200"));
        assert!(!is_numeric("NaN"));
    }

    #[test]
    fn test_seed_text_strips_exactly_one_leading_currency_symbol() {
        assert_eq!(seed_text("$10.50", true), "10.50");
        assert_eq!(seed_text("$$10", true), "$10");
        assert_eq!(seed_text("10.50", true), "10.50");
    }

    #[test]
    fn test_seed_text_only_strips_at_the_front() {
        assert_eq!(seed_text("10$", true), "10$");
    }

    #[test]
    fn test_seed_text_decodes_nbsp_without_currency_stripping() {
        assert_eq!(seed_text("$10&nbsp;", false), "$10 ");
    }

    #[test]
    fn test_input_utf8_editing() {
        let mut input = InputState::default();
        input.set_text("1é2".to_string());
        input.move_left();
        input.move_left();
        input.insert_char('x');
        assert_eq!(input.text(), "1xé2");
        input.move_right();
        input.backspace();
        assert_eq!(input.text(), "1x2");
        input.delete();
        assert_eq!(input.text(), "1x");
    }

    #[test]
    fn test_input_backspace_at_start_is_a_no_op() {
        let mut input = InputState::default();
        input.set_text("12".to_string());
        input.move_home();
        input.backspace();
        assert_eq!(input.text(), "12");
    }

    #[test]
    fn test_cursor_from_display_col_clamps_to_end() {
        let mut input = InputState::default();
        input.set_text("abc".to_string());
        input.set_cursor_from_display_col(99);
        assert_eq!(input.cursor(), 3);
        input.set_cursor_from_display_col(1);
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn test_core_seed_captures_initial_value() {
        let mut core = EditorCore::default();
        core.seed("10.50".to_string(), CellChrome::default());
        assert!(core.unchanged());

        core.input_mut().insert_char('0');
        assert!(!core.unchanged());
        assert_eq!(core.initial_value(), "10.50");
        assert_eq!(core.value(), "10.500");
    }
}
