//! The numeric editor: like the price editor without currency
//! handling. Seeds with `&nbsp;` decoded only.

use super::core::{EditorCore, is_numeric, seed_text};
use super::{CellContext, CellEditor};

#[derive(Debug, Default)]
pub struct NumericEditor {
    core: EditorCore,
}

impl NumericEditor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CellEditor for NumericEditor {
    fn initialize(&mut self, cell: &CellContext<'_>) {
        let seeded = seed_text(cell.markup, false);
        self.core.seed(seeded, cell.chrome);
    }

    fn is_cancelled(&self) -> bool {
        self.core.unchanged() || !is_numeric(self.core.value())
    }

    fn core(&self) -> &EditorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EditorCore {
        &mut self.core
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editors::CellChrome;

    fn editor_for(markup: &str) -> NumericEditor {
        let mut editor = NumericEditor::new();
        editor.initialize(&CellContext {
            markup,
            chrome: CellChrome::default(),
        });
        editor
    }

    #[test]
    fn test_currency_symbol_is_not_stripped() {
        let editor = editor_for("$5");
        assert_eq!(editor.value(), "$5");
    }

    #[test]
    fn test_changed_numeric_edit_commits() {
        let mut editor = editor_for("2.5");
        editor.core_mut().input_mut().set_text("3".to_string());
        assert!(!editor.is_cancelled());
    }

    #[test]
    fn test_unchanged_or_garbage_cancels() {
        let mut editor = editor_for("2.5");
        assert!(editor.is_cancelled());
        editor.core_mut().input_mut().set_text("2.5kg".to_string());
        assert!(editor.is_cancelled());
    }
}
