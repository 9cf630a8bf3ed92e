//! The text editor: any content is committable; only an unchanged
//! value cancels.

use super::core::{EditorCore, seed_text};
use super::{CellContext, CellEditor};

#[derive(Debug, Default)]
pub struct TextEditor {
    core: EditorCore,
}

impl TextEditor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CellEditor for TextEditor {
    fn initialize(&mut self, cell: &CellContext<'_>) {
        let seeded = seed_text(cell.markup, false);
        self.core.seed(seeded, cell.chrome);
    }

    fn is_cancelled(&self) -> bool {
        self.core.unchanged()
    }

    fn core(&self) -> &EditorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EditorCore {
        &mut self.core
    }
}
