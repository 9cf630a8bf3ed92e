//! The price editor.
//!
//! Seeds from the cell's rendered content with the leading currency
//! symbol stripped and `&nbsp;` entities decoded. An edit is cancelled
//! when the value is unchanged or does not parse as a number; both
//! mean "do not commit a new price", and the two cases are deliberately
//! not distinguished to the caller.

use super::core::{EditorCore, is_numeric, seed_text};
use super::{CellContext, CellEditor};

#[derive(Debug, Default)]
pub struct PriceEditor {
    core: EditorCore,
}

impl PriceEditor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CellEditor for PriceEditor {
    fn initialize(&mut self, cell: &CellContext<'_>) {
        let seeded = seed_text(cell.markup, true);
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
