//! Typed in-place cell editors.
//!
//! Every editor composes the shared [`EditorCore`] (initial-value
//! capture, current-value accessor, input state) with its own seeding
//! and cancellation rules:
//!
//! - [`PriceEditor`]: strips one leading `$`, decodes `&nbsp;`;
//!   cancelled when unchanged or non-numeric.
//! - [`NumericEditor`]: decodes `&nbsp;`; cancelled when unchanged or
//!   non-numeric.
//! - [`TextEditor`]: decodes `&nbsp;`; cancelled only when unchanged.
//!
//! Editors are instantiated through the [`EditorRegistry`], an explicit
//! name-to-factory map built once at application start and consumed by
//! the grid when a cell enters editing.

mod core;
mod numeric;
mod price;
mod registry;
mod text;

pub use self::core::{CellChrome, EditorCore, InputState, is_numeric, seed_text};
pub use numeric::NumericEditor;
pub use price::PriceEditor;
pub use registry::EditorRegistry;
pub use text::TextEditor;

/// The cell handed to an editor at initialization: its rendered markup
/// and the geometry/style the input must visually match.
///
/// The editor borrows the cell for the duration of the session; it
/// never holds state beyond that session and is never reused across
/// cells.
#[derive(Debug, Clone, Copy)]
pub struct CellContext<'a> {
    pub markup: &'a str,
    pub chrome: CellChrome,
}

/// The contract every typed cell editor fulfils.
///
/// The host drives the lifecycle: construct (via the registry),
/// `initialize` against the cell, feed input, then consult
/// `is_cancelled` when editing ends to decide commit versus abandon.
/// Destruction is the host's job; the editor exposes no close
/// operation of its own.
pub trait CellEditor {
    /// Attach to the cell: seed the input from its rendered content
    /// and record the chrome to render with. Malformed markup passes
    /// through as best-effort text; there are no error conditions.
    fn initialize(&mut self, cell: &CellContext<'_>);

    /// True when the edit should not be committed: the value is
    /// unchanged from the seeded baseline, or fails the editor's
    /// validity rule. Pure read; safe to consult repeatedly.
    fn is_cancelled(&self) -> bool;

    /// Access to the shared base.
    fn core(&self) -> &EditorCore;
    fn core_mut(&mut self) -> &mut EditorCore;

    /// The current input text.
    fn value(&self) -> &str {
        self.core().value()
    }
}
