//! The editor registry.
//!
//! An explicit map from editor-type name to factory, built once at
//! application start and owned by the model. Column configuration
//! selects editors by these keys. Nothing global, nothing mutated
//! after startup.

use std::collections::HashMap;

use tracing::warn;

use super::{CellEditor, NumericEditor, PriceEditor, TextEditor};

type EditorFactory = Box<dyn Fn() -> Box<dyn CellEditor>>;

pub struct EditorRegistry {
    factories: HashMap<String, EditorFactory>,
}

impl EditorRegistry {
    /// An empty registry. Most callers want [`EditorRegistry::with_builtin`].
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// The standard registry: `price`, `numeric`, and `text`.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register("price", || Box::new(PriceEditor::new()));
        registry.register("numeric", || Box::new(NumericEditor::new()));
        registry.register("text", || Box::new(TextEditor::new()));
        registry
    }

    pub fn register(
        &mut self,
        key: impl Into<String>,
        factory: impl Fn() -> Box<dyn CellEditor> + 'static,
    ) {
        self.factories.insert(key.into(), Box::new(factory));
    }

    pub fn contains(&self, key: &str) -> bool {
        self.factories.contains_key(key)
    }

    /// Instantiate the editor registered under `key`.
    ///
    /// Unknown keys fall back to the text editor so a sidecar typo
    /// degrades to plain editing instead of a dead column.
    pub fn create(&self, key: &str) -> Box<dyn CellEditor> {
        if let Some(factory) = self.factories.get(key) {
            return factory();
        }
        warn!(key, "unknown editor type, falling back to text");
        Box::new(TextEditor::new())
    }
}

impl Default for EditorRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl std::fmt::Debug for EditorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("EditorRegistry").field("keys", &keys).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editors::{CellChrome, CellContext};

    #[test]
    fn test_builtin_registry_knows_the_standard_editors() {
        let registry = EditorRegistry::with_builtin();
        assert!(registry.contains("price"));
        assert!(registry.contains("numeric"));
        assert!(registry.contains("text"));
        assert!(!registry.contains("date"));
    }

    #[test]
    fn test_price_key_creates_a_currency_stripping_editor() {
        let registry = EditorRegistry::with_builtin();
        let mut editor = registry.create("price");
        editor.initialize(&CellContext {
            markup: "$9.99",
            chrome: CellChrome::default(),
        });
        assert_eq!(editor.value(), "9.99");
    }

    #[test]
    fn test_unknown_key_falls_back_to_text() {
        let registry = EditorRegistry::with_builtin();
        let mut editor = registry.create("dropdown");
        editor.initialize(&CellContext {
            markup: "$9.99",
            chrome: CellChrome::default(),
        });
        // Text fallback: no currency stripping.
        assert_eq!(editor.value(), "$9.99");
    }

    #[test]
    fn test_custom_registration() {
        let mut registry = EditorRegistry::new();
        registry.register("plain", || Box::new(crate::editors::TextEditor::new()));
        assert!(registry.contains("plain"));
        assert!(!registry.contains("price"));
    }
}
