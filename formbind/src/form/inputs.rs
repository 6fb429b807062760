use indexmap::IndexMap;
use log::debug;

use crate::editor::{EditorRef, WidgetId};

/// The editors currently mounted in a form, keyed by name in attach order.
///
/// Only ref attach/detach callbacks mutate it.
#[derive(Default, Clone)]
pub struct Inputs {
    entries: IndexMap<String, EditorRef>,
}

impl Inputs {
    pub fn attach(&mut self, name: &str, editor: EditorRef) {
        debug!("[form] attach {} ({})", name, editor.id());
        self.entries.insert(name.to_string(), editor);
    }

    /// Remove `name` if it is still registered to the widget `id`.
    ///
    /// A newer editor that took over the name is left alone.
    pub fn detach(&mut self, name: &str, id: WidgetId) -> bool {
        match self.entries.get(name) {
            Some(editor) if editor.id() == id => {
                debug!("[form] detach {} ({})", name, id);
                self.entries.shift_remove(name);
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<EditorRef> {
        self.entries.get(name).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Owned copy of the entries, so callers can run editor code without
    /// holding the form's lock.
    pub fn snapshot(&self) -> Vec<(String, EditorRef)> {
        self.entries
            .iter()
            .map(|(name, editor)| (name.clone(), editor.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for Inputs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.entries.keys()).finish()
    }
}
