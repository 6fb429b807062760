use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::Node;

/// Handler invoked when a native element is clicked.
pub type ClickHandler = Arc<dyn Fn(&ClickEvent) + Send + Sync>;

/// A click on a native element.
#[derive(Debug, Default)]
pub struct ClickEvent {
    default_prevented: AtomicBool,
}

impl ClickEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress the element's default action (e.g. native form submission).
    pub fn prevent_default(&self) {
        self.default_prevented.store(true, Ordering::SeqCst);
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.load(Ordering::SeqCst)
    }
}

/// A native element in the render tree (`div`, `button`, `input`, ...).
///
/// Native containers are transparent to editor discovery.
#[derive(Clone, Default)]
pub struct NativeNode {
    pub tag: String,
    pub id: Option<String>,
    pub attrs: HashMap<String, String>,
    pub on_click: Option<ClickHandler>,
    pub children: Vec<Node>,
}

impl NativeNode {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// A `button` or `input` whose `type` is `submit`.
    pub fn is_submit_control(&self) -> bool {
        matches!(self.tag.as_str(), "button" | "input") && self.attr("type") == Some("submit")
    }
}

impl fmt::Debug for NativeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeNode")
            .field("tag", &self.tag)
            .field("id", &self.id)
            .field("attrs", &self.attrs)
            .field("on_click", &self.on_click.is_some())
            .field("children", &self.children)
            .finish()
    }
}
