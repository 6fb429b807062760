//! The render tree consumed by forms.
//!
//! Trees are rebuilt by the application on every render pass. A form
//! rewrites the editor nodes of the tree it is given (wrapping refs and
//! event handlers) and hands the result to the mount layer.

mod component;
mod element;

use std::sync::Arc;

pub use component::{Binding, ComponentNode, WidgetKind};
pub use element::{ClickEvent, ClickHandler, NativeNode};

use crate::editor::{Editor, EditorProps, EditorRef};
use crate::form::{Form, FormProps};

/// A node in the render tree.
#[derive(Debug, Clone, Default)]
pub enum Node {
    /// Renders nothing.
    #[default]
    Empty,
    /// Text content.
    Text(String),
    /// A native element.
    Native(NativeNode),
    /// A component, possibly bound to an editor or form instance.
    Component(ComponentNode),
}

impl Node {
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(content.into())
    }

    /// A native element with the given tag.
    pub fn el(tag: impl Into<String>) -> Self {
        Node::Native(NativeNode {
            tag: tag.into().to_lowercase(),
            ..Default::default()
        })
    }

    /// `<button type="submit">label</button>`
    pub fn submit(label: impl Into<String>) -> Self {
        Node::el("button").attr("type", "submit").child(Node::text(label))
    }

    /// Bind an editor instance with its configuration for this pass.
    pub fn editor<E: Editor + Clone + 'static>(editor: &E, props: EditorProps) -> Self {
        Self::editor_ref(Arc::new(editor.clone()), props)
    }

    pub fn editor_ref(editor: EditorRef, props: EditorProps) -> Self {
        Node::Component(ComponentNode {
            kind: editor.kind(),
            type_name: editor.type_name(),
            binding: Binding::Editor { editor, props },
            children: Vec::new(),
        })
    }

    /// Bind a form instance with its configuration for this pass.
    pub fn form(form: &Form, props: FormProps) -> Self {
        Node::Component(ComponentNode {
            kind: WidgetKind::Form,
            type_name: "Form",
            binding: Binding::Form {
                form: form.clone(),
                props,
            },
            children: Vec::new(),
        })
    }

    /// A component that only arranges its children (cards, groups, ...).
    pub fn wrapper(type_name: &'static str) -> Self {
        Node::Component(ComponentNode {
            kind: WidgetKind::Plain,
            type_name,
            binding: Binding::None,
            children: Vec::new(),
        })
    }

    /// Set the element ID. Only native elements carry one.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        if let Node::Native(native) = &mut self {
            native.id = Some(id.into());
        }
        self
    }

    /// Set an attribute on a native element.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Node::Native(native) = &mut self {
            native.attrs.insert(key.into(), value.into());
        }
        self
    }

    /// Set the click handler of a native element.
    pub fn on_click<F>(mut self, f: F) -> Self
    where
        F: Fn(&ClickEvent) + Send + Sync + 'static,
    {
        if let Node::Native(native) = &mut self {
            native.on_click = Some(Arc::new(f));
        }
        self
    }

    pub fn child(mut self, child: Node) -> Self {
        if let Some(children) = self.child_nodes_mut() {
            children.push(child);
        }
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        if let Some(own) = self.child_nodes_mut() {
            own.extend(children);
        }
        self
    }

    /// The widget kind of a component node.
    pub fn widget_kind(&self) -> Option<WidgetKind> {
        match self {
            Node::Component(c) => Some(c.kind),
            _ => None,
        }
    }

    pub fn as_component(&self) -> Option<&ComponentNode> {
        match self {
            Node::Component(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_component_mut(&mut self) -> Option<&mut ComponentNode> {
        match self {
            Node::Component(c) => Some(c),
            _ => None,
        }
    }

    pub fn child_nodes(&self) -> &[Node] {
        match self {
            Node::Native(n) => &n.children,
            Node::Component(c) => &c.children,
            Node::Empty | Node::Text(_) => &[],
        }
    }

    pub fn child_nodes_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Native(n) => Some(&mut n.children),
            Node::Component(c) => Some(&mut c.children),
            Node::Empty | Node::Text(_) => None,
        }
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::text(s)
    }
}

/// Find a native element by ID in the tree.
pub fn find_native<'a>(nodes: &'a [Node], id: &str) -> Option<&'a NativeNode> {
    for node in nodes {
        if let Node::Native(native) = node {
            if native.id.as_deref() == Some(id) {
                return Some(native);
            }
        }
        if let Some(found) = find_native(node.child_nodes(), id) {
            return Some(found);
        }
    }

    None
}
