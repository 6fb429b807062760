//! Widget discovery in a form's child tree.
//!
//! Walks children in document order:
//! - text and empty nodes contribute nothing;
//! - native elements are transparent and recursed into;
//! - a component of the requested kind is collected and not entered;
//! - a nested form is skipped entirely, it owns its own editors;
//! - any other component is entered, it may render editors inside.

use log::trace;

use crate::node::{NativeNode, Node, WidgetKind};

/// Collect every node of `kind` reachable without crossing a nested form.
pub fn find_widgets(nodes: &[Node], kind: WidgetKind) -> Vec<&Node> {
    let mut found = Vec::new();
    collect(nodes, kind, &mut found);
    found
}

/// Mutable variant of [`find_widgets`].
pub fn find_widgets_mut(nodes: &mut [Node], kind: WidgetKind) -> Vec<&mut Node> {
    let mut found = Vec::new();
    collect_mut(nodes, kind, &mut found);
    found
}

/// Editor nodes owned by the form whose children these are.
pub fn find_editors(nodes: &[Node]) -> Vec<&Node> {
    find_widgets(nodes, WidgetKind::Editor)
}

/// Submit controls (`button`/`input` with `type="submit"`) owned by the form
/// whose children these are.
pub fn find_submit_controls_mut(nodes: &mut [Node]) -> Vec<&mut NativeNode> {
    let mut found = Vec::new();
    collect_submit_mut(nodes, &mut found);
    found
}

fn collect<'a>(nodes: &'a [Node], kind: WidgetKind, found: &mut Vec<&'a Node>) {
    for node in nodes {
        match node.widget_kind() {
            Some(k) if k == kind => {
                trace!("[discover] found {:?} {:?}", kind, node.as_component().and_then(|c| c.name()));
                found.push(node);
                continue;
            }
            Some(WidgetKind::Form) => continue,
            _ => {}
        }
        collect(node.child_nodes(), kind, found);
    }
}

fn collect_mut<'a>(nodes: &'a mut [Node], kind: WidgetKind, found: &mut Vec<&'a mut Node>) {
    for node in nodes.iter_mut() {
        match node.widget_kind() {
            Some(k) if k == kind => {
                found.push(node);
                continue;
            }
            Some(WidgetKind::Form) => continue,
            _ => {}
        }
        if let Some(children) = node.child_nodes_mut() {
            collect_mut(children, kind, found);
        }
    }
}

fn collect_submit_mut<'a>(nodes: &'a mut [Node], found: &mut Vec<&'a mut NativeNode>) {
    for node in nodes.iter_mut() {
        match node {
            Node::Native(native) => {
                if native.is_submit_control() {
                    found.push(native);
                } else {
                    collect_submit_mut(&mut native.children, found);
                }
            }
            Node::Component(c) if c.kind == WidgetKind::Form => {}
            Node::Component(c) => collect_submit_mut(&mut c.children, found),
            Node::Empty | Node::Text(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::EditorProps;
    use crate::form::{Form, FormProps};
    use crate::widgets::TextInput;

    fn names(found: &[&Node]) -> Vec<String> {
        found
            .iter()
            .filter_map(|n| n.as_component().and_then(|c| c.name()).map(str::to_string))
            .collect()
    }

    fn input(name: &str) -> Node {
        Node::editor(&TextInput::new(), EditorProps::new(name))
    }

    #[test]
    fn test_text_and_empty_contribute_nothing() {
        let tree = vec![Node::text("hi"), Node::Empty];
        assert!(find_editors(&tree).is_empty());
    }

    #[test]
    fn test_document_order_across_branches() {
        let tree = vec![
            Node::el("div").child(input("a")).child(Node::el("span").child(input("b"))),
            Node::wrapper("Card").child(Node::wrapper("Group").child(input("c"))),
            input("d"),
        ];
        assert_eq!(names(&find_editors(&tree)), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_nested_form_is_not_entered() {
        let inner = Form::new();
        let tree = vec![
            input("outer"),
            Node::form(&inner, FormProps::default()).child(input("inner")),
        ];
        assert_eq!(names(&find_editors(&tree)), vec!["outer"]);
    }

    #[test]
    fn test_editor_children_are_not_entered() {
        let tree = vec![input("parent").child(input("child"))];
        assert_eq!(names(&find_editors(&tree)), vec!["parent"]);
    }

    #[test]
    fn test_find_forms() {
        let inner = Form::new();
        let tree = vec![Node::el("div").child(Node::form(&inner, FormProps::default()))];
        assert_eq!(find_widgets(&tree, WidgetKind::Form).len(), 1);
    }

    #[test]
    fn test_submit_controls() {
        let inner = Form::new();
        let mut tree = vec![
            Node::el("div").child(Node::submit("Send")),
            Node::el("input").attr("type", "submit"),
            Node::el("button").attr("type", "button"),
            Node::form(&inner, FormProps::default()).child(Node::submit("Inner")),
        ];
        assert_eq!(find_submit_controls_mut(&mut tree).len(), 2);
    }
}
