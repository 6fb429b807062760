//! Tests for editor discovery in form trees.

use formbind::discover::{find_editors, find_widgets};
use formbind::prelude::*;
use formbind::WidgetKind;

fn names(nodes: &[&Node]) -> Vec<String> {
    nodes
        .iter()
        .filter_map(|n| n.as_component().and_then(|c| c.name()))
        .map(str::to_string)
        .collect()
}

#[test]
fn test_editors_found_in_document_order() {
    let tree = vec![
        Node::el("div").children([
            Node::editor(&TextInput::new(), EditorProps::new("first")),
            Node::el("fieldset").child(Node::editor(&TextInput::new(), EditorProps::new("second"))),
        ]),
        Node::text("between"),
        Node::editor(&Checkbox::new(), EditorProps::new("third")),
    ];

    assert_eq!(names(&find_editors(&tree)), vec!["first", "second", "third"]);
}

#[test]
fn test_plain_components_are_entered() {
    let tree = vec![Node::wrapper("Card").child(
        Node::wrapper("Section").child(Node::editor(&TextInput::new(), EditorProps::new("deep"))),
    )];

    assert_eq!(names(&find_editors(&tree)), vec!["deep"]);
}

#[test]
fn test_nested_form_editors_belong_to_nested_form() {
    let inner = Form::new();
    let tree = vec![
        Node::editor(&TextInput::new(), EditorProps::new("outer")),
        Node::form(&inner, FormProps::new())
            .child(Node::editor(&TextInput::new(), EditorProps::new("inner"))),
    ];

    assert_eq!(names(&find_editors(&tree)), vec!["outer"]);
    assert_eq!(find_widgets(&tree, WidgetKind::Form).len(), 1);
}

#[test]
fn test_editor_children_are_not_entered() {
    let tree = vec![Node::editor(&TextInput::new(), EditorProps::new("parent"))
        .child(Node::editor(&TextInput::new(), EditorProps::new("child")))];

    assert_eq!(names(&find_editors(&tree)), vec!["parent"]);
}

#[test]
fn test_empty_tree() {
    let tree = vec![Node::Empty, Node::text("nothing here"), Node::el("p")];
    assert!(find_editors(&tree).is_empty());
}

#[test]
fn test_unnamed_editor_fails_render() {
    let form = Form::new();
    let mut mounter = Mounter::new();
    let result = mounter.render(vec![Node::form(&form, FormProps::new()).child(
        Node::el("div").child(Node::editor(&TextInput::new(), EditorProps::default())),
    )]);

    assert_eq!(
        result.unwrap_err(),
        MountError::Config(ConfigError::MissingName {
            widget: "TextInput".into()
        })
    );
    assert!(form.inputs().is_empty());
}

#[test]
fn test_duplicate_name_fails_render() {
    let form = Form::new();
    let mut mounter = Mounter::new();
    let result = mounter.render(vec![Node::form(&form, FormProps::new()).children([
        Node::editor(&TextInput::new(), EditorProps::new("email")),
        Node::wrapper("Card").child(Node::editor(&Checkbox::new(), EditorProps::new("email"))),
    ])]);

    let err = result.unwrap_err();
    assert_eq!(
        err,
        MountError::Config(ConfigError::DuplicateName {
            widget: "Checkbox".into(),
            name: "email".into()
        })
    );
    assert!(err.to_string().contains("email already defined"));
}

#[test]
fn test_same_instance_twice_is_rejected() {
    let input = TextInput::new();
    let mut mounter = Mounter::new();
    let result = mounter.render(vec![
        Node::editor(&input, EditorProps::new("a")),
        Node::editor(&input, EditorProps::new("b")),
    ]);

    assert!(matches!(result, Err(MountError::DuplicateInstance { id }) if id == input.id()));
}
