//! Tests for the submit contract.

use std::sync::{Arc, Mutex};

use formbind::prelude::*;

struct Outcome {
    submitted: Arc<Mutex<Vec<Value>>>,
    validated: Arc<Mutex<Vec<Option<FormValidationError>>>>,
}

fn watched(props: FormProps) -> (FormProps, Outcome) {
    let outcome = Outcome {
        submitted: Arc::new(Mutex::new(Vec::new())),
        validated: Arc::new(Mutex::new(Vec::new())),
    };
    let submitted = outcome.submitted.clone();
    let validated = outcome.validated.clone();
    let props = props
        .on_submit(move |e| submitted.lock().unwrap().push(e.value.clone()))
        .on_validate(move |e| validated.lock().unwrap().push(e.error.clone()));
    (props, outcome)
}

fn confirm_email_tree(form: &Form, props: FormProps, email: &TextInput, confirm: &TextInput) -> Vec<Node> {
    vec![Node::form(form, props).children([
        Node::editor(
            email,
            EditorProps::new("email").required(true).validate(Validator::email()),
        ),
        Node::editor(
            confirm,
            EditorProps::new("confirmEmail")
                .required(true)
                .validate(Validator::matches("email").with_message("{{label}} must match the e-mail")),
        ),
        Node::el("footer").child(Node::submit("Sign up").id("save")),
    ])]
}

#[test]
fn test_mismatched_confirmation_blocks_submit() {
    let form = Form::new();
    let email = TextInput::new();
    let confirm = TextInput::new();
    let (props, outcome) = watched(FormProps::new());

    let mut mounter = Mounter::new();
    mounter
        .render(confirm_email_tree(&form, props, &email, &confirm))
        .unwrap();
    email.element().set_raw_value("a@b.com");
    confirm.element().set_raw_value("a@b.co");

    let click = mounter.click("save").unwrap();
    assert!(click.is_default_prevented());

    assert!(outcome.submitted.lock().unwrap().is_empty());
    let validated = outcome.validated.lock().unwrap();
    assert_eq!(validated.len(), 1);
    let error = validated[0].as_ref().unwrap();
    assert_eq!(error.len(), 1);
    assert_eq!(error.errors()[0].editor, "confirmEmail");
    assert_eq!(
        error.errors()[0].resolve("Confirmation"),
        "Confirmation must match the e-mail"
    );
}

#[test]
fn test_valid_form_submits_value() {
    let form = Form::new();
    let email = TextInput::new();
    let confirm = TextInput::new();
    let (props, outcome) = watched(FormProps::new());

    let mut mounter = Mounter::new();
    mounter
        .render(confirm_email_tree(&form, props, &email, &confirm))
        .unwrap();
    email.element().set_raw_value("a@b.com");
    confirm.element().set_raw_value("a@b.com");

    assert!(form.submit());

    let submitted = outcome.submitted.lock().unwrap();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].get("confirmEmail"), Some(&Value::from("a@b.com")));
    assert!(outcome.validated.lock().unwrap()[0].is_none());
}

#[test]
fn test_submit_on_invalid_still_submits() {
    let form = Form::new();
    let email = TextInput::new();
    let confirm = TextInput::new();
    let (props, outcome) = watched(FormProps::new().submit_on_invalid(true));

    let mut mounter = Mounter::new();
    mounter
        .render(confirm_email_tree(&form, props, &email, &confirm))
        .unwrap();
    email.element().set_raw_value("not an email");

    assert!(mounter.click("save").is_some());

    assert_eq!(outcome.submitted.lock().unwrap().len(), 1);
    let validated = outcome.validated.lock().unwrap();
    let error = validated[0].as_ref().unwrap();
    assert_eq!(error.for_editor("email").count(), 1);
    assert_eq!(error.for_editor("confirmEmail").count(), 1);
}

#[test]
fn test_existing_click_handler_runs_first() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let (o1, o2) = (order.clone(), order.clone());
    let form = Form::new();

    let props = FormProps::new().on_submit(move |_| o2.lock().unwrap().push("submit"));
    let button = Node::submit("Go")
        .id("go")
        .on_click(move |e: &ClickEvent| {
            o1.lock().unwrap().push(if e.is_default_prevented() { "late" } else { "click" });
        });

    let mut mounter = Mounter::new();
    mounter
        .render(vec![Node::form(&form, props).child(button)])
        .unwrap();
    mounter.click("go");

    assert_eq!(*order.lock().unwrap(), vec!["click", "submit"]);
}

#[test]
fn test_plain_button_is_not_bound() {
    let form = Form::new();
    let (props, outcome) = watched(FormProps::new());

    let mut mounter = Mounter::new();
    mounter
        .render(vec![Node::form(&form, props).child(Node::el("button").id("cancel"))])
        .unwrap();

    assert!(mounter.click("cancel").is_none());
    assert!(outcome.validated.lock().unwrap().is_empty());
}

#[test]
fn test_nested_submit_belongs_to_nested_form() {
    let outer = Form::new();
    let inner = Form::new();
    let (outer_props, outer_outcome) = watched(FormProps::new());
    let (inner_props, inner_outcome) = watched(FormProps::new());

    let mut mounter = Mounter::new();
    mounter
        .render(vec![Node::form(&outer, outer_props).children([
            Node::form(&inner, inner_props).child(Node::submit("Inner").id("inner")),
            Node::submit("Outer").id("outer"),
        ])])
        .unwrap();

    mounter.click("inner");
    assert_eq!(inner_outcome.submitted.lock().unwrap().len(), 1);
    assert!(outer_outcome.submitted.lock().unwrap().is_empty());

    mounter.click("outer");
    assert_eq!(outer_outcome.submitted.lock().unwrap().len(), 1);
}

#[test]
fn test_empty_form_submits_null() {
    let form = Form::new();
    let (props, outcome) = watched(FormProps::new());

    let mut mounter = Mounter::new();
    mounter
        .render(vec![Node::form(&form, props).child(Node::submit("Go").id("go"))])
        .unwrap();
    mounter.click("go");

    assert_eq!(*outcome.submitted.lock().unwrap(), vec![Value::Null]);
}
