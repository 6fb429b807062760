//! Tests for per-editor validation rules.

use formbind::native::NativeElement;
use formbind::prelude::*;
use formbind::validation::ValidatorKind;

fn mounted(props: EditorProps, value: &str) -> TextInput {
    let input = TextInput::new();
    input.did_mount(&props);
    input.element().set_raw_value(value);
    input
}

#[test]
fn test_required_failure_short_circuits() {
    let input = mounted(
        EditorProps::new("code")
            .required(true)
            .validate(Validator::min_length(4))
            .validate(Validator::regex("^[0-9]+$").unwrap()),
        "",
    );

    let errors = input.validate().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors.errors()[0].validator.kind(), ValidatorKind::Required));
    assert_eq!(errors.errors()[0].editor, "code");
}

#[test]
fn test_optional_empty_value_is_valid() {
    let input = mounted(
        EditorProps::new("nickname")
            .validate(Validator::min_length(4))
            .validate(Validator::email()),
        "",
    );

    assert!(input.validate().is_ok());
}

#[test]
fn test_zero_is_a_value() {
    let qty = TextInput::with_type("number");
    qty.did_mount(
        &EditorProps::new("qty")
            .required(true)
            .validate(Validator::min_length(1).with_message("{{label}} must be positive")),
    );
    qty.element().set_raw_value("0");

    let errors = qty.validate().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.errors()[0].resolve("Quantity"), "Quantity must be positive");

    let optional = TextInput::with_type("number");
    optional.did_mount(&EditorProps::new("qty").validate(Validator::max_length(10)));
    optional.element().set_raw_value("0");
    assert!(optional.validate().is_ok());
}

#[test]
fn test_every_failure_is_collected_in_order() {
    let input = mounted(
        EditorProps::new("pin")
            .required(true)
            .validate(Validator::min_length(4))
            .validate(Validator::regex("^[0-9]+$").unwrap())
            .validate(Validator::max_length(8)),
        "ab",
    );

    let errors = input.validate().unwrap_err();
    let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(
        messages,
        vec!["{{label}} must be at least 4 long", "{{label}} is invalid"]
    );
}

#[test]
fn test_required_message_override() {
    let input = mounted(
        EditorProps::new("email")
            .required(true)
            .required_message("Please enter {{label}}"),
        "",
    );

    let errors = input.validate().unwrap_err();
    assert_eq!(errors.errors()[0].resolve("your e-mail"), "Please enter your e-mail");
}

#[test]
fn test_required_checkbox_must_be_checked() {
    let terms = Checkbox::new();
    terms.did_mount(&EditorProps::new("terms").required(true));
    assert!(terms.validate().is_err());

    terms.element().set_checked(true);
    assert!(terms.validate().is_ok());
}

#[test]
fn test_match_against_element() {
    let other = NativeElement::input("text");
    other.set_raw_value("secret");

    let input = mounted(
        EditorProps::new("confirm").validate(Validator::matches(other.clone())),
        "secret",
    );
    assert!(input.validate().is_ok());

    other.set_raw_value("changed");
    assert!(input.validate().is_err());
}

#[test]
fn test_match_against_editor() {
    let password = TextInput::new();
    password.set_value("hunter2".into());
    let target: EditorRef = std::sync::Arc::new(password.clone());

    let confirm = mounted(
        EditorProps::new("confirm").validate(Validator::matches(target)),
        "hunter2",
    );
    assert!(confirm.validate().is_ok());

    password.set_value("hunter3".into());
    assert!(confirm.validate().is_err());
}

#[test]
fn test_match_by_name_outside_form_compares_against_null() {
    let confirm = mounted(
        EditorProps::new("confirm").validate(Validator::matches("password")),
        "x",
    );
    assert!(confirm.validate().is_err());
}

#[test]
fn test_custom_rule() {
    let input = mounted(
        EditorProps::new("handle").validate(Validator::custom(|v| {
            v.as_str().is_some_and(|s| s.starts_with('@'))
        })),
        "rustacean",
    );
    assert!(input.validate().is_err());

    input.element().set_raw_value("@rustacean");
    assert!(input.validate().is_ok());
}

#[test]
fn test_unmount_drops_rules() {
    let input = mounted(EditorProps::new("code").required(true), "");
    assert!(input.validate().is_err());

    input.will_unmount();
    assert!(input.validate().is_ok());
}
