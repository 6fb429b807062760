use std::fs::File;

use formbind::prelude::*;
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

fn ui(form: &Form, email: &TextInput, confirm: &TextInput, age: &TextInput, terms: &Checkbox) -> Vec<Node> {
    let props = FormProps::new()
        .name("signup")
        .validation_trigger(ValidationTrigger::Change)
        .on_validate(|e| match &e.error {
            None => println!("  form is valid"),
            Some(err) => {
                for error in err.iter() {
                    println!("  {}: {}", error.editor, error.resolve(&error.editor));
                }
            }
        })
        .on_submit(|e| println!("submitted: {}", e.value));

    vec![Node::form(form, props).children([
        Node::el("h1").child(Node::text("Create an account")),
        Node::wrapper("Field").child(Node::editor(
            email,
            EditorProps::new("email").required(true).validate(Validator::email()),
        )),
        Node::wrapper("Field").child(Node::editor(
            confirm,
            EditorProps::new("confirmEmail")
                .required(true)
                .validate(Validator::matches("email")),
        )),
        Node::wrapper("Field").child(Node::editor(
            age,
            EditorProps::new("age").validate(Validator::min_length(18).with_message("{{label}} must be 18 or older")),
        )),
        Node::editor(terms, EditorProps::new("terms").required(true)),
        Node::el("div").child(Node::submit("Sign up").id("submit")),
    ])]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up file logging
    let log_file = File::create("signup.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let form = Form::new();
    let email = TextInput::new();
    let confirm = TextInput::new();
    let age = TextInput::with_type("number");
    let terms = Checkbox::new();

    let mut mounter = Mounter::new();
    mounter.render(ui(&form, &email, &confirm, &age, &terms))?;
    info!("mounted {} editors", form.inputs().len());

    println!("typing a mismatched confirmation:");
    email.change("ada@example.com");
    confirm.change("ada@example.org");

    println!("submitting:");
    mounter.click("submit");

    println!("fixing the form:");
    confirm.change("ada@example.com");
    age.change("36");
    terms.toggle();

    println!("submitting again:");
    mounter.click("submit");

    Ok(())
}
