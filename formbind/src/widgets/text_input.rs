use std::sync::Arc;

use crate::editor::{Editor, EditorBase, FieldEvent, FieldEventKind};
use crate::native::NativeElement;
use crate::value::Value;

/// A single-line text editor over an `<input>` element.
///
/// Plain text inputs yield strings. Inputs created with
/// [`TextInput::with_type`] for `number` or `date` yield coerced values.
///
/// # Example
///
/// ```
/// use formbind::widgets::TextInput;
/// use formbind::{Editor, Value};
///
/// let age = TextInput::with_type("number");
/// age.element().set_raw_value("42");
/// assert_eq!(age.value(), Value::Int(42));
/// ```
#[derive(Debug, Clone)]
pub struct TextInput {
    base: EditorBase,
    element: NativeElement,
    coerce: bool,
}

impl TextInput {
    /// Create an empty `type="text"` input
    pub fn new() -> Self {
        Self {
            base: EditorBase::new(),
            element: NativeElement::input("text"),
            coerce: false,
        }
    }

    /// Create an input of the given type. `number` and `date` coerce.
    pub fn with_type(input_type: &str) -> Self {
        Self {
            base: EditorBase::new(),
            element: NativeElement::input(input_type),
            coerce: matches!(input_type, "number" | "date"),
        }
    }

    /// The underlying element
    pub fn element(&self) -> &NativeElement {
        &self.element
    }

    /// Simulate typing: replace the text and emit an input event.
    pub fn input(&self, text: impl Into<String>) {
        self.element.set_raw_value(text);
        self.emit(FieldEventKind::Input);
    }

    /// Simulate committing a value: replace the text and emit a change event.
    pub fn change(&self, text: impl Into<String>) {
        self.element.set_raw_value(text);
        self.emit(FieldEventKind::Change);
    }

    fn emit(&self, kind: FieldEventKind) {
        self.base.emit(&FieldEvent {
            target: Arc::new(self.clone()),
            value: self.value(),
            kind,
        });
    }
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor for TextInput {
    fn base(&self) -> &EditorBase {
        &self.base
    }

    fn type_name(&self) -> &'static str {
        "TextInput"
    }

    fn value(&self) -> Value {
        self.element.value(self.coerce)
    }

    fn set_value(&self, value: Value) {
        self.element.set_value(&value);
    }
}
