//! Native element handles and value coercion.
//!
//! A [`NativeElement`] stands in for the platform element behind an editor
//! (a text box, a select, a checkbox). Reference editors read and write
//! their value through it, and match validators can compare against one
//! directly.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use chrono::NaiveDate;

use crate::value::Value;

/// Unique identifier for a native element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

impl ElementId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__element_{}", self.0)
    }
}

/// An option of a select element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Default)]
struct ElementInner {
    tag: String,
    input_type: String,
    value: String,
    checked: bool,
    options: Vec<SelectOption>,
    selected: Option<usize>,
    text_content: String,
}

/// Shared handle onto a native element.
///
/// Clones refer to the same element.
#[derive(Debug, Clone)]
pub struct NativeElement {
    id: ElementId,
    inner: Arc<RwLock<ElementInner>>,
}

impl NativeElement {
    /// Create an element with the given tag name (`input`, `select`, `div`, ...).
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            id: ElementId::new(),
            inner: Arc::new(RwLock::new(ElementInner {
                tag: tag.into().to_lowercase(),
                ..Default::default()
            })),
        }
    }

    /// An `<input type="...">` element.
    pub fn input(input_type: impl Into<String>) -> Self {
        let el = Self::new("input");
        el.write(|inner| inner.input_type = input_type.into().to_lowercase());
        el
    }

    /// A `<select>` element with the given options and nothing selected.
    pub fn select(options: Vec<SelectOption>) -> Self {
        let el = Self::new("select");
        el.write(|inner| inner.options = options);
        el
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn tag(&self) -> String {
        self.read(|inner| inner.tag.clone())
    }

    pub fn input_type(&self) -> String {
        self.read(|inner| inner.input_type.clone())
    }

    /// Raw string value as the element would report it.
    pub fn raw_value(&self) -> String {
        self.read(|inner| inner.value.clone())
    }

    pub fn set_raw_value(&self, value: impl Into<String>) {
        let value = value.into();
        self.write(|inner| {
            if inner.tag == "select" {
                inner.selected = inner.options.iter().position(|o| o.value == value);
            }
            inner.value = value;
        });
    }

    pub fn checked(&self) -> bool {
        self.read(|inner| inner.checked)
    }

    pub fn set_checked(&self, checked: bool) {
        self.write(|inner| inner.checked = checked);
    }

    /// Select an option by index. Out of range clears the selection.
    pub fn select_index(&self, index: usize) {
        self.write(|inner| match inner.options.get(index) {
            Some(option) => {
                inner.value = option.value.clone();
                inner.selected = Some(index);
            }
            None => {
                inner.value.clear();
                inner.selected = None;
            }
        });
    }

    pub fn set_text_content(&self, text: impl Into<String>) {
        let text = text.into();
        self.write(|inner| inner.text_content = text);
    }

    /// Read the element's value.
    ///
    /// Checkboxes always yield a boolean. With `coerce`, number and date
    /// inputs are parsed and selects yield a [`Value::Choice`]; without it
    /// they yield the raw string.
    pub fn value(&self, coerce: bool) -> Value {
        self.read(|inner| {
            if inner.input_type == "checkbox" {
                return Value::Bool(inner.checked);
            }

            if inner.tag == "select" {
                if !coerce {
                    return Value::String(inner.value.clone());
                }
                return match inner.selected.and_then(|i| inner.options.get(i)) {
                    Some(option) => Value::Choice {
                        value: option.value.clone(),
                        text: option.text.clone(),
                    },
                    None => Value::Null,
                };
            }

            if inner.tag == "input" || inner.tag == "textarea" {
                return match inner.input_type.as_str() {
                    "number" if coerce => parse_number(&inner.value),
                    "date" if coerce => NaiveDate::parse_from_str(inner.value.trim(), "%Y-%m-%d")
                        .map(Value::Date)
                        .unwrap_or(Value::Null),
                    _ => Value::String(inner.value.clone()),
                };
            }

            Value::String(inner.text_content.clone())
        })
    }

    /// Write a value into the element.
    ///
    /// `Null` is written as the empty string. A radio button checks itself
    /// when the value matches its own; a checkbox takes the value's
    /// presence. Other elements are only touched when the rendering differs.
    pub fn set_value(&self, value: &Value) {
        let text = value.to_string();
        let current = self.value(false).to_string();

        self.write(|inner| match inner.input_type.as_str() {
            "radio" => {
                if text == inner.value {
                    inner.checked = true;
                }
            }
            "checkbox" => inner.checked = value.is_present(),
            _ if text != current => {
                if inner.tag == "input" || inner.tag == "textarea" || inner.tag == "select" {
                    if inner.tag == "select" {
                        inner.selected = inner.options.iter().position(|o| o.value == text);
                    }
                    inner.value = text;
                } else {
                    inner.text_content = text;
                }
            }
            _ => {}
        });
    }

    fn read<R>(&self, f: impl FnOnce(&ElementInner) -> R) -> R {
        let guard = self
            .inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&guard)
    }

    fn write(&self, f: impl FnOnce(&mut ElementInner)) {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard);
    }
}

fn parse_number(raw: &str) -> Value {
    let raw = raw.trim();
    if let Ok(i) = raw.parse::<i64>() {
        Value::Int(i)
    } else if let Ok(f) = raw.parse::<f64>() {
        Value::Float(f)
    } else {
        Value::Null
    }
}
