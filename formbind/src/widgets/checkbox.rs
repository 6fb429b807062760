use std::sync::Arc;

use crate::editor::{Editor, EditorBase, FieldEvent, FieldEventKind};
use crate::native::NativeElement;
use crate::value::Value;

/// A boolean editor over an `<input type="checkbox">` element.
#[derive(Debug, Clone)]
pub struct Checkbox {
    base: EditorBase,
    element: NativeElement,
}

impl Checkbox {
    pub fn new() -> Self {
        Self {
            base: EditorBase::new(),
            element: NativeElement::input("checkbox"),
        }
    }

    pub fn element(&self) -> &NativeElement {
        &self.element
    }

    pub fn is_checked(&self) -> bool {
        self.element.checked()
    }

    /// Simulate a click: flip the state and emit a change event.
    pub fn toggle(&self) {
        self.element.set_checked(!self.element.checked());
        self.base.emit(&FieldEvent {
            target: Arc::new(self.clone()),
            value: self.value(),
            kind: FieldEventKind::Change,
        });
    }
}

impl Default for Checkbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor for Checkbox {
    fn base(&self) -> &EditorBase {
        &self.base
    }

    fn type_name(&self) -> &'static str {
        "Checkbox"
    }

    fn value(&self) -> Value {
        self.element.value(true)
    }

    fn set_value(&self, value: Value) {
        self.element.set_value(&value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::EditorProps;

    #[test]
    fn test_required_checkbox() {
        let terms = Checkbox::new();
        terms.did_mount(&EditorProps::new("terms").required(true));
        assert!(terms.validate().is_err());

        terms.toggle();
        assert!(terms.is_checked());
        assert!(terms.validate().is_ok());
    }
}
