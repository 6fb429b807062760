//! Validatable trait for anything validators can inspect.

use crate::editor::{Editor, WidgetId};
use crate::form::Form;
use crate::value::Value;

/// Trait for values that validators can test.
///
/// Every [`Editor`] is validatable. The trait exists on its own so that
/// validators can be exercised against lightweight stand-ins.
pub trait Validatable {
    /// Extract the current value for validation.
    fn validation_value(&self) -> Value;

    /// The name errors are attributed to.
    fn field_name(&self) -> String;

    /// The widget errors are attributed to, when there is one.
    fn widget_id(&self) -> Option<WidgetId> {
        None
    }

    /// The form this value lives in, used by match validators to find
    /// sibling editors by name.
    fn form(&self) -> Option<Form> {
        None
    }
}

impl<E: Editor + ?Sized> Validatable for E {
    fn validation_value(&self) -> Value {
        self.value()
    }

    fn field_name(&self) -> String {
        self.name()
    }

    fn widget_id(&self) -> Option<WidgetId> {
        Some(self.id())
    }

    fn form(&self) -> Option<Form> {
        self.base().form()
    }
}
