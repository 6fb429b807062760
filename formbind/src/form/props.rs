//! Form configuration and the events forms emit.

use std::fmt;
use std::sync::Arc;

use super::Form;
use crate::editor::{FieldEvent, FieldEventKind, FieldHandler};
use crate::validation::FormValidationError;
use crate::value::Value;

/// Handler receiving the submitted value.
pub type SubmitHandler = Arc<dyn Fn(&SubmitEvent) + Send + Sync>;

/// Handler receiving validation outcomes.
pub type ValidateHandler = Arc<dyn Fn(&ValidationEvent) + Send + Sync>;

/// When editor events cause validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationTrigger {
    /// Validate the editor on change events.
    Change,
    /// Validate the editor on input events.
    Input,
    /// Only validate on explicit `validate()` calls and on submit.
    #[default]
    Manual,
}

impl ValidationTrigger {
    /// Whether an event of `kind` should validate its editor.
    pub fn fires_on(self, kind: FieldEventKind) -> bool {
        matches!(
            (self, kind),
            (ValidationTrigger::Change, FieldEventKind::Change)
                | (ValidationTrigger::Input, FieldEventKind::Input)
        )
    }
}

/// Emitted when a form is submitted.
#[derive(Debug, Clone)]
pub struct SubmitEvent {
    pub target: Form,
    /// Aggregate value snapshot at submit time.
    pub value: Value,
}

/// Emitted after every validation run.
#[derive(Debug, Clone)]
pub struct ValidationEvent {
    pub target: Form,
    /// `None` when everything validated.
    pub error: Option<FormValidationError>,
}

impl ValidationEvent {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-pass configuration of a form.
#[derive(Clone, Default)]
pub struct FormProps {
    pub name: Option<String>,
    pub on_submit: Option<SubmitHandler>,
    pub on_change: Option<FieldHandler>,
    pub on_input: Option<FieldHandler>,
    pub on_validate: Option<ValidateHandler>,
    /// Emit submit events even when validation fails.
    pub submit_on_invalid: bool,
    /// Aggregate value pushed into matching editors before they mount.
    pub value: Option<Value>,
    pub validation_trigger: ValidationTrigger,
}

impl FormProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn on_submit<F>(mut self, f: F) -> Self
    where
        F: Fn(&SubmitEvent) + Send + Sync + 'static,
    {
        self.on_submit = Some(Arc::new(f));
        self
    }

    pub fn on_change<F>(mut self, f: F) -> Self
    where
        F: Fn(&FieldEvent) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(f));
        self
    }

    pub fn on_input<F>(mut self, f: F) -> Self
    where
        F: Fn(&FieldEvent) + Send + Sync + 'static,
    {
        self.on_input = Some(Arc::new(f));
        self
    }

    pub fn on_validate<F>(mut self, f: F) -> Self
    where
        F: Fn(&ValidationEvent) + Send + Sync + 'static,
    {
        self.on_validate = Some(Arc::new(f));
        self
    }

    pub fn submit_on_invalid(mut self, on: bool) -> Self {
        self.submit_on_invalid = on;
        self
    }

    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn validation_trigger(mut self, trigger: ValidationTrigger) -> Self {
        self.validation_trigger = trigger;
        self
    }

    /// The listener for events of `kind`.
    pub(crate) fn field_handler(&self, kind: FieldEventKind) -> Option<FieldHandler> {
        match kind {
            FieldEventKind::Change => self.on_change.clone(),
            FieldEventKind::Input => self.on_input.clone(),
        }
    }
}

impl fmt::Debug for FormProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormProps")
            .field("name", &self.name)
            .field("submit_on_invalid", &self.submit_on_invalid)
            .field("value", &self.value)
            .field("validation_trigger", &self.validation_trigger)
            .finish_non_exhaustive()
    }
}
