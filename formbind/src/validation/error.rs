//! Validation and configuration error types

use super::validator::{LABEL_PLACEHOLDER, Validator};
use crate::editor::WidgetId;
use crate::form::{Form, WeakForm};

/// One failed validator on one editor.
///
/// Never raised alone: it is always part of a [`ValidationErrors`] or a
/// [`FormValidationError`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("{editor}: {message}")]
pub struct ValidationError {
    /// Name of the editor that failed.
    pub editor: String,
    /// Instance of the editor that failed. Names only identify an editor
    /// within one form.
    pub widget: Option<WidgetId>,
    /// Unresolved message template.
    pub message: String,
    /// The validator that failed.
    pub validator: Validator,
}

impl ValidationError {
    pub fn new(editor: impl Into<String>, validator: &Validator) -> Self {
        Self {
            editor: editor.into(),
            widget: None,
            message: validator.message().to_string(),
            validator: validator.clone(),
        }
    }

    pub fn with_widget(mut self, widget: Option<WidgetId>) -> Self {
        self.widget = widget;
        self
    }

    /// The message with `{{label}}` replaced by `label`.
    pub fn resolve(&self, label: &str) -> String {
        self.message.replace(LABEL_PLACEHOLDER, label)
    }
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// All failed validators of one editor. Never empty.
#[derive(Debug, Clone, thiserror::Error)]
#[error("validation failed: {}", join(.errors))]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// `Ok` when `errors` is empty, otherwise the aggregate.
    pub fn check(errors: Vec<ValidationError>) -> Result<(), Self> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self { errors })
        }
    }

    pub fn single(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }
}

impl From<FormValidationError> for ValidationErrors {
    fn from(err: FormValidationError) -> Self {
        Self { errors: err.errors }
    }
}

/// Failed validators across every editor of a form. Never empty.
#[derive(Debug, Clone, thiserror::Error)]
#[error("form '{form_name}' is invalid: {}", join(.errors))]
pub struct FormValidationError {
    /// Name of the form (empty when unnamed).
    pub form_name: String,
    owner: WeakForm,
    errors: Vec<ValidationError>,
}

impl FormValidationError {
    /// `None` when `errors` is empty.
    pub fn new(form: &Form, errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self {
                form_name: form.name(),
                owner: form.downgrade(),
                errors,
            })
        }
    }

    /// The form that raised this error, if it is still alive.
    pub fn form(&self) -> Option<Form> {
        self.owner.upgrade()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Errors attributed to the named editor.
    pub fn for_editor<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ValidationError> + 'a {
        self.errors.iter().filter(move |e| e.editor == name)
    }

    /// Errors raised by one editor instance.
    pub fn for_widget(&self, widget: WidgetId) -> impl Iterator<Item = &ValidationError> + '_ {
        self.errors.iter().filter(move |e| e.widget == Some(widget))
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }
}

/// A mistake in how editors are declared inside a form.
///
/// Raised while scanning the tree, before anything is bound.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("editor {widget} must have a name property")]
    MissingName { widget: String },

    #[error("editor {widget} must have an unique name. {name} already defined in form")]
    DuplicateName { widget: String, name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_label() {
        let err = ValidationError::new("email", &Validator::required());
        assert_eq!(err.resolve("E-mail"), "E-mail is required");
        assert_eq!(err.to_string(), "email: {{label}} is required");
    }

    #[test]
    fn test_check_empty_is_ok() {
        assert!(ValidationErrors::check(Vec::new()).is_ok());
        let err = ValidationErrors::check(vec![ValidationError::new("a", &Validator::email())])
            .unwrap_err();
        assert_eq!(err.len(), 1);
    }

    #[test]
    fn test_form_error_requires_errors() {
        let form = Form::new();
        assert!(FormValidationError::new(&form, Vec::new()).is_none());
        let err = FormValidationError::new(
            &form,
            vec![
                ValidationError::new("a", &Validator::email()),
                ValidationError::new("b", &Validator::required()),
            ],
        )
        .unwrap();
        assert_eq!(err.for_editor("b").count(), 1);
        assert!(err.to_string().contains("b: {{label}} is required"));
        assert!(err.form().unwrap().ptr_eq(&form));
    }

    #[test]
    fn test_errors_by_widget() {
        let a = WidgetId::new();
        let b = WidgetId::new();
        let err = FormValidationError::new(
            &Form::new(),
            vec![
                ValidationError::new("email", &Validator::email()).with_widget(Some(a)),
                ValidationError::new("email", &Validator::required()).with_widget(Some(b)),
            ],
        )
        .unwrap();
        assert_eq!(err.for_editor("email").count(), 2);
        assert_eq!(err.for_widget(a).count(), 1);
        assert_eq!(err.for_widget(b).count(), 1);
    }
}
