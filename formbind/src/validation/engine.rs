//! Per-editor validator set.

use log::trace;

use super::error::{ValidationError, ValidationErrors};
use super::validator::{Validator, ValidatorId};
use super::Validatable;

/// The ordered validators attached to one editor, plus an optional
/// required rule.
///
/// The required rule is kept apart from the others because it runs first
/// and short-circuits: a missing value is reported once, never also as
/// "too short". Editors rebuild their `Validation` from scratch whenever
/// their configuration is applied.
#[derive(Debug, Clone, Default)]
pub struct Validation {
    validators: Vec<Validator>,
    required: Option<Validator>,
}

impl Validation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validator. Evaluation follows insertion order.
    pub fn add_validator(&mut self, validator: Validator) -> &mut Self {
        self.validators.push(validator);
        self
    }

    /// Remove a validator by identity.
    pub fn remove_validator(&mut self, id: ValidatorId) -> &mut Self {
        if let Some(i) = self.validators.iter().position(|v| v.id() == id) {
            self.validators.remove(i);
        }
        self
    }

    /// Remove all validators added with [`Validation::add_validator`].
    pub fn clear_validators(&mut self) -> &mut Self {
        self.validators.clear();
        self
    }

    /// Turn the required rule on or off. `message` overrides the default.
    pub fn required(&mut self, on: bool, message: Option<&str>) -> &mut Self {
        self.required = on.then(|| match message {
            Some(msg) => Validator::required().with_message(msg),
            None => Validator::required(),
        });
        self
    }

    pub fn is_required(&self) -> bool {
        self.required.is_some()
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    /// Run the rules against the subject's current value.
    ///
    /// - A failing required rule yields exactly one error and nothing else runs.
    /// - Without a required rule, an empty value (`0` is not empty) passes.
    /// - Otherwise every validator runs and every failure is collected.
    pub fn validate<V: Validatable + ?Sized>(&self, subject: &V) -> Result<(), ValidationErrors> {
        let name = subject.field_name();
        let widget = subject.widget_id();

        if let Some(required) = &self.required {
            if !required.test(subject) {
                trace!("[validation] {} failed required", name);
                return Err(ValidationErrors::single(
                    ValidationError::new(name, required).with_widget(widget),
                ));
            }
        } else if subject.validation_value().is_empty() {
            return Ok(());
        }

        let errors: Vec<ValidationError> = self
            .validators
            .iter()
            .filter(|v| !v.test(subject))
            .map(|v| ValidationError::new(name.clone(), v).with_widget(widget))
            .collect();

        trace!("[validation] {} failed {} of {} rules", name, errors.len(), self.validators.len());
        ValidationErrors::check(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    struct Field(Value);

    impl Validatable for Field {
        fn validation_value(&self) -> Value {
            self.0.clone()
        }

        fn field_name(&self) -> String {
            "field".into()
        }
    }

    fn validation(required: bool) -> Validation {
        let mut v = Validation::new();
        v.required(required, None)
            .add_validator(Validator::min_length(5))
            .add_validator(Validator::email());
        v
    }

    #[test]
    fn test_required_short_circuits() {
        let err = validation(true).validate(&Field(Value::from(""))).unwrap_err();
        assert_eq!(err.len(), 1);
        assert!(matches!(
            err.errors()[0].validator.kind(),
            crate::validation::ValidatorKind::Required
        ));
    }

    #[test]
    fn test_optional_empty_is_valid() {
        assert!(validation(false).validate(&Field(Value::Null)).is_ok());
        assert!(validation(false).validate(&Field(Value::from(""))).is_ok());
        assert!(validation(false).validate(&Field(Value::Bool(false))).is_ok());
    }

    #[test]
    fn test_zero_is_not_missing() {
        let mut v = Validation::new();
        v.required(true, None);
        assert!(v.validate(&Field(Value::Int(0))).is_ok());
    }

    #[test]
    fn test_optional_zero_still_runs_validators() {
        let mut v = Validation::new();
        v.add_validator(Validator::min_length(1));
        assert!(v.validate(&Field(Value::Int(0))).is_err());
    }

    #[test]
    fn test_collects_all_failures_in_order() {
        let err = validation(true).validate(&Field(Value::from("abc"))).unwrap_err();
        let kinds: Vec<_> = err.iter().map(|e| format!("{:?}", e.validator.kind())).collect();
        assert_eq!(kinds, vec!["MinLength(5)", "Email"]);
    }

    #[test]
    fn test_required_message_override() {
        let mut v = Validation::new();
        v.required(true, Some("fill it in"));
        let err = v.validate(&Field(Value::Null)).unwrap_err();
        assert_eq!(err.errors()[0].message, "fill it in");
    }

    #[test]
    fn test_remove_and_clear() {
        let email = Validator::email();
        let mut v = Validation::new();
        v.add_validator(Validator::min_length(2)).add_validator(email.clone());
        v.remove_validator(email.id());
        assert_eq!(v.validators().len(), 1);
        v.clear_validators();
        assert!(v.validators().is_empty());
        assert!(v.validate(&Field(Value::from("x"))).is_ok());
    }
}
