//! Validation system for form editors.
//!
//! Each editor owns a [`Validation`]: an ordered list of [`Validator`]s plus
//! an optional required rule. Running it produces either success or a
//! [`ValidationErrors`] carrying every failed rule. Forms flatten the
//! per-editor errors into one [`FormValidationError`].
//!
//! # Example
//!
//! ```
//! use formbind::validation::{Validation, Validator};
//! use formbind::widgets::TextInput;
//! use formbind::Editor;
//!
//! let email = TextInput::new();
//! email.set_value("not-an-email".into());
//!
//! let mut validation = Validation::new();
//! validation.required(true, None).add_validator(Validator::email());
//!
//! let errors = validation.validate(&email).unwrap_err();
//! assert_eq!(errors.len(), 1);
//! ```

mod engine;
mod error;
mod validatable;
mod validator;

pub use engine::Validation;
pub use error::{ConfigError, FormValidationError, ValidationError, ValidationErrors};
pub use validatable::Validatable;
pub use validator::{LABEL_PLACEHOLDER, MatchTarget, Rule, Validator, ValidatorId, ValidatorKind};
