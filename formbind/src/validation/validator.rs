//! Individual validation rules.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use email_address::EmailAddress;
use regex::Regex;

use super::Validatable;
use crate::editor::EditorRef;
use crate::native::NativeElement;
use crate::value::Value;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Placeholder that callers replace with the field's display label.
pub const LABEL_PLACEHOLDER: &str = "{{label}}";

/// Identity of a validator. Clones share it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValidatorId(u64);

impl ValidatorId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Type alias for custom rule predicates.
pub type Rule = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Where a match validator reads the value to compare against.
#[derive(Clone)]
pub enum MatchTarget {
    /// Another editor in the same form, looked up by name.
    ByName(String),
    /// A native element's coerced value.
    ByElement(NativeElement),
    /// Another editor, referenced directly.
    ByEditor(EditorRef),
}

impl MatchTarget {
    fn resolve<V: Validatable + ?Sized>(&self, subject: &V) -> Value {
        match self {
            MatchTarget::ByName(name) => subject
                .form()
                .and_then(|form| form.input(name))
                .map(|editor| editor.value())
                .unwrap_or_default(),
            MatchTarget::ByElement(el) => el.value(true),
            MatchTarget::ByEditor(editor) => editor.value(),
        }
    }
}

impl fmt::Debug for MatchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchTarget::ByName(name) => f.debug_tuple("ByName").field(name).finish(),
            MatchTarget::ByElement(el) => f.debug_tuple("ByElement").field(&el.id()).finish(),
            MatchTarget::ByEditor(editor) => f.debug_tuple("ByEditor").field(&editor.name()).finish(),
        }
    }
}

impl From<&str> for MatchTarget {
    fn from(name: &str) -> Self {
        MatchTarget::ByName(name.to_string())
    }
}

impl From<String> for MatchTarget {
    fn from(name: String) -> Self {
        MatchTarget::ByName(name)
    }
}

impl From<NativeElement> for MatchTarget {
    fn from(el: NativeElement) -> Self {
        MatchTarget::ByElement(el)
    }
}

impl From<EditorRef> for MatchTarget {
    fn from(editor: EditorRef) -> Self {
        MatchTarget::ByEditor(editor)
    }
}

/// The rule a validator applies.
#[derive(Clone)]
pub enum ValidatorKind {
    /// Value must be present (numbers, including 0, always are).
    Required,
    /// String rendering must match the pattern.
    Regex(Regex),
    /// String rendering must be an email address.
    Email,
    /// Strings need at least `n` characters, numbers must be `>= n`.
    MinLength(usize),
    /// Strings need at most `n` characters, numbers must be `<= n`.
    MaxLength(usize),
    /// Value must loosely equal the target's value.
    Match(MatchTarget),
    /// Arbitrary predicate.
    Custom(Rule),
}

impl fmt::Debug for ValidatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidatorKind::Required => f.write_str("Required"),
            ValidatorKind::Regex(re) => f.debug_tuple("Regex").field(&re.as_str()).finish(),
            ValidatorKind::Email => f.write_str("Email"),
            ValidatorKind::MinLength(n) => f.debug_tuple("MinLength").field(n).finish(),
            ValidatorKind::MaxLength(n) => f.debug_tuple("MaxLength").field(n).finish(),
            ValidatorKind::Match(target) => f.debug_tuple("Match").field(target).finish(),
            ValidatorKind::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// A single predicate over an editor's value, with a failure message.
///
/// Validators are immutable once built; reconfiguring an editor replaces
/// them wholesale.
///
/// # Example
///
/// ```
/// use formbind::validation::Validator;
///
/// let rules = vec![
///     Validator::email(),
///     Validator::max_length(64).with_message("{{label}} is too long"),
/// ];
/// assert_eq!(rules[1].message(), "{{label}} is too long");
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    id: ValidatorId,
    kind: ValidatorKind,
    message: String,
}

impl Validator {
    fn new(kind: ValidatorKind, message: impl Into<String>) -> Self {
        Self {
            id: ValidatorId::next(),
            kind,
            message: message.into(),
        }
    }

    pub fn required() -> Self {
        Self::new(ValidatorKind::Required, "{{label}} is required")
    }

    /// Compile a pattern validator.
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::from_regex(Regex::new(pattern)?))
    }

    pub fn from_regex(regex: Regex) -> Self {
        Self::new(ValidatorKind::Regex(regex), "{{label}} is invalid")
    }

    pub fn email() -> Self {
        Self::new(ValidatorKind::Email, "{{label}} is not a valid email")
    }

    pub fn min_length(n: usize) -> Self {
        Self::new(
            ValidatorKind::MinLength(n),
            format!("{LABEL_PLACEHOLDER} must be at least {n} long"),
        )
    }

    pub fn max_length(n: usize) -> Self {
        Self::new(
            ValidatorKind::MaxLength(n),
            format!("{LABEL_PLACEHOLDER} must be at most {n} long"),
        )
    }

    /// Require the value to equal another value (see [`MatchTarget`]).
    pub fn matches(target: impl Into<MatchTarget>) -> Self {
        Self::new(ValidatorKind::Match(target.into()), "{{label}} does not match")
    }

    /// Add a custom predicate.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::new(ValidatorKind::Custom(Arc::new(f)), "{{label}} is invalid")
    }

    /// Replace the message template.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn id(&self) -> ValidatorId {
        self.id
    }

    pub fn kind(&self) -> &ValidatorKind {
        &self.kind
    }

    /// The unresolved message template.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Test the subject's current value.
    pub fn test<V: Validatable + ?Sized>(&self, subject: &V) -> bool {
        let value = subject.validation_value();
        match &self.kind {
            ValidatorKind::Required => value.is_present(),
            ValidatorKind::Regex(re) => re.is_match(&value.to_string()),
            ValidatorKind::Email => EmailAddress::is_valid(&value.to_string()),
            ValidatorKind::MinLength(n) => match &value {
                Value::String(s) => s.chars().count() >= *n,
                Value::Int(_) | Value::Float(_) => value.as_f64().is_some_and(|v| v >= *n as f64),
                _ => false,
            },
            ValidatorKind::MaxLength(n) => match &value {
                Value::String(s) => s.chars().count() <= *n,
                Value::Int(_) | Value::Float(_) => value.as_f64().is_some_and(|v| v <= *n as f64),
                _ => false,
            },
            ValidatorKind::Match(target) => target.resolve(subject).loosely_equals(&value),
            ValidatorKind::Custom(rule) => rule(&value),
        }
    }
}
