//! Editor contract and shared editor state.
//!
//! An editor is a named value holder mounted somewhere inside a form. It
//! owns one [`Validation`] which is rebuilt from its [`EditorProps`] every
//! time it is mounted or updated, and cleared when it unmounts.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::warn;

use crate::form::{Form, WeakForm};
use crate::node::WidgetKind;
use crate::validation::{Validation, ValidationErrors, Validator};
use crate::value::Value;

/// Shared handle to a mounted editor.
pub type EditorRef = Arc<dyn Editor>;

/// Invoked with the instance on mount and with `None` on unmount.
pub type RefCallback = Arc<dyn Fn(Option<EditorRef>) + Send + Sync>;

/// Handler for editor change/input events.
pub type FieldHandler = Arc<dyn Fn(&FieldEvent) + Send + Sync>;

/// Unique identifier for a widget instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(usize);

impl WidgetId {
    pub(crate) fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__widget_{}", self.0)
    }
}

/// Which event an editor emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEventKind {
    /// The value was committed (blur, toggle, select).
    Change,
    /// The user typed.
    Input,
}

impl FieldEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldEventKind::Change => "change",
            FieldEventKind::Input => "input",
        }
    }
}

/// Event emitted by an editor when its value changes through user action.
#[derive(Clone)]
pub struct FieldEvent {
    pub target: EditorRef,
    pub value: Value,
    pub kind: FieldEventKind,
}

impl fmt::Debug for FieldEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldEvent")
            .field("target", &self.target.name())
            .field("value", &self.value)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Per-pass configuration of an editor.
#[derive(Clone, Default)]
pub struct EditorProps {
    pub name: Option<String>,
    pub required: bool,
    pub required_message: Option<String>,
    pub validate: Vec<Validator>,
    /// Initial (or controlled) value; written before the editor mounts.
    pub value: Option<Value>,
    pub on_change: Option<FieldHandler>,
    pub on_input: Option<FieldHandler>,
    pub ref_cb: Option<RefCallback>,
}

impl EditorProps {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn required_message(mut self, message: impl Into<String>) -> Self {
        self.required_message = Some(message.into());
        self
    }

    /// Add a validator. Validators run in the order they were added.
    pub fn validate(mut self, validator: Validator) -> Self {
        self.validate.push(validator);
        self
    }

    pub fn validators(mut self, validators: impl IntoIterator<Item = Validator>) -> Self {
        self.validate.extend(validators);
        self
    }

    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
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

    pub fn with_ref<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<EditorRef>) + Send + Sync + 'static,
    {
        self.ref_cb = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for EditorProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorProps")
            .field("name", &self.name)
            .field("required", &self.required)
            .field("validate", &self.validate)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct BaseInner {
    name: Option<String>,
    validation: Validation,
    on_change: Option<FieldHandler>,
    on_input: Option<FieldHandler>,
    form: Option<WeakForm>,
}

/// State every editor shares with the framework.
///
/// Concrete editors embed one and return it from [`Editor::base`]. Clones
/// refer to the same state.
#[derive(Clone)]
pub struct EditorBase {
    id: WidgetId,
    inner: Arc<RwLock<BaseInner>>,
}

impl EditorBase {
    pub fn new() -> Self {
        Self {
            id: WidgetId::new(),
            inner: Arc::new(RwLock::new(BaseInner::default())),
        }
    }

    /// Create a base whose name is already assigned.
    pub fn named(name: impl Into<String>) -> Self {
        let base = Self::new();
        base.write().name = Some(name.into());
        base
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The assigned name, or `""` before the first mount.
    pub fn name(&self) -> String {
        self.read().name.clone().unwrap_or_default()
    }

    /// The enclosing form, if mounted inside one that is still alive.
    pub fn form(&self) -> Option<Form> {
        self.read().form.as_ref().and_then(WeakForm::upgrade)
    }

    pub fn set_form(&self, form: Option<WeakForm>) {
        self.write().form = form;
    }

    /// Snapshot of the current validation rules.
    pub fn validation(&self) -> Validation {
        self.read().validation.clone()
    }

    /// Apply configuration on mount or update.
    ///
    /// Clears the validators, re-applies the required flag and re-adds every
    /// configured validator in order. Event handlers are replaced.
    pub fn configure(&self, props: &EditorProps) {
        let mut inner = self.write();

        if let Some(name) = &props.name {
            match inner.name.clone() {
                None => inner.name = Some(name.clone()),
                Some(current) if &current != name => {
                    warn!("[editor] {} cannot be renamed to {}, keeping {}", self.id, name, current);
                }
                Some(_) => {}
            }
        }

        inner
            .validation
            .clear_validators()
            .required(props.required, props.required_message.as_deref());
        for validator in &props.validate {
            inner.validation.add_validator(validator.clone());
        }

        inner.on_change = props.on_change.clone();
        inner.on_input = props.on_input.clone();
    }

    /// Drop all validation rules and handlers; called on unmount.
    pub fn reset(&self) {
        let mut inner = self.write();
        inner.validation.clear_validators().required(false, None);
        inner.on_change = None;
        inner.on_input = None;
        inner.form = None;
    }

    /// Deliver an event to the configured handler for its kind.
    pub fn emit(&self, event: &FieldEvent) {
        let handler = {
            let inner = self.read();
            match event.kind {
                FieldEventKind::Change => inner.on_change.clone(),
                FieldEventKind::Input => inner.on_input.clone(),
            }
        };
        if let Some(handler) = handler {
            handler(event);
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, BaseInner> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, BaseInner> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for EditorBase {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EditorBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorBase")
            .field("id", &self.id)
            .field("name", &self.name())
            .finish()
    }
}

/// Trait for form editors.
///
/// Implementors provide value storage; everything else has a default built
/// on [`EditorBase`].
///
/// # Example
///
/// ```
/// use formbind::{Editor, EditorBase, Value};
/// use std::sync::{Arc, RwLock};
///
/// #[derive(Clone, Default)]
/// struct Rating {
///     base: EditorBase,
///     stars: Arc<RwLock<Value>>,
/// }
///
/// impl Editor for Rating {
///     fn base(&self) -> &EditorBase {
///         &self.base
///     }
///
///     fn type_name(&self) -> &'static str {
///         "Rating"
///     }
///
///     fn value(&self) -> Value {
///         self.stars.read().unwrap().clone()
///     }
///
///     fn set_value(&self, value: Value) {
///         *self.stars.write().unwrap() = value;
///     }
/// }
/// ```
pub trait Editor: Send + Sync {
    /// Shared framework state.
    fn base(&self) -> &EditorBase;

    /// Component type name, used in diagnostics.
    fn type_name(&self) -> &'static str;

    /// Current value.
    fn value(&self) -> Value;

    /// Replace the value. Does not emit events.
    fn set_value(&self, value: Value);

    fn kind(&self) -> WidgetKind {
        WidgetKind::Editor
    }

    fn id(&self) -> WidgetId {
        self.base().id()
    }

    fn name(&self) -> String {
        self.base().name()
    }

    /// Run the editor's validation against its current value.
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.base().validation().validate(self)
    }

    /// Reset the value through [`Editor::set_value`].
    fn clear(&self) {
        self.set_value(Value::Null);
    }

    fn did_mount(&self, props: &EditorProps) {
        self.base().configure(props);
    }

    fn did_update(&self, props: &EditorProps) {
        self.base().configure(props);
    }

    fn will_unmount(&self) {
        self.base().reset();
    }
}
