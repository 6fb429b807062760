//! Form orchestration.
//!
//! A [`Form`] discovers the editors in the tree it renders, binds their
//! refs and events, keeps the map of mounted editors, and aggregates their
//! values and validation errors.
//!
//! Each render pass runs scan → bind → hydrate:
//! - scan: find editor nodes and check their names are present and unique;
//! - bind: wrap each editor's ref so mounting attaches it to the form and
//!   unmounting detaches it, and route its change/input handlers through
//!   the form;
//! - hydrate: copy matching keys of the form's `value` into the editors'
//!   initial values.

mod inputs;
mod props;

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use log::{debug, warn};

pub use inputs::Inputs;
pub use props::{
    FormProps, SubmitEvent, SubmitHandler, ValidateHandler, ValidationEvent, ValidationTrigger,
};

use crate::discover::{find_submit_controls_mut, find_widgets_mut};
use crate::editor::{
    Editor, EditorBase, EditorRef, FieldEvent, FieldEventKind, FieldHandler, WidgetId,
};
use crate::node::{Binding, ClickEvent, ComponentNode, NativeNode, Node, WidgetKind};
use crate::validation::{ConfigError, FormValidationError, ValidationErrors};
use crate::value::Value;

#[derive(Default)]
struct FormState {
    props: FormProps,
    inputs: Inputs,
}

struct FormShared {
    base: EditorBase,
    state: RwLock<FormState>,
}

/// A form: the orchestrator for the editors rendered inside it.
///
/// `Form` is a cheap handle; clones refer to the same form. A form is also
/// an [`Editor`] whose value is the aggregate map of its editors.
#[derive(Clone)]
pub struct Form {
    inner: Arc<FormShared>,
}

/// Non-owning reference to a [`Form`], held by editors and bound callbacks.
#[derive(Clone)]
pub struct WeakForm {
    inner: Weak<FormShared>,
}

impl WeakForm {
    pub fn upgrade(&self) -> Option<Form> {
        self.inner.upgrade().map(|inner| Form { inner })
    }
}

impl fmt::Debug for WeakForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WeakForm")
    }
}

impl Form {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(FormShared {
                base: EditorBase::new(),
                state: RwLock::new(FormState::default()),
            }),
        }
    }

    pub fn downgrade(&self) -> WeakForm {
        WeakForm {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Whether both handles refer to the same form.
    pub fn ptr_eq(&self, other: &Form) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// The configured name, or `""`.
    pub fn name(&self) -> String {
        self.read().props.name.clone().unwrap_or_default()
    }

    /// Copy of the mounted editors.
    pub fn inputs(&self) -> Inputs {
        self.read().inputs.clone()
    }

    /// A mounted editor by name.
    pub fn input(&self, name: &str) -> Option<EditorRef> {
        self.read().inputs.get(name)
    }

    pub(crate) fn props(&self) -> FormProps {
        self.read().props.clone()
    }

    pub(crate) fn attach(&self, name: &str, editor: EditorRef) {
        self.write().inputs.attach(name, editor);
    }

    pub(crate) fn detach(&self, name: &str, id: WidgetId) {
        self.write().inputs.detach(name, id);
    }

    /// Aggregate value: a map of every mounted editor's value by name, or
    /// `Null` when nothing is mounted.
    pub fn value(&self) -> Value {
        let inputs = self.read().inputs.snapshot();
        if inputs.is_empty() {
            return Value::Null;
        }
        Value::Map(
            inputs
                .into_iter()
                .map(|(name, editor)| (name, editor.value()))
                .collect(),
        )
    }

    /// Push an aggregate value into the mounted editors.
    ///
    /// `Null` clears every editor. A map sets the editors whose names it
    /// contains and leaves the others untouched.
    pub fn set_value(&self, value: Value) {
        let inputs = self.read().inputs.snapshot();
        if inputs.is_empty() {
            return;
        }

        match &value {
            Value::Null => {
                for (_, editor) in &inputs {
                    editor.set_value(Value::Null);
                }
            }
            Value::Map(map) => {
                for (name, editor) in &inputs {
                    if let Some(v) = map.get(name) {
                        editor.set_value(v.clone());
                    }
                }
            }
            other => warn!(
                "[form] {} ignoring non-map value of type {}",
                self.name(),
                other.type_name()
            ),
        }
    }

    /// Validate every mounted editor.
    ///
    /// All editors are checked; their errors are flattened in registration
    /// order. The `on_validate` listener is notified either way.
    pub fn validate(&self) -> Result<(), FormValidationError> {
        let error = self.collect_errors();
        self.notify_validation(error.clone());
        match error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Whether [`Form::validate`] would succeed. Does not notify listeners.
    pub fn is_valid(&self) -> bool {
        self.collect_errors().is_none()
    }

    /// Validate and, unless invalid without `submit_on_invalid`, emit the
    /// submit event. Returns whether the event was emitted.
    pub fn submit(&self) -> bool {
        let valid = self.validate().is_ok();
        let props = self.props();

        if !valid && !props.submit_on_invalid {
            debug!("[form] {} submit aborted: invalid", self.name());
            return false;
        }

        if let Some(on_submit) = props.on_submit {
            on_submit(&SubmitEvent {
                target: self.clone(),
                value: self.value(),
            });
        }
        true
    }

    /// Run one render pass over the form's children.
    ///
    /// Returns the children with editor refs, event handlers, initial
    /// values and submit controls bound to this form. A missing or
    /// duplicate editor name fails the pass before anything is bound, and
    /// the form keeps the props of its last successful pass.
    pub fn render(&self, props: FormProps, mut children: Vec<Node>) -> Result<Vec<Node>, ConfigError> {
        let initial = props.value.clone();

        let mut editors = find_widgets_mut(&mut children, WidgetKind::Editor);
        check_names(&editors)?;
        self.write().props = props;

        for node in editors.iter_mut() {
            self.bind_editor(node);
        }

        if let Some(value) = &initial {
            hydrate(&mut editors, value);
        }
        let editor_count = editors.len();

        let submits = find_submit_controls_mut(&mut children);
        let submit_count = submits.len();
        for control in submits {
            self.bind_submit(control);
        }

        debug!(
            "[form] {} rendered: {} editors, {} submit controls, hydrated={}",
            self.name(),
            editor_count,
            submit_count,
            initial.is_some()
        );

        Ok(children)
    }

    fn bind_editor(&self, node: &mut Node) {
        let Some(component) = node.as_component_mut() else {
            return;
        };
        let Binding::Editor { editor, props } = &mut component.binding else {
            return;
        };

        let name = props.name.clone().unwrap_or_default();
        let id = editor.id();
        let form = self.downgrade();
        let outer_ref = props.ref_cb.take();

        props.ref_cb = Some(Arc::new(move |instance: Option<EditorRef>| {
            if let Some(form) = form.upgrade() {
                match &instance {
                    Some(editor) => form.attach(&name, editor.clone()),
                    None => form.detach(&name, id),
                }
            }
            if let Some(outer) = &outer_ref {
                outer(instance);
            }
        }));

        props.on_change = Some(self.intercept(FieldEventKind::Change, props.on_change.take()));
        props.on_input = Some(self.intercept(FieldEventKind::Input, props.on_input.take()));
    }

    fn bind_submit(&self, control: &mut NativeNode) {
        let form = self.downgrade();
        let previous = control.on_click.take();

        control.on_click = Some(Arc::new(move |event: &ClickEvent| {
            if let Some(previous) = &previous {
                previous(event);
            }
            event.prevent_default();
            if let Some(form) = form.upgrade() {
                form.submit();
            }
        }));
    }

    fn intercept(&self, kind: FieldEventKind, previous: Option<FieldHandler>) -> FieldHandler {
        let form = self.downgrade();
        Arc::new(move |event: &FieldEvent| match form.upgrade() {
            Some(form) => form.on_field_event(kind, event, previous.as_ref()),
            None => {
                if let Some(previous) = &previous {
                    previous(event);
                }
            }
        })
    }

    /// Runs the editor's own handler, then the form's listener, then
    /// validates the editor if the trigger policy asks for it.
    fn on_field_event(&self, kind: FieldEventKind, event: &FieldEvent, previous: Option<&FieldHandler>) {
        if let Some(previous) = previous {
            previous(event);
        }

        let props = self.props();
        if let Some(listener) = props.field_handler(kind) {
            listener(event);
        }

        if !props.validation_trigger.fires_on(kind) {
            return;
        }

        debug!(
            "[form] {} event on {} triggers validation",
            kind.as_str(),
            event.target.name()
        );
        let error = event
            .target
            .validate()
            .err()
            .and_then(|err| FormValidationError::new(self, err.into_errors()));
        self.notify_validation(error);
    }

    fn collect_errors(&self) -> Option<FormValidationError> {
        let inputs = self.read().inputs.snapshot();
        let mut errors = Vec::new();
        for (_, editor) in inputs {
            if let Err(err) = editor.validate() {
                errors.extend(err.into_errors());
            }
        }
        FormValidationError::new(self, errors)
    }

    fn notify_validation(&self, error: Option<FormValidationError>) {
        if let Some(on_validate) = self.props().on_validate {
            on_validate(&ValidationEvent {
                target: self.clone(),
                error,
            });
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, FormState> {
        self.inner
            .state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, FormState> {
        self.inner
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("name", &self.name())
            .field("inputs", &self.read().inputs)
            .finish()
    }
}

impl Editor for Form {
    fn base(&self) -> &EditorBase {
        &self.inner.base
    }

    fn type_name(&self) -> &'static str {
        "Form"
    }

    fn value(&self) -> Value {
        Form::value(self)
    }

    fn set_value(&self, value: Value) {
        Form::set_value(self, value);
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Form
    }

    fn name(&self) -> String {
        Form::name(self)
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        Form::validate(self).map_err(ValidationErrors::from)
    }
}

fn check_names(editors: &[&mut Node]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for node in editors {
        let Some(component) = node.as_component() else {
            continue;
        };
        let widget = component.type_name.to_string();
        match component.name() {
            None | Some("") => return Err(ConfigError::MissingName { widget }),
            Some(name) => {
                if !seen.insert(name) {
                    return Err(ConfigError::DuplicateName {
                        widget,
                        name: name.to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}

fn hydrate(editors: &mut [&mut Node], value: &Value) {
    let Some(map) = value.as_map() else {
        warn!("[form] initial value of type {} is not a map", value.type_name());
        return;
    };

    for node in editors.iter_mut() {
        let Some(props) = node
            .as_component_mut()
            .and_then(ComponentNode::editor_props_mut)
        else {
            continue;
        };
        if let Some(v) = props.name.as_deref().and_then(|name| map.get(name)) {
            props.value = Some(v.clone());
        }
    }
}
