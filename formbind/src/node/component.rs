use std::fmt;

use super::Node;
use crate::editor::{EditorProps, EditorRef};
use crate::form::{Form, FormProps};

/// The role a component plays for form discovery.
///
/// Every component node carries its kind explicitly; discovery matches on
/// it instead of inspecting the component's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// A named, validatable value holder.
    Editor,
    /// A form; owns the editors below it.
    Form,
    /// Any other component. May render editors inside.
    Plain,
}

/// What a component node is bound to.
#[derive(Clone, Default)]
pub enum Binding {
    /// No instance (layout/wrapper components).
    #[default]
    None,
    /// An editor instance and its configuration for this pass.
    Editor { editor: EditorRef, props: EditorProps },
    /// A form instance and its configuration for this pass.
    Form { form: Form, props: FormProps },
}

/// A component in the render tree.
#[derive(Clone)]
pub struct ComponentNode {
    pub kind: WidgetKind,
    /// Display name of the component type, used in diagnostics.
    pub type_name: &'static str,
    pub binding: Binding,
    pub children: Vec<Node>,
}

impl ComponentNode {
    /// The configured `name` of a bound editor.
    pub fn name(&self) -> Option<&str> {
        match &self.binding {
            Binding::Editor { props, .. } => props.name.as_deref(),
            Binding::Form { props, .. } => props.name.as_deref(),
            Binding::None => None,
        }
    }

    pub fn editor_props(&self) -> Option<&EditorProps> {
        match &self.binding {
            Binding::Editor { props, .. } => Some(props),
            _ => None,
        }
    }

    pub fn editor_props_mut(&mut self) -> Option<&mut EditorProps> {
        match &mut self.binding {
            Binding::Editor { props, .. } => Some(props),
            _ => None,
        }
    }
}

impl fmt::Debug for ComponentNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentNode")
            .field("kind", &self.kind)
            .field("type_name", &self.type_name)
            .field("name", &self.name())
            .field("children", &self.children)
            .finish()
    }
}
