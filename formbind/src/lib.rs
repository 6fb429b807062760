//! Form data binding and validation.
//!
//! A [`Form`] finds the named editors rendered inside it, keeps track of
//! which of them are mounted, aggregates their values into one map and
//! validates them, either on demand, on submit, or as the user edits.

pub mod discover;
pub mod editor;
pub mod form;
pub mod mount;
pub mod native;
pub mod node;
pub mod validation;
pub mod value;
pub mod widgets;

pub use editor::{
    Editor, EditorBase, EditorProps, EditorRef, FieldEvent, FieldEventKind, RefCallback, WidgetId,
};
pub use form::{Form, FormProps, SubmitEvent, ValidationEvent, ValidationTrigger, WeakForm};
pub use mount::{MountError, Mounter};
pub use node::{Node, WidgetKind};
pub use validation::{
    ConfigError, FormValidationError, MatchTarget, Validatable, Validation, ValidationError,
    ValidationErrors, Validator,
};
pub use value::Value;

pub mod prelude {
    pub use crate::editor::{Editor, EditorProps, EditorRef, FieldEvent, FieldEventKind};
    pub use crate::form::{Form, FormProps, SubmitEvent, ValidationEvent, ValidationTrigger};
    pub use crate::mount::{MountError, Mounter};
    pub use crate::node::{ClickEvent, Node};
    pub use crate::validation::{
        ConfigError, FormValidationError, MatchTarget, ValidationError, ValidationErrors, Validator,
    };
    pub use crate::value::Value;
    pub use crate::widgets::{Checkbox, TextInput};
}
