//! Headless mounting of render trees.
//!
//! [`Mounter`] plays the part of the UI reconciler for forms: it mounts,
//! updates and unmounts bound editor instances, invokes their ref
//! callbacks, tells each editor which form it lives in, and routes clicks
//! to native elements. It keeps no layout or rendering state.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use log::{debug, trace};

use crate::editor::{Editor, EditorRef, RefCallback, WidgetId};
use crate::form::WeakForm;
use crate::node::{Binding, ClickEvent, Node, find_native};
use crate::validation::ConfigError;

/// Errors raised while mounting a tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MountError {
    /// A form rejected its editor declarations.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The same editor instance appears twice in one tree.
    #[error("editor instance {id} is bound more than once")]
    DuplicateInstance { id: WidgetId },
}

struct Mounted {
    editor: EditorRef,
    ref_cb: Option<RefCallback>,
}

/// Mounts successive render passes of a tree.
///
/// # Example
///
/// ```
/// use formbind::prelude::*;
///
/// let form = Form::new();
/// let email = TextInput::new();
///
/// let mut mounter = Mounter::new();
/// mounter
///     .render(vec![Node::form(&form, FormProps::new()).child(
///         Node::editor(&email, EditorProps::new("email").value("a@b.com")),
///     )])
///     .unwrap();
///
/// assert_eq!(form.value().get("email"), Some(&Value::from("a@b.com")));
/// ```
#[derive(Default)]
pub struct Mounter {
    mounted: HashMap<WidgetId, Mounted>,
    tree: Vec<Node>,
}

impl Mounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a new pass of the tree.
    ///
    /// Editors missing from the new pass are unmounted first, so their
    /// forms never read them again. Then the tree is walked in document
    /// order: forms bind their children, new editors receive their initial
    /// value, mount, and have their ref attached; existing editors update.
    pub fn render(&mut self, nodes: Vec<Node>) -> Result<(), MountError> {
        let mut next = HashSet::new();
        collect_instances(&nodes, &mut next)?;

        let gone: Vec<WidgetId> = self
            .mounted
            .keys()
            .filter(|id| !next.contains(*id))
            .copied()
            .collect();
        for id in gone {
            if let Some(mounted) = self.mounted.remove(&id) {
                unmount(mounted);
            }
        }

        let tree = self.process(nodes, None)?;
        self.tree = tree;
        Ok(())
    }

    /// Unmount everything.
    pub fn unmount_all(&mut self) {
        for (_, mounted) in self.mounted.drain() {
            unmount(mounted);
        }
        self.tree.clear();
    }

    /// The last mounted tree, with all form bindings applied.
    pub fn tree(&self) -> &[Node] {
        &self.tree
    }

    pub fn is_mounted(&self, id: WidgetId) -> bool {
        self.mounted.contains_key(&id)
    }

    /// Click the native element with the given ID.
    ///
    /// Returns the event after dispatch, or `None` if no such element has a
    /// click handler.
    pub fn click(&self, id: &str) -> Option<ClickEvent> {
        let handler = find_native(&self.tree, id)?.on_click.clone()?;
        let event = ClickEvent::new();
        handler(&event);
        Some(event)
    }

    fn process(&mut self, nodes: Vec<Node>, form: Option<WeakForm>) -> Result<Vec<Node>, MountError> {
        let mut out = Vec::with_capacity(nodes.len());
        for node in nodes {
            out.push(self.process_node(node, form.clone())?);
        }
        Ok(out)
    }

    fn process_node(&mut self, node: Node, form: Option<WeakForm>) -> Result<Node, MountError> {
        match node {
            Node::Empty | Node::Text(_) => Ok(node),
            Node::Native(mut native) => {
                native.children = self.process(std::mem::take(&mut native.children), form)?;
                Ok(Node::Native(native))
            }
            Node::Component(mut component) => {
                let children = std::mem::take(&mut component.children);
                component.children = match &component.binding {
                    Binding::Form {
                        form: inner,
                        props,
                    } => {
                        inner.base().set_form(form);
                        let children = inner.render(props.clone(), children)?;
                        self.process(children, Some(inner.downgrade()))?
                    }
                    Binding::Editor { editor, props } => {
                        editor.base().set_form(form.clone());
                        if let Some(value) = &props.value {
                            editor.set_value(value.clone());
                        }

                        let id = editor.id();
                        if self.mounted.contains_key(&id) {
                            trace!("[mount] update {} ({})", editor.name(), id);
                            editor.did_update(props);
                        } else {
                            debug!("[mount] mount {} ({})", props.name.as_deref().unwrap_or(""), id);
                            editor.did_mount(props);
                        }

                        // A replaced ref sees the instance leave before the new one sees it arrive.
                        if let Some(previous) = self.mounted.get(&id).and_then(|m| m.ref_cb.clone()) {
                            let same = props
                                .ref_cb
                                .as_ref()
                                .is_some_and(|current| Arc::ptr_eq(current, &previous));
                            if !same {
                                previous(None);
                            }
                        }
                        if let Some(ref_cb) = &props.ref_cb {
                            ref_cb(Some(editor.clone()));
                        }
                        self.mounted.insert(
                            id,
                            Mounted {
                                editor: editor.clone(),
                                ref_cb: props.ref_cb.clone(),
                            },
                        );

                        self.process(children, form)?
                    }
                    Binding::None => self.process(children, form)?,
                };
                Ok(Node::Component(component))
            }
        }
    }
}

impl Drop for Mounter {
    fn drop(&mut self) {
        self.unmount_all();
    }
}

fn unmount(mounted: Mounted) {
    debug!("[mount] unmount {} ({})", mounted.editor.name(), mounted.editor.id());
    mounted.editor.will_unmount();
    if let Some(ref_cb) = mounted.ref_cb {
        ref_cb(None);
    }
}

fn collect_instances(nodes: &[Node], ids: &mut HashSet<WidgetId>) -> Result<(), MountError> {
    for node in nodes {
        if let Some(component) = node.as_component() {
            if let Binding::Editor { editor, .. } = &component.binding {
                let id = editor.id();
                if !ids.insert(id) {
                    return Err(MountError::DuplicateInstance { id });
                }
            }
        }
        collect_instances(node.child_nodes(), ids)?;
    }
    Ok(())
}
