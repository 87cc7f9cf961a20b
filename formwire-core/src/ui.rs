//! UI capability traits
//!
//! Generated code never names a concrete toolkit. A host's inputs, buttons,
//! string resources and, for the reflective variant, its bound view tree are
//! reached through these traits.

use std::rc::Rc;

use crate::validation::Validator;

/// A text input that can display an error.
pub trait TextInput {
    fn text(&self) -> String;

    /// `None` hides the error.
    fn set_error(&self, error: Option<&str>);

    /// Registers a listener called after every text change.
    fn on_text_changed(&self, listener: Box<dyn Fn()>);
}

/// Host members validators can bind to.
pub trait InputHandle {
    fn input_handle(&self) -> Rc<dyn TextInput>;
}

impl<T: TextInput + 'static> InputHandle for Rc<T> {
    fn input_handle(&self) -> Rc<dyn TextInput> {
        self.clone()
    }
}

impl InputHandle for Rc<dyn TextInput> {
    fn input_handle(&self) -> Rc<dyn TextInput> {
        Rc::clone(self)
    }
}

/// An element with a single click handler. Setting a handler replaces the
/// previous one.
pub trait Clickable {
    fn set_on_click(&self, handler: Box<dyn Fn()>);
}

impl<T: Clickable + ?Sized> Clickable for Rc<T> {
    fn set_on_click(&self, handler: Box<dyn Fn()>) {
        (**self).set_on_click(handler)
    }
}

/// Localized strings looked up by resource id.
pub trait StringResources {
    fn get_string(&self, id: i32) -> String;
}

/// A view in a bound tree that carries its own validators.
pub trait ValidationView {
    fn validators(&self) -> Vec<Rc<dyn Validator>>;
}

/// Role tag of an action element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionRole {
    Validate,
    Clear,
}

pub trait ActionView: Clickable {
    fn action_role(&self) -> Option<ActionRole>;
}

/// Enumerates the tagged descendants of a bound root view.
pub trait ViewTree {
    fn validation_views(&self) -> Vec<Rc<dyn ValidationView>>;
    fn action_views(&self) -> Vec<Rc<dyn ActionView>>;
}

/// A two-way data binding whose root view can be scanned.
pub trait DataBinding {
    fn has_pending_bindings(&self) -> bool;
    fn execute_pending_bindings(&self);
    fn root(&self) -> &dyn ViewTree;
}

/// Action elements picked from a view tree.
#[derive(Default)]
pub struct SelectedActions {
    pub validate: Option<Rc<dyn ActionView>>,
    pub clear: Option<Rc<dyn ActionView>>,
}

/// Picks the first element of each role, in order. The scan stops as soon
/// as both roles are found.
pub fn select_actions(buttons: &[Rc<dyn ActionView>]) -> SelectedActions {
    let mut selected = SelectedActions::default();

    for button in buttons {
        match button.action_role() {
            Some(ActionRole::Validate) if selected.validate.is_none() => {
                selected.validate = Some(Rc::clone(button));
            }
            Some(ActionRole::Clear) if selected.clear.is_none() => {
                selected.clear = Some(Rc::clone(button));
            }
            _ => {}
        }

        if selected.validate.is_some() && selected.clear.is_some() {
            break;
        }
    }

    selected
}
