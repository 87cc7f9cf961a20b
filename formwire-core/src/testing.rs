//! Fake widgets for exercising generated wiring without a UI toolkit

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::ui::{
    ActionRole, ActionView, Clickable, DataBinding, TextInput, ValidationView, ViewTree,
};
use crate::validation::Validator;

/// In-memory text input recording the error it displays.
#[derive(Default)]
pub struct FakeInput {
    text: RefCell<String>,
    error: RefCell<Option<String>>,
    listeners: RefCell<Vec<Rc<dyn Fn()>>>,
}

impl FakeInput {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn with_text(text: &str) -> Rc<Self> {
        let input = Self::default();
        *input.text.borrow_mut() = text.to_string();
        Rc::new(input)
    }

    /// Replaces the text and notifies change listeners.
    pub fn type_text(&self, text: &str) {
        *self.text.borrow_mut() = text.to_string();
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener();
        }
    }

    pub fn error(&self) -> Option<String> {
        self.error.borrow().clone()
    }
}

impl TextInput for FakeInput {
    fn text(&self) -> String {
        self.text.borrow().clone()
    }

    fn set_error(&self, error: Option<&str>) {
        *self.error.borrow_mut() = error.map(str::to_string);
    }

    fn on_text_changed(&self, listener: Box<dyn Fn()>) {
        self.listeners.borrow_mut().push(Rc::from(listener));
    }
}

/// Button that runs its click handler on [`FakeButton::click`].
#[derive(Default)]
pub struct FakeButton {
    role: Option<ActionRole>,
    handler: RefCell<Option<Rc<dyn Fn()>>>,
    role_queries: Cell<usize>,
}

impl FakeButton {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn with_role(role: ActionRole) -> Rc<Self> {
        Rc::new(Self { role: Some(role), ..Self::default() })
    }

    /// Runs the handler, if any. Returns whether one was installed.
    pub fn click(&self) -> bool {
        let handler = self.handler.borrow().clone();
        match handler {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    pub fn has_handler(&self) -> bool {
        self.handler.borrow().is_some()
    }

    /// Number of times the role tag was read.
    pub fn role_queries(&self) -> usize {
        self.role_queries.get()
    }
}

impl Clickable for FakeButton {
    fn set_on_click(&self, handler: Box<dyn Fn()>) {
        *self.handler.borrow_mut() = Some(Rc::from(handler));
    }
}

impl ActionView for FakeButton {
    fn action_role(&self) -> Option<ActionRole> {
        self.role_queries.set(self.role_queries.get() + 1);
        self.role
    }
}

/// View carrying a fixed list of validators.
pub struct FakeValidationView {
    validators: Vec<Rc<dyn Validator>>,
}

impl FakeValidationView {
    pub fn new(validators: Vec<Rc<dyn Validator>>) -> Rc<Self> {
        Rc::new(Self { validators })
    }
}

impl ValidationView for FakeValidationView {
    fn validators(&self) -> Vec<Rc<dyn Validator>> {
        self.validators.clone()
    }
}

#[derive(Default)]
pub struct FakeViewTree {
    pub validation_views: Vec<Rc<dyn ValidationView>>,
    pub action_views: Vec<Rc<dyn ActionView>>,
}

impl ViewTree for FakeViewTree {
    fn validation_views(&self) -> Vec<Rc<dyn ValidationView>> {
        self.validation_views.clone()
    }

    fn action_views(&self) -> Vec<Rc<dyn ActionView>> {
        self.action_views.clone()
    }
}

/// Binding over a [`FakeViewTree`] with optional pending bindings.
#[derive(Default)]
pub struct FakeBinding {
    root: FakeViewTree,
    pending: Cell<bool>,
    executions: Cell<usize>,
}

impl FakeBinding {
    pub fn new(root: FakeViewTree) -> Self {
        Self { root, ..Self::default() }
    }

    pub fn with_pending_bindings(self) -> Self {
        self.pending.set(true);
        self
    }

    pub fn executions(&self) -> usize {
        self.executions.get()
    }
}

impl DataBinding for FakeBinding {
    fn has_pending_bindings(&self) -> bool {
        self.pending.get()
    }

    fn execute_pending_bindings(&self) {
        self.pending.set(false);
        self.executions.set(self.executions.get() + 1);
    }

    fn root(&self) -> &dyn ViewTree {
        &self.root
    }
}
