//! Minimal widgets standing in for a UI toolkit

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use formwire_core::ui::{ActionRole, ActionView, Clickable, TextInput};

#[derive(Default)]
pub struct TextField {
    text: RefCell<String>,
    error: RefCell<Option<String>>,
    listeners: RefCell<Vec<Rc<dyn Fn()>>>,
}

impl TextField {
    pub fn new(text: &str) -> Rc<Self> {
        let field = Self::default();
        *field.text.borrow_mut() = text.to_string();
        Rc::new(field)
    }

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

impl TextInput for TextField {
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

#[derive(Default)]
pub struct Button {
    role: Option<ActionRole>,
    handler: RefCell<Option<Rc<dyn Fn()>>>,
    clicks: Cell<usize>,
}

impl Button {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn tagged(role: ActionRole) -> Rc<Self> {
        Rc::new(Self { role: Some(role), ..Self::default() })
    }

    pub fn click(&self) {
        self.clicks.set(self.clicks.get() + 1);
        let handler = self.handler.borrow().clone();
        if let Some(handler) = handler {
            handler();
        }
    }

    pub fn has_handler(&self) -> bool {
        self.handler.borrow().is_some()
    }
}

impl Clickable for Button {
    fn set_on_click(&self, handler: Box<dyn Fn()>) {
        *self.handler.borrow_mut() = Some(Rc::from(handler));
    }
}

impl ActionView for Button {
    fn action_role(&self) -> Option<ActionRole> {
        self.role
    }
}
