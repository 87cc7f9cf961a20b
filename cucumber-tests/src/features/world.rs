#![allow(dead_code)]
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use cucumber::World as CucumberWorld;
use formwire_compiler::{ClassModel, Plan, ProcessingOptions};
use formwire_core::testing::{FakeButton, FakeInput};
use formwire_core::ui::StringResources;
use formwire_core::Validation;

/// Sign-up host wired by the derive macro.
#[derive(Validation)]
#[validation(on_success = "on_valid", on_error_with_errors = "on_invalid")]
pub struct SignUpForm {
    #[required(error_message = "Username is required")]
    pub username: Rc<FakeInput>,
    #[password(min = 8, error_message = "Password must have 8 characters")]
    pub password: Rc<FakeInput>,
    #[confirm_password(error_message_res = 42)]
    pub confirm_password: Rc<FakeInput>,
    #[validate_on_click]
    pub submit: Rc<FakeButton>,
    #[clear_validations_on_click]
    pub reset: Rc<FakeButton>,
    pub successes: Cell<usize>,
    pub failures: RefCell<Vec<Vec<String>>>,
}

impl SignUpForm {
    fn on_valid(&self) {
        self.successes.set(self.successes.get() + 1);
    }

    fn on_invalid(&self, errors: &[String]) {
        self.failures.borrow_mut().push(errors.to_vec());
    }
}

impl StringResources for SignUpForm {
    fn get_string(&self, id: i32) -> String {
        match id {
            42 => "Passwords do not match".to_string(),
            _ => format!("missing resource {}", id),
        }
    }
}

/// Something the user does to the form.
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    Submit,
    Reset,
    Type { input: String, text: String },
}

/// What the form looked like after the interactions.
#[derive(Debug, Default)]
pub struct Outcome {
    pub successes: usize,
    pub failures: Vec<Vec<String>>,
    pub input_errors: Vec<(String, Option<String>)>,
}

impl Outcome {
    pub fn input_error(&self, input: &str) -> Option<&str> {
        self.input_errors
            .iter()
            .find(|(name, _)| name == input)
            .and_then(|(_, error)| error.as_deref())
    }
}

/// Drives a [`SignUpForm`]. The form is rebuilt from the recorded texts and
/// interactions on every check, so the world itself stays plain data.
#[derive(Debug, Default, CucumberWorld)]
pub struct WiringWorld {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub interactions: Vec<Interaction>,
}

impl WiringWorld {
    pub fn replay(&self) -> Outcome {
        let form = Rc::new(SignUpForm {
            username: FakeInput::with_text(&self.username),
            password: FakeInput::with_text(&self.password),
            confirm_password: FakeInput::with_text(&self.confirm_password),
            submit: FakeButton::new(),
            reset: FakeButton::new(),
            successes: Cell::new(0),
            failures: RefCell::new(Vec::new()),
        });
        SignUpFormValidation::init(&form);

        for interaction in &self.interactions {
            match interaction {
                Interaction::Submit => {
                    form.submit.click();
                }
                Interaction::Reset => {
                    form.reset.click();
                }
                Interaction::Type { input, text } => Self::input(&form, input).type_text(text),
            }
        }

        let input_errors = ["username", "password", "confirm_password"]
            .iter()
            .map(|name| (name.to_string(), Self::input(&form, name).error()))
            .collect();

        let outcome = Outcome {
            successes: form.successes.get(),
            failures: form.failures.borrow().clone(),
            input_errors,
        };
        outcome
    }

    fn input<'a>(form: &'a SignUpForm, name: &str) -> &'a FakeInput {
        match name {
            "username" => &form.username,
            "password" => &form.password,
            "confirm_password" => &form.confirm_password,
            other => panic!("SignUpForm has no input named {}", other),
        }
    }
}

/// Builds class models step by step and plans them with the compiler.
#[derive(Debug, Default, CucumberWorld)]
pub struct PlanWorld {
    pub class: Option<ClassModel>,
    pub options: ProcessingOptions,
    pub plan: Option<Plan>,
    pub error: Option<String>,
}

impl PlanWorld {
    pub fn class_mut(&mut self) -> &mut ClassModel {
        self.class.as_mut().expect("no host type declared")
    }

    pub fn plan(&self) -> &Plan {
        match (&self.plan, &self.error) {
            (Some(plan), _) => plan,
            (None, Some(error)) => panic!("planning failed: {}", error),
            (None, None) => panic!("the host type was not planned"),
        }
    }
}
