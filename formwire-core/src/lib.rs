//! Formwire - Core
//!
//! Runtime side of Formwire validation wiring: the validators generated code
//! instantiates, the [`ValidatorSet`] aggregate that answers "is this form
//! valid?", and the [`ui`] capability traits a toolkit implements so that
//! generated code can reach inputs, buttons and bound view trees.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use formwire_core::prelude::*;
//!
//! #[derive(Validation)]
//! #[validation(on_success = "on_valid", on_error_with_errors = "on_invalid")]
//! struct LoginForm {
//!     #[email(error_message = "Invalid email")]
//!     email: Rc<MyTextField>,
//!     #[password(min = 8, error_message = "At least 8 characters")]
//!     password: Rc<MyTextField>,
//!     #[validate_on_click]
//!     submit: Rc<MyButton>,
//! }
//!
//! impl LoginForm {
//!     fn on_valid(&self) { /* submit */ }
//!     fn on_invalid(&self, errors: &[String]) { /* show summary */ }
//! }
//!
//! let form = Rc::new(LoginForm { /* widgets */ });
//! LoginFormValidation::init(&form);
//! ```
//!
//! # Modules
//!
//! - [`validation`] - `Validator` trait, `ValidatorSet` and `InputBinding`
//! - [`validators`] - One validator per rule kind
//! - [`ui`] - Toolkit capability traits and `select_actions`
//! - `testing` - Fake widgets (feature `testing`)

pub mod prelude;
pub mod ui;
pub mod validation;
pub mod validators;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use validation::{InputBinding, Validator, ValidatorSet};

// Re-export the derive macro when the feature is enabled
#[cfg(feature = "macros")]
pub use formwire_macros::Validation;
