//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use formwire_core::prelude::*;
//! ```

// === Derive macro (from formwire-macros) ===
#[cfg(feature = "macros")]
pub use crate::Validation;

// === Validation ===
pub use crate::validation::{InputBinding, Validator, ValidatorSet};
pub use crate::validators::FieldRule;

// === UI capabilities ===
pub use crate::ui::{
    select_actions, ActionRole, ActionView, Clickable, DataBinding, InputHandle, SelectedActions,
    StringResources, TextInput, ValidationView, ViewTree,
};
