//! Formwire - Validation Wiring Compiler
//!
//! Reads the declarative validation rules of a form-like host type and emits
//! a companion unit that instantiates the matching runtime validators, gathers
//! them into one validator set and wires the host's action elements to
//! "validate" and "clear validations" handlers.
//!
//! # Pipeline
//!
//! - [`model`] - Class and field models handed over by a front end
//! - [`resolver`] - Rule resolution and pairing into [`ValidatorDescriptor`]s
//! - [`emitter`] - Builds the [`ir::GeneratedUnit`] tree
//! - [`render`] - Lowers the tree to tokens
//!
//! The `#[derive(Validation)]` macro in `formwire-macros` and the
//! `formwire` command-line tool are the two front ends.
//!
//! ```rust,ignore
//! use formwire_compiler::{expand, ClassModel, FieldModel, ProcessingOptions, Rule};
//!
//! let class = ClassModel::new("LoginForm", "on_valid")
//!     .with_field(FieldModel::new("email", Rule::Email { required: true }))
//!     .with_validate_action("submit");
//!
//! let tokens = expand(&class, &ProcessingOptions::default())?;
//! ```

pub mod config;
pub mod emitter;
pub mod error;
pub mod ir;
pub mod message;
pub mod model;
pub mod options;
pub mod render;
pub mod resolver;

pub use error::{CompileError, ModelError, RenderError};
pub use ir::{GeneratedUnit, Variant};
pub use message::ErrorMessageSource;
pub use model::{
    ClassModel, ErrorArity, ErrorCallback, FieldModel, Rule, RuleKind, Visibility,
    UNSET_RESOURCE_ID,
};
pub use options::ProcessingOptions;
pub use resolver::{Arg, ValidatorDescriptor, ValidatorKind};

use proc_macro2::TokenStream;
use serde::Serialize;

/// Validates, resolves and emits the unit for one host type.
pub fn compile(
    class: &ClassModel,
    options: &ProcessingOptions,
) -> Result<GeneratedUnit, CompileError> {
    class.validate()?;

    let descriptors = resolver::resolve(class);
    log::debug!(
        "resolved {} descriptor(s) from {} field(s) of `{}`",
        descriptors.len(),
        class.fields.len(),
        class.name
    );

    Ok(emitter::emit(class, &descriptors, options))
}

/// [`compile`] followed by [`render::render`].
pub fn expand(
    class: &ClassModel,
    options: &ProcessingOptions,
) -> Result<TokenStream, CompileError> {
    let unit = compile(class, options)?;
    Ok(render::render(&unit, &options.runtime_crate)?)
}

/// What would be generated for a host type, without the code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    pub unit: String,
    pub variant: Variant,
    pub descriptors: Vec<ValidatorDescriptor>,
}

pub fn plan(class: &ClassModel, options: &ProcessingOptions) -> Result<Plan, CompileError> {
    class.validate()?;

    Ok(Plan {
        unit: emitter::unit_name(class, options),
        variant: emitter::select_variant(class, options),
        descriptors: resolver::resolve(class),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_up() -> ClassModel {
        ClassModel::new("SignUpForm", "on_valid")
            .with_field(FieldModel::new("username", Rule::Required))
            .with_field(FieldModel::new(
                "password",
                Rule::Password { min: 8, pattern: String::new() },
            ))
            .with_field(
                FieldModel::new("confirm_password", Rule::ConfirmPassword)
                    .with_error_message_res(42),
            )
            .with_validate_action("submit")
    }

    #[test]
    fn test_compile_rejects_invalid_model() {
        let class = ClassModel::new("SignUpForm", "");
        assert!(matches!(
            compile(&class, &ProcessingOptions::default()),
            Err(CompileError::Model(ModelError::MissingSuccessCallback { .. }))
        ));
    }

    #[test]
    fn test_expand_produces_tokens() {
        let tokens = expand(&sign_up(), &ProcessingOptions::default()).unwrap();
        assert!(syn::parse2::<syn::File>(tokens).is_ok());
    }

    #[test]
    fn test_plan_serializes_to_json() {
        let plan = plan(&sign_up(), &ProcessingOptions::default()).unwrap();
        assert_eq!(plan.unit, "SignUpFormValidation");
        assert_eq!(plan.variant, Variant::Direct);
        assert_eq!(plan.descriptors.len(), 3);

        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["variant"], "direct");
        assert_eq!(json["descriptors"][2]["kind"], "confirm_password");
        assert_eq!(json["descriptors"][2]["message"]["source"], "resource");
        assert_eq!(json["descriptors"][2]["message"]["value"], 42);
        assert_eq!(json["descriptors"][2]["targets"][0], "password");
    }

    #[test]
    fn test_expand_reports_render_errors() {
        let class = ClassModel::new("SignUpForm", "on_valid")
            .with_field(FieldModel::new("user name", Rule::Required));
        assert!(matches!(
            expand(&class, &ProcessingOptions::default()),
            Err(CompileError::Render(RenderError::InvalidIdent(_)))
        ));
    }
}
