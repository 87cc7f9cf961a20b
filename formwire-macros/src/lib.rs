//! Procedural macros for Formwire
//!
//! `#[derive(Validation)]` reads the validation attributes of a form-like
//! struct and generates its companion `<Name>Validation` unit. Use it through
//! `formwire-core`, which re-exports it next to the runtime the generated code
//! refers to.

use proc_macro::TokenStream;

mod attributes;
mod validation;

/// Derive macro generating validation wiring for a host struct
///
/// The generated unit instantiates one runtime validator per resolved rule,
/// collects them into a `ValidatorSet` and installs click handlers on the
/// fields marked `#[validate_on_click]` and `#[clear_validations_on_click]`.
/// It exposes a single factory, `init(&Rc<Host>)`.
///
/// # Example
///
/// ```rust,ignore
/// use formwire_core::Validation;
///
/// #[derive(Validation)]
/// #[validation(on_success = "on_valid", on_error_with_errors = "on_invalid")]
/// struct SignUpForm {
///     #[required(error_message = "Required")]
///     username: Rc<TextField>,
///     #[password(min = 8)]
///     password: Rc<TextField>,
///     #[confirm_password(error_message_res = 42)]
///     confirm_password: Rc<TextField>,
///     #[validate_on_click]
///     submit: Rc<Button>,
/// }
///
/// SignUpFormValidation::init(&form);
/// ```
///
/// With the `data-binding` feature, a host without any rule attribute gets
/// the reflective variant instead: `init(&Rc<Host>, &dyn DataBinding)`
/// collects validators and action elements from the bound view tree.
#[proc_macro_derive(
    Validation,
    attributes(
        validation,
        validate_on_click,
        clear_validations_on_click,
        required,
        email,
        confirm_email,
        pattern,
        length,
        only_number,
        password,
        confirm_password,
        cpf,
        cnpj,
        isbn,
        between_start,
        between_limit,
        credit_card,
        numeric_limit,
        ipv4,
        ipv6,
        url,
        past_date,
        future_date
    )
)]
pub fn derive_validation(input: TokenStream) -> TokenStream {
    validation::derive_validation(input.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
