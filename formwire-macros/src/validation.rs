//! `#[derive(Validation)]` implementation
//!
//! Builds a [`ClassModel`] from the annotated struct and hands it to the
//! compiler. Every contract violation is reported as a compile error spanned
//! at the offending attribute, field or type name.

use formwire_compiler::{ClassModel, ProcessingOptions, Visibility};
use proc_macro2::TokenStream;
use syn::{parse2, Data, DeriveInput, Error, Fields, Result};

use crate::attributes::{self, FieldRole};

pub fn derive_validation(input: TokenStream) -> Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;
    let options = ProcessingOptions::default().with_data_binding(cfg!(feature = "data-binding"));

    let class = class_model(&input)?;
    formwire_compiler::expand(&class, &options).map_err(|err| Error::new_spanned(&input.ident, err))
}

fn class_model(input: &DeriveInput) -> Result<ClassModel> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "Validation cannot be derived for generic types",
        ));
    }

    let Data::Struct(data) = &input.data else {
        return Err(Error::new_spanned(name, "Validation can only be derived for structs"));
    };

    let fields = match &data.fields {
        Fields::Named(fields) => fields.named.iter().collect::<Vec<_>>(),
        Fields::Unit => Vec::new(),
        Fields::Unnamed(_) => {
            return Err(Error::new_spanned(
                name,
                "Validation only supports structs with named fields",
            ));
        }
    };

    let callbacks = attributes::parse_callbacks(&input.attrs)?;
    let Some(on_success) = callbacks.on_success else {
        return Err(Error::new_spanned(
            name,
            "missing `#[validation(on_success = \"...\")]` on the host type",
        ));
    };

    let mut class =
        ClassModel::new(name.to_string(), on_success).with_visibility(visibility(&input.vis));
    if let Some(on_error) = callbacks.on_error {
        class = class.with_on_error(on_error);
    }

    for field in fields {
        let member = field.ident.as_ref().map(ToString::to_string).unwrap_or_default();
        match attributes::parse_field(field)? {
            FieldRole::Validated(model) => class = class.with_field(model),
            FieldRole::ValidateAction => {
                if class.validate_action.is_some() {
                    return Err(Error::new_spanned(
                        field,
                        "only one field can be `#[validate_on_click]`",
                    ));
                }
                class = class.with_validate_action(member);
            }
            FieldRole::ClearAction => {
                if class.clear_action.is_some() {
                    return Err(Error::new_spanned(
                        field,
                        "only one field can be `#[clear_validations_on_click]`",
                    ));
                }
                class = class.with_clear_action(member);
            }
            FieldRole::Plain => {}
        }
    }

    Ok(class)
}

fn visibility(vis: &syn::Visibility) -> Visibility {
    match vis {
        syn::Visibility::Public(_) => Visibility::Public,
        syn::Visibility::Restricted(_) => Visibility::Crate,
        syn::Visibility::Inherited => Visibility::Inherited,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwire_compiler::{ErrorArity, Rule};
    use quote::quote;
    use syn::parse_quote;

    #[test]
    fn test_class_model_from_struct() {
        let input: DeriveInput = parse_quote! {
            #[validation(on_success = "on_valid", on_error_with_errors = "on_invalid")]
            pub struct SignUpForm {
                #[required]
                username: Rc<TextField>,
                #[password(min = 8)]
                password: Rc<TextField>,
                #[confirm_password(error_message_res = 42)]
                confirm_password: Rc<TextField>,
                #[validate_on_click]
                submit: Rc<Button>,
                title: String,
            }
        };

        let class = class_model(&input).unwrap();
        assert_eq!(class.name, "SignUpForm");
        assert_eq!(class.visibility, Visibility::Public);
        assert_eq!(class.fields.len(), 3);
        assert_eq!(class.fields[1].rule, Rule::Password { min: 8, pattern: String::new() });
        assert_eq!(class.fields[2].error_message_res, 42);
        assert_eq!(class.validate_action.as_deref(), Some("submit"));
        assert_eq!(class.clear_action, None);
        assert_eq!(class.on_error.map(|callback| callback.arity), Some(ErrorArity::Errors));
    }

    #[test]
    fn test_missing_on_success() {
        let input = quote! {
            struct LoginForm {
                #[email]
                email: Rc<TextField>,
            }
        };
        let err = derive_validation(input).err().unwrap();
        assert!(err.to_string().contains("on_success"));
    }

    #[test]
    fn test_generics_are_rejected() {
        let input = quote! {
            #[validation(on_success = "on_valid")]
            struct LoginForm<T> {
                email: T,
            }
        };
        assert!(derive_validation(input).is_err());
    }

    #[test]
    fn test_second_validate_action_is_rejected() {
        let input = quote! {
            #[validation(on_success = "on_valid")]
            struct LoginForm {
                #[validate_on_click]
                submit: Rc<Button>,
                #[validate_on_click]
                again: Rc<Button>,
            }
        };
        let err = derive_validation(input).err().unwrap();
        assert!(err.to_string().contains("only one field"));
    }

    #[test]
    fn test_derive_expands_to_companion_unit() {
        let input = quote! {
            #[validation(on_success = "on_valid")]
            pub(crate) struct LoginForm {
                #[email]
                email: Rc<TextField>,
                #[validate_on_click]
                submit: Rc<Button>,
            }
        };
        let tokens = derive_validation(input).unwrap();
        let file: syn::File = parse2(tokens).unwrap();
        let syn::Item::Struct(unit) = &file.items[0] else {
            panic!("expected the unit struct first");
        };
        assert_eq!(unit.ident, "LoginFormValidation");
        assert!(matches!(unit.vis, syn::Visibility::Restricted(_)));
    }
}
