//! Lowers a [`GeneratedUnit`] to Rust tokens
//!
//! Every runtime item is referred to by its full path so the generated code
//! needs no imports at the expansion site.

use proc_macro2::{Ident, Literal, TokenStream};
use quote::quote;

use crate::error::RenderError;
use crate::ir::{Expr, Function, GeneratedUnit, Method, Stmt, TypeRef};
use crate::message::ErrorMessageSource;
use crate::model::Visibility;

pub fn render(unit: &GeneratedUnit, runtime_crate: &str) -> Result<TokenStream, RenderError> {
    let renderer = Renderer {
        rt: runtime_path(runtime_crate)?,
        host: path(&unit.host)?,
    };
    renderer.unit(unit)
}

fn ident(name: &str) -> Result<Ident, RenderError> {
    syn::parse_str::<Ident>(name).map_err(|_| RenderError::InvalidIdent(name.to_string()))
}

fn path(name: &str) -> Result<syn::Path, RenderError> {
    syn::parse_str::<syn::Path>(name).map_err(|_| RenderError::InvalidPath(name.to_string()))
}

/// `formwire_core` becomes `::formwire_core`; `crate`, `self::..` and
/// already absolute paths are kept as written.
fn runtime_path(runtime_crate: &str) -> Result<TokenStream, RenderError> {
    let runtime = path(runtime_crate)?;
    let first = runtime.segments.first().map(|segment| segment.ident.to_string());
    let relative = matches!(first.as_deref(), Some("crate" | "self" | "super"));

    if runtime.leading_colon.is_some() || relative {
        Ok(quote!(#runtime))
    } else {
        Ok(quote!(::#runtime))
    }
}

struct Renderer {
    rt: TokenStream,
    host: syn::Path,
}

impl Renderer {
    fn unit(&self, unit: &GeneratedUnit) -> Result<TokenStream, RenderError> {
        let name = ident(&unit.name)?;
        let doc = &unit.doc;
        let vis = match unit.visibility {
            Visibility::Inherited => quote!(),
            Visibility::Crate => quote!(pub(crate)),
            Visibility::Public => quote!(pub),
        };

        let fields = unit
            .fields
            .iter()
            .map(|field| {
                let name = ident(&field.name)?;
                let ty = self.ty(field.ty);
                Ok(quote!(#name: #ty))
            })
            .collect::<Result<Vec<_>, RenderError>>()?;

        let methods = unit
            .methods
            .iter()
            .map(|method| self.method(method))
            .collect::<Result<Vec<_>, RenderError>>()?;

        Ok(quote! {
            #[doc = #doc]
            #[allow(dead_code)]
            #vis struct #name {
                #(#fields,)*
            }

            #[allow(dead_code, unused_variables)]
            impl #name {
                #(#methods)*
            }
        })
    }

    fn ty(&self, ty: TypeRef) -> TokenStream {
        let rt = &self.rt;
        let host = &self.host;
        match ty {
            TypeRef::SelfType => quote!(Self),
            TypeRef::HostRef => quote!(&::std::rc::Rc<#host>),
            TypeRef::SharedValidatorSet => quote!(::std::rc::Rc<#rt::ValidatorSet>),
            TypeRef::SharedValidatorSetRef => quote!(&::std::rc::Rc<#rt::ValidatorSet>),
            TypeRef::ClickableRef => quote!(&dyn #rt::ui::Clickable),
            TypeRef::DataBindingRef => quote!(&dyn #rt::ui::DataBinding),
        }
    }

    fn method(&self, method: &Method) -> Result<TokenStream, RenderError> {
        let name = ident(&method.name)?;
        let vis = if method.public { quote!(pub) } else { quote!() };
        let params = method
            .params
            .iter()
            .map(|param| {
                let name = ident(&param.name)?;
                let ty = self.ty(param.ty);
                Ok(quote!(#name: #ty))
            })
            .collect::<Result<Vec<_>, RenderError>>()?;
        let returns = match method.returns {
            Some(ty) => {
                let ty = self.ty(ty);
                quote!(-> #ty)
            }
            None => quote!(),
        };
        let body = self.block(&method.body)?;

        Ok(quote! {
            #vis fn #name(#(#params),*) #returns {
                #body
            }
        })
    }

    fn block(&self, stmts: &[Stmt]) -> Result<TokenStream, RenderError> {
        let stmts = stmts.iter().map(|stmt| self.stmt(stmt)).collect::<Result<Vec<_>, _>>()?;
        Ok(quote!(#(#stmts)*))
    }

    fn stmt(&self, stmt: &Stmt) -> Result<TokenStream, RenderError> {
        let tokens = match stmt {
            Stmt::Let { name, mutable, value } => {
                let name = ident(name)?;
                let value = self.expr(value)?;
                if *mutable {
                    quote!(let mut #name = #value;)
                } else {
                    quote!(let #name = #value;)
                }
            }
            Stmt::Expr(expr) => {
                let expr = self.expr(expr)?;
                quote!(#expr;)
            }
            Stmt::If { condition, then_branch, else_branch } => {
                let condition = self.expr(condition)?;
                let then_branch = self.block(then_branch)?;
                if else_branch.is_empty() {
                    quote!(if #condition { #then_branch })
                } else {
                    let else_branch = self.block(else_branch)?;
                    quote!(if #condition { #then_branch } else { #else_branch })
                }
            }
            Stmt::IfSome { binding, value, body } => {
                let binding = ident(binding)?;
                let value = self.expr(value)?;
                let body = self.block(body)?;
                quote!(if let ::std::option::Option::Some(#binding) = #value { #body })
            }
            Stmt::ForEach { binding, iterable, body } => {
                let binding = ident(binding)?;
                let iterable = self.expr(iterable)?;
                let body = self.block(body)?;
                quote!(for #binding in #iterable { #body })
            }
            Stmt::OnClick { element, captures_target, body } => {
                let rt = &self.rt;
                let element = self.expr(element)?;
                let body = self.block(body)?;
                let (downgrade, upgrade) = if *captures_target {
                    (
                        quote!(let target = ::std::rc::Rc::downgrade(target);),
                        quote!(
                            let ::std::option::Option::Some(target) = target.upgrade() else {
                                return;
                            };
                        ),
                    )
                } else {
                    (quote!(), quote!())
                };
                quote! {
                    {
                        let validator_set = ::std::rc::Rc::clone(validator_set);
                        #downgrade
                        #rt::ui::Clickable::set_on_click(
                            #element,
                            ::std::boxed::Box::new(move || {
                                #upgrade
                                #body
                            }),
                        );
                    }
                }
            }
            Stmt::Tail(expr) => self.expr(expr)?,
        };
        Ok(tokens)
    }

    fn exprs(&self, exprs: &[Expr]) -> Result<Vec<TokenStream>, RenderError> {
        exprs.iter().map(|expr| self.expr(expr)).collect()
    }

    fn expr(&self, expr: &Expr) -> Result<TokenStream, RenderError> {
        let rt = &self.rt;
        let tokens = match expr {
            Expr::Var(name) => {
                let name = ident(name)?;
                quote!(#name)
            }
            Expr::Field { base, name } => {
                let base = self.expr(base)?;
                let name = ident(name)?;
                quote!(#base.#name)
            }
            Expr::Bool(value) => quote!(#value),
            Expr::Int(value) => {
                let magnitude = Literal::u64_unsuffixed(value.unsigned_abs());
                if *value < 0 {
                    quote!(-#magnitude)
                } else {
                    quote!(#magnitude)
                }
            }
            Expr::Str(value) => quote!(#value),
            Expr::Message(ErrorMessageSource::Literal(text)) => quote!(#text),
            Expr::Message(ErrorMessageSource::Resource(id)) => {
                let id = Literal::i32_unsuffixed(*id);
                quote!(#rt::ui::StringResources::get_string(&**target, #id))
            }
            Expr::Input(member) => {
                let member = ident(member)?;
                quote!(#rt::ui::InputHandle::input_handle(&target.#member))
            }
            Expr::Ref(inner) => {
                let inner = self.expr(inner)?;
                quote!(&#inner)
            }
            Expr::NewValidatorSet => quote!(#rt::ValidatorSet::new()),
            Expr::NewValidator { kind, args } => {
                let ty = ident(kind.type_name())?;
                let args = self.exprs(args)?;
                quote!(#rt::validators::#ty::new(#(#args),*))
            }
            Expr::Call { function, args } => {
                let args = self.exprs(args)?;
                match function {
                    Function::Associated(name) => {
                        let name = ident(name)?;
                        quote!(Self::#name(#(#args),*))
                    }
                    Function::RcNew => quote!(::std::rc::Rc::new(#(#args),*)),
                    Function::SelectActions => quote!(#rt::ui::select_actions(#(#args),*)),
                }
            }
            Expr::MethodCall { receiver, method, args } => {
                let receiver = self.expr(receiver)?;
                let method = ident(method)?;
                let args = self.exprs(args)?;
                quote!(#receiver.#method(#(#args),*))
            }
            Expr::ConstructSelf { fields } => {
                let fields = fields
                    .iter()
                    .map(|(name, value)| {
                        let field = ident(name)?;
                        match value {
                            Expr::Var(var) if var == name => Ok(quote!(#field)),
                            value => {
                                let value = self.expr(value)?;
                                Ok(quote!(#field: #value))
                            }
                        }
                    })
                    .collect::<Result<Vec<_>, RenderError>>()?;
                quote!(Self { #(#fields),* })
            }
        };
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter;
    use crate::model::{ClassModel, ErrorCallback, FieldModel, Rule};
    use crate::options::ProcessingOptions;
    use crate::resolver;

    fn compact(tokens: &TokenStream) -> String {
        tokens.to_string().chars().filter(|c| !c.is_whitespace()).collect()
    }

    fn render_class(class: &ClassModel, options: &ProcessingOptions) -> TokenStream {
        let unit = emitter::emit(class, &resolver::resolve(class), options);
        render(&unit, &options.runtime_crate).unwrap()
    }

    fn sign_up() -> ClassModel {
        ClassModel::new("SignUpForm", "on_valid")
            .with_visibility(Visibility::Public)
            .with_field(FieldModel::new("username", Rule::Required).with_error_message("required"))
            .with_field(FieldModel::new("confirm", Rule::ConfirmEmail))
            .with_field(
                FieldModel::new("email", Rule::Email { required: false }).with_error_message_res(7),
            )
            .with_field(FieldModel::new("age", Rule::Length { min: -1, max: 3, required: true }))
            .with_validate_action("submit")
            .with_clear_action("reset")
            .with_on_error(ErrorCallback::with_errors("on_invalid"))
    }

    #[test]
    fn test_rendered_unit_is_valid_rust() {
        let tokens = render_class(&sign_up(), &ProcessingOptions::default());
        let file: syn::File = syn::parse2(tokens).unwrap();
        assert_eq!(file.items.len(), 2);
    }

    #[test]
    fn test_reflective_unit_is_valid_rust() {
        let class = ClassModel::new("forms::BoundForm", "on_valid");
        let tokens = render_class(&class, &ProcessingOptions::default().with_data_binding(true));
        let code = compact(&tokens);

        assert!(syn::parse2::<syn::File>(tokens).is_ok());
        assert!(code.contains("structBoundFormValidation"));
        assert!(code.contains("&::std::rc::Rc<forms::BoundForm>"));
        assert!(code.contains("::formwire_core::ui::select_actions(&buttons)"));
        assert!(code.contains("binding:&dyn::formwire_core::ui::DataBinding"));
    }

    #[test]
    fn test_validator_construction_tokens() {
        let code = compact(&render_class(&sign_up(), &ProcessingOptions::default()));

        assert!(code.contains("pubstructSignUpFormValidation"));
        assert!(code.contains(concat!(
            "::formwire_core::validators::RequiredValidator::new(",
            "::formwire_core::ui::InputHandle::input_handle(&target.username),",
            "\"required\",true)",
        )));
        assert!(code.contains(concat!(
            "::formwire_core::validators::EmailValidator::new(",
            "::formwire_core::ui::InputHandle::input_handle(&target.email),",
            "::formwire_core::ui::StringResources::get_string(&**target,7),true,false)",
        )));
        assert!(code.contains(concat!(
            "LengthValidator::new(",
            "::formwire_core::ui::InputHandle::input_handle(&target.age),",
            "\"\",-1,3,true,true)",
        )));
        assert!(code.contains(concat!(
            "ConfirmEmailValidator::new(",
            "::formwire_core::ui::InputHandle::input_handle(&target.email),",
            "::formwire_core::ui::InputHandle::input_handle(&target.confirm)",
        )));
    }

    #[test]
    fn test_click_handlers_tokens() {
        let code = compact(&render_class(&sign_up(), &ProcessingOptions::default()));

        assert!(
            code.contains("Self::validate_on_click_listener(&validator_set,&target.submit,target);")
        );
        assert!(code.contains(concat!(
            "Self::clear_validations_on_click_listener",
            "(&validator_set,&target.reset);",
        )));
        assert!(code.contains("Some(target)=target.upgrade()else{return;};"));
        assert!(code.contains(concat!(
            "ifvalidator_set.is_valid(){target.on_valid();}",
            "else{target.on_invalid(&validator_set.errors());}",
        )));
        assert!(code.contains("Self{validator_set}"));
        assert!(code.contains("pubfninit(target:&::std::rc::Rc<SignUpForm>){Self::new(target);}"));
    }

    #[test]
    fn test_custom_runtime_path() {
        let class = ClassModel::new("Form", "on_valid");
        let options = ProcessingOptions::default().with_runtime_crate("crate::runtime");
        let code = compact(&render_class(&class, &options));
        assert!(code.contains("crate::runtime::ValidatorSet::new()"));
        assert!(!code.contains("::crate"));
    }

    #[test]
    fn test_invalid_names_are_reported() {
        let class = ClassModel::new("Form", "on valid").with_validate_action("submit");
        let unit = emitter::emit(&class, &[], &ProcessingOptions::default());
        assert!(matches!(
            render(&unit, "formwire_core"),
            Err(RenderError::InvalidIdent(name)) if name == "on valid"
        ));

        let class = ClassModel::new("Not A Path", "on_valid");
        let unit = emitter::emit(&class, &[], &ProcessingOptions::default());
        assert!(matches!(render(&unit, "formwire_core"), Err(RenderError::InvalidPath(_))));
    }
}
