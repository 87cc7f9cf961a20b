//! Attribute parsing for `#[derive(Validation)]`
//!
//! Field rules are written as one attribute per rule kind:
//!
//! ```rust,ignore
//! #[length(min = 3, max = 20, error_message = "Between 3 and 20 characters")]
//! username: Rc<TextField>,
//! #[confirm_password(error_message_res = 42, auto_dismiss = false)]
//! confirm: Rc<TextField>,
//! #[validate_on_click]
//! submit: Rc<Button>,
//! ```

use formwire_compiler::{ErrorCallback, FieldModel, ModelError, Rule, RuleKind};
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Error, Field, LitBool, LitFloat, LitInt, LitStr, Meta, Result, Token};

pub const VALIDATE_ON_CLICK: &str = "validate_on_click";
pub const CLEAR_ON_CLICK: &str = "clear_validations_on_click";

/// Options every rule kind accepts.
const COMMON_OPTIONS: [&str; 3] = ["error_message", "error_message_res", "auto_dismiss"];

/// Role of one struct field.
pub enum FieldRole {
    Validated(FieldModel),
    ValidateAction,
    ClearAction,
    Plain,
}

/// Host-level callbacks from `#[validation(...)]`.
#[derive(Default)]
pub struct Callbacks {
    pub on_success: Option<String>,
    pub on_error: Option<ErrorCallback>,
}

#[derive(Default)]
struct RuleOptions {
    error_message: Option<String>,
    error_message_res: Option<i32>,
    auto_dismiss: Option<bool>,
    required: Option<bool>,
    pattern: Option<String>,
    min: Option<Number>,
    max: Option<Number>,
    date_format: Option<String>,
    limit_date: Option<String>,
}

/// A numeric option as written. `numeric_limit` keeps the source text.
struct Number {
    text: String,
    span: proc_macro2::Span,
}

impl Number {
    fn int(&self) -> Result<i64> {
        self.text.parse().map_err(|_| Error::new(self.span, "expected an integer"))
    }
}

fn model_error(spanned: impl quote::ToTokens, err: ModelError) -> Error {
    Error::new_spanned(spanned, err.to_string())
}

pub fn parse_callbacks(attrs: &[Attribute]) -> Result<Callbacks> {
    let mut callbacks = Callbacks::default();
    let mut on_error: Option<ErrorCallback> = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("validation")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("on_success") {
                callbacks.on_success = Some(meta.value()?.parse::<LitStr>()?.value());
                return Ok(());
            }

            let callback = if meta.path.is_ident("on_error") {
                ErrorCallback::new(meta.value()?.parse::<LitStr>()?.value())
            } else if meta.path.is_ident("on_error_with_errors") {
                ErrorCallback::with_errors(meta.value()?.parse::<LitStr>()?.value())
            } else {
                return Err(
                    meta.error("expected `on_success`, `on_error` or `on_error_with_errors`")
                );
            };

            if on_error.is_some() {
                return Err(model_error(&meta.path, ModelError::ConflictingErrorCallbacks));
            }
            on_error = Some(callback);
            Ok(())
        })?;
    }

    callbacks.on_error = on_error;
    Ok(callbacks)
}

pub fn parse_field(field: &Field) -> Result<FieldRole> {
    let Some(name) = field.ident.as_ref() else {
        return Err(Error::new_spanned(field, "Validation requires named fields"));
    };
    let name = name.to_string();

    let mut rule: Option<(FieldModel, &Attribute)> = None;
    let mut action: Option<(FieldRole, &Attribute)> = None;

    for attr in &field.attrs {
        let Some(ident) = attr.path().get_ident() else {
            continue;
        };
        let ident = ident.to_string();

        if ident == VALIDATE_ON_CLICK || ident == CLEAR_ON_CLICK {
            if !matches!(attr.meta, Meta::Path(_)) {
                return Err(Error::new_spanned(attr, format!("`#[{}]` takes no options", ident)));
            }
            if action.is_some() {
                return Err(Error::new_spanned(attr, "a field can only be one action element"));
            }
            let role = if ident == VALIDATE_ON_CLICK {
                FieldRole::ValidateAction
            } else {
                FieldRole::ClearAction
            };
            action = Some((role, attr));
            continue;
        }

        let Some(kind) = RuleKind::from_attribute_name(&ident) else {
            continue;
        };
        if rule.is_some() {
            return Err(model_error(attr, ModelError::DuplicateRule { field: name.clone() }));
        }
        rule = Some((parse_rule(&name, kind, attr)?, attr));
    }

    match (rule, action) {
        (Some(_), Some((_, attr))) => {
            Err(model_error(attr, ModelError::ActionIsValidated { field: name }))
        }
        (Some((model, _)), None) => Ok(FieldRole::Validated(model)),
        (None, Some((role, _))) => Ok(role),
        (None, None) => Ok(FieldRole::Plain),
    }
}

fn parse_rule(name: &str, kind: RuleKind, attr: &Attribute) -> Result<FieldModel> {
    let mut options = RuleOptions::default();

    match &attr.meta {
        Meta::Path(_) => {}
        Meta::List(_) => attr.parse_nested_meta(|meta| parse_option(kind, &mut options, meta))?,
        Meta::NameValue(_) => {
            return Err(Error::new_spanned(
                attr,
                format!("expected `#[{name}]` or `#[{name}(...)]`", name = kind.attribute_name()),
            ));
        }
    }

    let rule = build_rule(kind, &mut options).map_err(|err| match err {
        RuleError::Model(err) => model_error(attr, err),
        RuleError::Syn(err) => err,
    })?;

    let mut field = FieldModel::new(name, rule);
    if let Some(id) = options.error_message_res {
        field = field.with_error_message_res(id);
    }
    if let Some(message) = options.error_message {
        field = field.with_error_message(message);
    }
    if let Some(auto_dismiss) = options.auto_dismiss {
        field = field.with_auto_dismiss(auto_dismiss);
    }
    Ok(field)
}

fn parse_option(kind: RuleKind, options: &mut RuleOptions, meta: ParseNestedMeta) -> Result<()> {
    let Some(option) = meta.path.get_ident().map(ToString::to_string) else {
        return Err(meta.error("expected an option name"));
    };

    if !COMMON_OPTIONS.contains(&option.as_str()) && !kind.options().contains(&option.as_str()) {
        return Err(model_error(
            &meta.path,
            ModelError::UnsupportedOption { rule: kind.attribute_name(), option },
        ));
    }

    match option.as_str() {
        "error_message" => options.error_message = Some(parse_str(&meta)?),
        "error_message_res" => {
            let id = parse_number(&meta)?.text;
            let id = id.parse().map_err(|_| meta.error("expected an i32 resource id"))?;
            options.error_message_res = Some(id);
        }
        "auto_dismiss" => options.auto_dismiss = Some(meta.value()?.parse::<LitBool>()?.value),
        "required" => options.required = Some(meta.value()?.parse::<LitBool>()?.value),
        "pattern" => options.pattern = Some(parse_str(&meta)?),
        "min" => options.min = Some(parse_number(&meta)?),
        "max" => options.max = Some(parse_number(&meta)?),
        "date_format" => options.date_format = Some(parse_str(&meta)?),
        "limit_date" => options.limit_date = Some(parse_str(&meta)?),
        _ => return Err(meta.error("unknown option")),
    }
    Ok(())
}

fn parse_str(meta: &ParseNestedMeta) -> Result<String> {
    Ok(meta.value()?.parse::<LitStr>()?.value())
}

/// Accepts `3`, `-1`, `2.5` and `"2.5"`.
fn parse_number(meta: &ParseNestedMeta) -> Result<Number> {
    let input = meta.value()?;
    let span = input.span();

    if input.peek(LitStr) {
        let lit = input.parse::<LitStr>()?;
        return Ok(Number { text: lit.value().trim().to_string(), span: lit.span() });
    }

    let negative = input.parse::<Option<Token![-]>>()?.is_some();
    let digits = if input.peek(LitFloat) {
        input.parse::<LitFloat>()?.base10_digits().to_string()
    } else {
        input.parse::<LitInt>()?.base10_digits().to_string()
    };

    let text = if negative { format!("-{}", digits) } else { digits };
    Ok(Number { text, span })
}

enum RuleError {
    Model(ModelError),
    Syn(Error),
}

impl From<Error> for RuleError {
    fn from(err: Error) -> Self {
        RuleError::Syn(err)
    }
}

fn require<T>(
    value: Option<T>,
    kind: RuleKind,
    option: &'static str,
) -> std::result::Result<T, RuleError> {
    value.ok_or(RuleError::Model(ModelError::MissingOption { rule: kind.attribute_name(), option }))
}

fn build_rule(kind: RuleKind, options: &mut RuleOptions) -> std::result::Result<Rule, RuleError> {
    let required = options.required.unwrap_or(true);
    let int = |number: &Option<Number>| -> std::result::Result<i64, RuleError> {
        Ok(number.as_ref().map(Number::int).transpose()?.unwrap_or(0))
    };

    let rule = match kind {
        RuleKind::Required => Rule::Required,
        RuleKind::Email => Rule::Email { required },
        RuleKind::ConfirmEmail => Rule::ConfirmEmail,
        RuleKind::Pattern => {
            Rule::Pattern { pattern: require(options.pattern.take(), kind, "pattern")?, required }
        }
        RuleKind::Length => {
            Rule::Length { min: int(&options.min)?, max: int(&options.max)?, required }
        }
        RuleKind::OnlyNumber => Rule::OnlyNumber { required },
        RuleKind::Password => Rule::Password {
            min: int(&options.min)?,
            pattern: options.pattern.take().unwrap_or_default(),
        },
        RuleKind::ConfirmPassword => Rule::ConfirmPassword,
        RuleKind::Cpf => Rule::Cpf { required },
        RuleKind::Cnpj => Rule::Cnpj { required },
        RuleKind::Isbn => Rule::Isbn { required },
        RuleKind::BetweenStart => Rule::BetweenStart,
        RuleKind::BetweenLimit => Rule::BetweenLimit,
        RuleKind::CreditCard => Rule::CreditCard { required },
        RuleKind::NumericLimit => Rule::NumericLimit {
            min: require(options.min.take(), kind, "min")?.text,
            max: require(options.max.take(), kind, "max")?.text,
            required,
        },
        RuleKind::Ipv4 => Rule::Ipv4 { required },
        RuleKind::Ipv6 => Rule::Ipv6 { required },
        RuleKind::Url => Rule::Url { required },
        RuleKind::PastDate => Rule::PastDate {
            date_format: require(options.date_format.take(), kind, "date_format")?,
            limit_date: require(options.limit_date.take(), kind, "limit_date")?,
            required,
        },
        RuleKind::FutureDate => Rule::FutureDate {
            date_format: require(options.date_format.take(), kind, "date_format")?,
            limit_date: require(options.limit_date.take(), kind, "limit_date")?,
            required,
        },
    };
    Ok(rule)
}
