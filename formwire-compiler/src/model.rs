//! Class and field models
//!
//! A [`ClassModel`] is what a front end (the derive macro or a model file)
//! hands to the compiler: the annotated fields of one host type in
//! declaration order, the optional action members and the callbacks. Models
//! are immutable once built and are consumed once by the emitter.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::message::{self, ErrorMessageSource};

/// Sentinel for "no error message resource".
pub const UNSET_RESOURCE_ID: i32 = -1;

fn default_true() -> bool {
    true
}

fn unset_resource_id() -> i32 {
    UNSET_RESOURCE_ID
}

/// Closed set of rule kinds a field can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Required,
    Email,
    ConfirmEmail,
    Pattern,
    Length,
    OnlyNumber,
    Password,
    ConfirmPassword,
    Cpf,
    Cnpj,
    Isbn,
    BetweenStart,
    BetweenLimit,
    CreditCard,
    NumericLimit,
    Ipv4,
    Ipv6,
    Url,
    PastDate,
    FutureDate,
}

/// How a rule kind takes part in pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pairing {
    /// Resolves from the field alone.
    Single,
    /// Needs the first declared field of `partner` kind.
    Dependent { partner: RuleKind },
    /// Only ever consumed as somebody's partner.
    PartnerOnly,
}

impl RuleKind {
    pub const ALL: [RuleKind; 20] = [
        RuleKind::Required,
        RuleKind::Email,
        RuleKind::ConfirmEmail,
        RuleKind::Pattern,
        RuleKind::Length,
        RuleKind::OnlyNumber,
        RuleKind::Password,
        RuleKind::ConfirmPassword,
        RuleKind::Cpf,
        RuleKind::Cnpj,
        RuleKind::Isbn,
        RuleKind::BetweenStart,
        RuleKind::BetweenLimit,
        RuleKind::CreditCard,
        RuleKind::NumericLimit,
        RuleKind::Ipv4,
        RuleKind::Ipv6,
        RuleKind::Url,
        RuleKind::PastDate,
        RuleKind::FutureDate,
    ];

    /// Name of the field attribute declaring this kind, e.g. `confirm_email`.
    pub fn attribute_name(self) -> &'static str {
        match self {
            RuleKind::Required => "required",
            RuleKind::Email => "email",
            RuleKind::ConfirmEmail => "confirm_email",
            RuleKind::Pattern => "pattern",
            RuleKind::Length => "length",
            RuleKind::OnlyNumber => "only_number",
            RuleKind::Password => "password",
            RuleKind::ConfirmPassword => "confirm_password",
            RuleKind::Cpf => "cpf",
            RuleKind::Cnpj => "cnpj",
            RuleKind::Isbn => "isbn",
            RuleKind::BetweenStart => "between_start",
            RuleKind::BetweenLimit => "between_limit",
            RuleKind::CreditCard => "credit_card",
            RuleKind::NumericLimit => "numeric_limit",
            RuleKind::Ipv4 => "ipv4",
            RuleKind::Ipv6 => "ipv6",
            RuleKind::Url => "url",
            RuleKind::PastDate => "past_date",
            RuleKind::FutureDate => "future_date",
        }
    }

    pub fn from_attribute_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.attribute_name() == name)
    }

    pub fn pairing(self) -> Pairing {
        match self {
            RuleKind::ConfirmEmail => Pairing::Dependent { partner: RuleKind::Email },
            RuleKind::ConfirmPassword => Pairing::Dependent { partner: RuleKind::Password },
            RuleKind::BetweenStart => Pairing::Dependent { partner: RuleKind::BetweenLimit },
            RuleKind::BetweenLimit => Pairing::PartnerOnly,
            _ => Pairing::Single,
        }
    }

    /// Kind-specific options accepted on top of the common message and
    /// `auto_dismiss` options.
    pub fn options(self) -> &'static [&'static str] {
        match self {
            RuleKind::Required
            | RuleKind::ConfirmEmail
            | RuleKind::ConfirmPassword
            | RuleKind::BetweenStart
            | RuleKind::BetweenLimit => &[],
            RuleKind::Email
            | RuleKind::OnlyNumber
            | RuleKind::Cpf
            | RuleKind::Cnpj
            | RuleKind::Isbn
            | RuleKind::CreditCard
            | RuleKind::Ipv4
            | RuleKind::Ipv6
            | RuleKind::Url => &["required"],
            RuleKind::Pattern => &["pattern", "required"],
            RuleKind::Length => &["min", "max", "required"],
            RuleKind::Password => &["min", "pattern"],
            RuleKind::NumericLimit => &["min", "max", "required"],
            RuleKind::PastDate | RuleKind::FutureDate => &["date_format", "limit_date", "required"],
        }
    }
}

/// A rule kind together with its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Rule {
    Required,
    Email {
        #[serde(default = "default_true")]
        required: bool,
    },
    ConfirmEmail,
    Pattern {
        pattern: String,
        #[serde(default = "default_true")]
        required: bool,
    },
    Length {
        #[serde(default)]
        min: i64,
        /// `0` means no upper bound.
        #[serde(default)]
        max: i64,
        #[serde(default = "default_true")]
        required: bool,
    },
    OnlyNumber {
        #[serde(default = "default_true")]
        required: bool,
    },
    Password {
        #[serde(default)]
        min: i64,
        #[serde(default)]
        pattern: String,
    },
    ConfirmPassword,
    Cpf {
        #[serde(default = "default_true")]
        required: bool,
    },
    Cnpj {
        #[serde(default = "default_true")]
        required: bool,
    },
    Isbn {
        #[serde(default = "default_true")]
        required: bool,
    },
    BetweenStart,
    BetweenLimit,
    CreditCard {
        #[serde(default = "default_true")]
        required: bool,
    },
    NumericLimit {
        min: String,
        max: String,
        #[serde(default = "default_true")]
        required: bool,
    },
    Ipv4 {
        #[serde(default = "default_true")]
        required: bool,
    },
    Ipv6 {
        #[serde(default = "default_true")]
        required: bool,
    },
    Url {
        #[serde(default = "default_true")]
        required: bool,
    },
    PastDate {
        date_format: String,
        limit_date: String,
        #[serde(default = "default_true")]
        required: bool,
    },
    FutureDate {
        date_format: String,
        limit_date: String,
        #[serde(default = "default_true")]
        required: bool,
    },
}

impl Rule {
    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::Required => RuleKind::Required,
            Rule::Email { .. } => RuleKind::Email,
            Rule::ConfirmEmail => RuleKind::ConfirmEmail,
            Rule::Pattern { .. } => RuleKind::Pattern,
            Rule::Length { .. } => RuleKind::Length,
            Rule::OnlyNumber { .. } => RuleKind::OnlyNumber,
            Rule::Password { .. } => RuleKind::Password,
            Rule::ConfirmPassword => RuleKind::ConfirmPassword,
            Rule::Cpf { .. } => RuleKind::Cpf,
            Rule::Cnpj { .. } => RuleKind::Cnpj,
            Rule::Isbn { .. } => RuleKind::Isbn,
            Rule::BetweenStart => RuleKind::BetweenStart,
            Rule::BetweenLimit => RuleKind::BetweenLimit,
            Rule::CreditCard { .. } => RuleKind::CreditCard,
            Rule::NumericLimit { .. } => RuleKind::NumericLimit,
            Rule::Ipv4 { .. } => RuleKind::Ipv4,
            Rule::Ipv6 { .. } => RuleKind::Ipv6,
            Rule::Url { .. } => RuleKind::Url,
            Rule::PastDate { .. } => RuleKind::PastDate,
            Rule::FutureDate { .. } => RuleKind::FutureDate,
        }
    }
}

/// One annotated field of a host type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldModel {
    pub name: String,
    #[serde(flatten)]
    pub rule: Rule,
    #[serde(default = "unset_resource_id")]
    pub error_message_res: i32,
    #[serde(default)]
    pub error_message: String,
    #[serde(default = "default_true")]
    pub auto_dismiss: bool,
}

impl FieldModel {
    pub fn new(name: impl Into<String>, rule: Rule) -> Self {
        Self {
            name: name.into(),
            rule,
            error_message_res: UNSET_RESOURCE_ID,
            error_message: String::new(),
            auto_dismiss: true,
        }
    }

    pub fn with_error_message_res(mut self, id: i32) -> Self {
        self.error_message_res = id;
        self
    }

    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = message.into();
        self
    }

    pub fn with_auto_dismiss(mut self, auto_dismiss: bool) -> Self {
        self.auto_dismiss = auto_dismiss;
        self
    }

    pub fn kind(&self) -> RuleKind {
        self.rule.kind()
    }

    /// Where this field's error text comes from.
    pub fn message_source(&self) -> ErrorMessageSource {
        message::resolve(self.error_message_res, &self.error_message)
    }
}

/// Visibility given to the generated unit, mirroring the host's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Inherited,
    Crate,
    Public,
}

/// Parameter list of the error callback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorArity {
    /// `fn on_error(&self)`
    #[default]
    None,
    /// `fn on_error(&self, errors: &[String])`
    Errors,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCallback {
    pub method: String,
    #[serde(default)]
    pub arity: ErrorArity,
}

impl ErrorCallback {
    pub fn new(method: impl Into<String>) -> Self {
        Self { method: method.into(), arity: ErrorArity::None }
    }

    pub fn with_errors(method: impl Into<String>) -> Self {
        Self { method: method.into(), arity: ErrorArity::Errors }
    }
}

/// Everything the compiler knows about one host type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassModel {
    /// Path of the host type as written at the use site.
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub fields: Vec<FieldModel>,
    #[serde(default)]
    pub validate_action: Option<String>,
    #[serde(default)]
    pub clear_action: Option<String>,
    pub on_success: String,
    #[serde(default)]
    pub on_error: Option<ErrorCallback>,
}

impl ClassModel {
    pub fn new(name: impl Into<String>, on_success: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Inherited,
            fields: Vec::new(),
            validate_action: None,
            clear_action: None,
            on_success: on_success.into(),
            on_error: None,
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_field(mut self, field: FieldModel) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_validate_action(mut self, member: impl Into<String>) -> Self {
        self.validate_action = Some(member.into());
        self
    }

    pub fn with_clear_action(mut self, member: impl Into<String>) -> Self {
        self.clear_action = Some(member.into());
        self
    }

    pub fn with_on_error(mut self, callback: ErrorCallback) -> Self {
        self.on_error = Some(callback);
        self
    }

    /// Front-end contract checks run before compilation.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.on_success.trim().is_empty() {
            return Err(ModelError::MissingSuccessCallback { class: self.name.clone() });
        }

        for (index, field) in self.fields.iter().enumerate() {
            if self.fields[..index].iter().any(|earlier| earlier.name == field.name) {
                return Err(ModelError::DuplicateField {
                    class: self.name.clone(),
                    field: field.name.clone(),
                });
            }
        }

        for action in [&self.validate_action, &self.clear_action].into_iter().flatten() {
            if self.fields.iter().any(|field| &field.name == action) {
                return Err(ModelError::ActionIsValidated { field: action.clone() });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_names_round_trip() {
        for kind in RuleKind::ALL {
            assert_eq!(RuleKind::from_attribute_name(kind.attribute_name()), Some(kind));
        }
        assert_eq!(RuleKind::from_attribute_name("validate_on_click"), None);
    }

    #[test]
    fn test_pairing_table() {
        assert_eq!(
            RuleKind::ConfirmEmail.pairing(),
            Pairing::Dependent { partner: RuleKind::Email }
        );
        assert_eq!(
            RuleKind::ConfirmPassword.pairing(),
            Pairing::Dependent { partner: RuleKind::Password }
        );
        assert_eq!(
            RuleKind::BetweenStart.pairing(),
            Pairing::Dependent { partner: RuleKind::BetweenLimit }
        );
        assert_eq!(RuleKind::BetweenLimit.pairing(), Pairing::PartnerOnly);
        assert_eq!(RuleKind::Email.pairing(), Pairing::Single);
    }

    #[test]
    fn test_field_defaults() {
        let field = FieldModel::new("username", Rule::Required);
        assert_eq!(field.error_message_res, UNSET_RESOURCE_ID);
        assert_eq!(field.error_message, "");
        assert!(field.auto_dismiss);
        assert_eq!(field.kind(), RuleKind::Required);
    }

    #[test]
    fn test_missing_success_callback_is_rejected() {
        let class = ClassModel::new("LoginForm", "  ");
        assert_eq!(
            class.validate(),
            Err(ModelError::MissingSuccessCallback { class: "LoginForm".into() })
        );
    }

    #[test]
    fn test_duplicate_field_is_rejected() {
        let class = ClassModel::new("LoginForm", "on_valid")
            .with_field(FieldModel::new("email", Rule::Required))
            .with_field(FieldModel::new("email", Rule::Email { required: true }));
        assert!(matches!(class.validate(), Err(ModelError::DuplicateField { .. })));
    }

    #[test]
    fn test_action_member_cannot_be_validated() {
        let class = ClassModel::new("LoginForm", "on_valid")
            .with_field(FieldModel::new("submit", Rule::Required))
            .with_validate_action("submit");
        assert_eq!(
            class.validate(),
            Err(ModelError::ActionIsValidated { field: "submit".into() })
        );
    }

    #[test]
    fn test_model_deserializes_from_toml() {
        let class: ClassModel = toml::from_str(
            r#"
            name = "SignUpForm"
            visibility = "public"
            on_success = "on_valid"
            validate_action = "submit"
            on_error = { method = "on_invalid", arity = "errors" }

            [[fields]]
            name = "username"
            rule = "required"

            [[fields]]
            name = "password"
            rule = "password"
            min = 8

            [[fields]]
            name = "confirm_password"
            rule = "confirm_password"
            error_message_res = 42
            auto_dismiss = false
            "#,
        )
        .unwrap();

        assert_eq!(class.visibility, Visibility::Public);
        assert_eq!(class.fields.len(), 3);
        assert_eq!(class.fields[1].rule, Rule::Password { min: 8, pattern: String::new() });
        assert_eq!(class.fields[2].error_message_res, 42);
        assert!(!class.fields[2].auto_dismiss);
        assert_eq!(class.on_error, Some(ErrorCallback::with_errors("on_invalid")));
        assert!(class.validate().is_ok());
    }
}
