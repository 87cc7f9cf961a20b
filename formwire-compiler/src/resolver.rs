//! Rule resolution
//!
//! Turns the fields of a [`ClassModel`] into an ordered list of
//! [`ValidatorDescriptor`]s. Single-field kinds resolve on their own.
//! Dependent kinds (`confirm_email`, `confirm_password`, `between_start`)
//! look for the first declared field of their partner kind; when there is
//! none the dependent field simply produces no descriptor.
//!
//! Every descriptor carries its constructor arguments in the exact order the
//! runtime validator expects:
//!
//! | Validator | Arguments after field(s) |
//! |---|---|
//! | Required | msg, auto_dismiss |
//! | Email, OnlyNumber, Cpf, Cnpj, Isbn | msg, auto_dismiss, required |
//! | CreditCard, Ipv4, Ipv6, Url | msg, auto_dismiss, required |
//! | ConfirmEmail, ConfirmPassword | msg, auto_dismiss |
//! | Pattern | msg, pattern, auto_dismiss, required |
//! | Length | msg, min, max, auto_dismiss, required |
//! | Password | msg, min, pattern, auto_dismiss |
//! | Between | start msg, limit msg, start auto_dismiss, limit auto_dismiss |
//! | NumericLimit | msg, auto_dismiss, min, max, required |
//! | PastDate, FutureDate | msg, date_format, limit_date, auto_dismiss, required |

use serde::{Deserialize, Serialize};

use crate::message::ErrorMessageSource;
use crate::model::{ClassModel, FieldModel, Pairing, Rule, RuleKind};

/// Runtime validator types. Paired rule kinds collapse into one validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidatorKind {
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
    Between,
    CreditCard,
    NumericLimit,
    Ipv4,
    Ipv6,
    Url,
    PastDate,
    FutureDate,
}

impl ValidatorKind {
    /// Type name under the runtime's `validators` module.
    pub fn type_name(self) -> &'static str {
        match self {
            ValidatorKind::Required => "RequiredValidator",
            ValidatorKind::Email => "EmailValidator",
            ValidatorKind::ConfirmEmail => "ConfirmEmailValidator",
            ValidatorKind::Pattern => "PatternValidator",
            ValidatorKind::Length => "LengthValidator",
            ValidatorKind::OnlyNumber => "OnlyNumberValidator",
            ValidatorKind::Password => "PasswordValidator",
            ValidatorKind::ConfirmPassword => "ConfirmPasswordValidator",
            ValidatorKind::Cpf => "CpfValidator",
            ValidatorKind::Cnpj => "CnpjValidator",
            ValidatorKind::Isbn => "IsbnValidator",
            ValidatorKind::Between => "BetweenValidator",
            ValidatorKind::CreditCard => "CreditCardValidator",
            ValidatorKind::NumericLimit => "NumericLimitValidator",
            ValidatorKind::Ipv4 => "Ipv4Validator",
            ValidatorKind::Ipv6 => "Ipv6Validator",
            ValidatorKind::Url => "UrlValidator",
            ValidatorKind::PastDate => "PastDateValidator",
            ValidatorKind::FutureDate => "FutureDateValidator",
        }
    }
}

/// A literal constructor argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Arg {
    Bool(bool),
    Int(i64),
    Str(String),
    /// A second error message, used by the limit side of a between pair.
    Message(ErrorMessageSource),
}

/// A resolved, ready-to-emit validator instantiation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorDescriptor {
    pub kind: ValidatorKind,
    /// One or two host members the validator binds to, in constructor order.
    pub targets: Vec<String>,
    pub message: ErrorMessageSource,
    /// Remaining constructor arguments, in constructor order.
    pub args: Vec<Arg>,
}

impl ValidatorDescriptor {
    fn single(kind: ValidatorKind, field: &FieldModel, args: Vec<Arg>) -> Self {
        Self { kind, targets: vec![field.name.clone()], message: field.message_source(), args }
    }

    fn paired(
        kind: ValidatorKind,
        first: &FieldModel,
        second: &FieldModel,
        message: ErrorMessageSource,
        args: Vec<Arg>,
    ) -> Self {
        Self { kind, targets: vec![first.name.clone(), second.name.clone()], message, args }
    }
}

/// Resolves every field of `class`, in declaration order.
pub fn resolve(class: &ClassModel) -> Vec<ValidatorDescriptor> {
    class.fields.iter().filter_map(|field| resolve_field(&class.fields, field)).collect()
}

/// First field in declaration order declaring `kind`.
pub fn first_of_kind(fields: &[FieldModel], kind: RuleKind) -> Option<&FieldModel> {
    fields.iter().find(|field| field.kind() == kind)
}

fn partner_of<'a>(fields: &'a [FieldModel], field: &FieldModel) -> Option<&'a FieldModel> {
    match field.kind().pairing() {
        Pairing::Dependent { partner } => first_of_kind(fields, partner),
        Pairing::Single | Pairing::PartnerOnly => None,
    }
}

fn resolve_field(fields: &[FieldModel], field: &FieldModel) -> Option<ValidatorDescriptor> {
    use ValidatorKind as K;

    let auto_dismiss = Arg::Bool(field.auto_dismiss);
    let flag = |value: &bool| Arg::Bool(*value);

    let descriptor = match &field.rule {
        Rule::Required => ValidatorDescriptor::single(K::Required, field, vec![auto_dismiss]),
        Rule::Email { required } => {
            ValidatorDescriptor::single(K::Email, field, vec![auto_dismiss, flag(required)])
        }
        Rule::OnlyNumber { required } => {
            ValidatorDescriptor::single(K::OnlyNumber, field, vec![auto_dismiss, flag(required)])
        }
        Rule::Cpf { required } => {
            ValidatorDescriptor::single(K::Cpf, field, vec![auto_dismiss, flag(required)])
        }
        Rule::Cnpj { required } => {
            ValidatorDescriptor::single(K::Cnpj, field, vec![auto_dismiss, flag(required)])
        }
        Rule::Isbn { required } => {
            ValidatorDescriptor::single(K::Isbn, field, vec![auto_dismiss, flag(required)])
        }
        Rule::CreditCard { required } => {
            ValidatorDescriptor::single(K::CreditCard, field, vec![auto_dismiss, flag(required)])
        }
        Rule::Ipv4 { required } => {
            ValidatorDescriptor::single(K::Ipv4, field, vec![auto_dismiss, flag(required)])
        }
        Rule::Ipv6 { required } => {
            ValidatorDescriptor::single(K::Ipv6, field, vec![auto_dismiss, flag(required)])
        }
        Rule::Url { required } => {
            ValidatorDescriptor::single(K::Url, field, vec![auto_dismiss, flag(required)])
        }
        Rule::Pattern { pattern, required } => ValidatorDescriptor::single(
            K::Pattern,
            field,
            vec![Arg::Str(pattern.clone()), auto_dismiss, flag(required)],
        ),
        Rule::Length { min, max, required } => ValidatorDescriptor::single(
            K::Length,
            field,
            vec![Arg::Int(*min), Arg::Int(*max), auto_dismiss, flag(required)],
        ),
        Rule::Password { min, pattern } => ValidatorDescriptor::single(
            K::Password,
            field,
            vec![Arg::Int(*min), Arg::Str(pattern.clone()), auto_dismiss],
        ),
        Rule::NumericLimit { min, max, required } => ValidatorDescriptor::single(
            K::NumericLimit,
            field,
            vec![auto_dismiss, Arg::Str(min.clone()), Arg::Str(max.clone()), flag(required)],
        ),
        Rule::PastDate { date_format, limit_date, required } => ValidatorDescriptor::single(
            K::PastDate,
            field,
            vec![
                Arg::Str(date_format.clone()),
                Arg::Str(limit_date.clone()),
                auto_dismiss,
                flag(required),
            ],
        ),
        Rule::FutureDate { date_format, limit_date, required } => ValidatorDescriptor::single(
            K::FutureDate,
            field,
            vec![
                Arg::Str(date_format.clone()),
                Arg::Str(limit_date.clone()),
                auto_dismiss,
                flag(required),
            ],
        ),
        Rule::ConfirmEmail => {
            let email = partner_of(fields, field)?;
            ValidatorDescriptor::paired(
                K::ConfirmEmail,
                email,
                field,
                field.message_source(),
                vec![auto_dismiss],
            )
        }
        Rule::ConfirmPassword => {
            let password = partner_of(fields, field)?;
            ValidatorDescriptor::paired(
                K::ConfirmPassword,
                password,
                field,
                field.message_source(),
                vec![auto_dismiss],
            )
        }
        Rule::BetweenStart => {
            let limit = partner_of(fields, field)?;
            ValidatorDescriptor::paired(
                K::Between,
                field,
                limit,
                field.message_source(),
                vec![
                    Arg::Message(limit.message_source()),
                    auto_dismiss,
                    Arg::Bool(limit.auto_dismiss),
                ],
            )
        }
        Rule::BetweenLimit => return None,
    };

    Some(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ClassModel;

    fn class(fields: Vec<FieldModel>) -> ClassModel {
        fields.into_iter().fold(ClassModel::new("Form", "on_valid"), ClassModel::with_field)
    }

    fn email(name: &str) -> FieldModel {
        FieldModel::new(name, Rule::Email { required: true })
    }

    #[test]
    fn test_confirm_email_pairs_in_trigger_order() {
        let class = class(vec![
            email("a"),
            FieldModel::new("b", Rule::Required),
            FieldModel::new("c", Rule::ConfirmEmail),
        ]);

        let descriptors = resolve(&class);
        let kinds: Vec<_> = descriptors.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![ValidatorKind::Email, ValidatorKind::Required, ValidatorKind::ConfirmEmail]
        );
        assert_eq!(descriptors[1].targets, vec!["b"]);
        assert_eq!(descriptors[2].targets, vec!["a", "c"]);
    }

    #[test]
    fn test_unpaired_confirm_is_skipped() {
        let class = class(vec![
            FieldModel::new("b", Rule::Required),
            FieldModel::new("c", Rule::ConfirmEmail),
        ]);

        let descriptors = resolve(&class);
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].kind, ValidatorKind::Required);
    }

    #[test]
    fn test_confirm_pairs_with_first_declared_partner() {
        let class = class(vec![
            email("primary"),
            email("backup"),
            FieldModel::new("confirm", Rule::ConfirmEmail),
        ]);

        let descriptors = resolve(&class);
        assert_eq!(descriptors[2].targets, vec!["primary", "confirm"]);
    }

    #[test]
    fn test_partner_declared_after_dependent_still_pairs() {
        let class = class(vec![
            FieldModel::new("confirm", Rule::ConfirmPassword),
            FieldModel::new("password", Rule::Password { min: 6, pattern: String::new() }),
        ]);

        let descriptors = resolve(&class);
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].kind, ValidatorKind::ConfirmPassword);
        assert_eq!(descriptors[0].targets, vec!["password", "confirm"]);
    }

    #[test]
    fn test_dependent_uses_own_message_and_auto_dismiss() {
        let class = class(vec![
            FieldModel::new("password", Rule::Password { min: 8, pattern: String::new() })
                .with_error_message("weak password"),
            FieldModel::new("confirm", Rule::ConfirmPassword)
                .with_error_message_res(42)
                .with_auto_dismiss(false),
        ]);

        let descriptors = resolve(&class);
        assert_eq!(descriptors[1].message, ErrorMessageSource::Resource(42));
        assert_eq!(descriptors[1].args, vec![Arg::Bool(false)]);
    }

    #[test]
    fn test_between_threads_both_sides() {
        let class = class(vec![
            FieldModel::new("from", Rule::BetweenStart).with_error_message("bad start"),
            FieldModel::new("to", Rule::BetweenLimit)
                .with_error_message_res(7)
                .with_auto_dismiss(false),
        ]);

        let descriptors = resolve(&class);
        assert_eq!(descriptors.len(), 1);
        let between = &descriptors[0];
        assert_eq!(between.kind, ValidatorKind::Between);
        assert_eq!(between.targets, vec!["from", "to"]);
        assert_eq!(between.message, ErrorMessageSource::Literal("bad start".into()));
        assert_eq!(
            between.args,
            vec![
                Arg::Message(ErrorMessageSource::Resource(7)),
                Arg::Bool(true),
                Arg::Bool(false),
            ]
        );
    }

    #[test]
    fn test_between_limit_alone_produces_nothing() {
        let class = class(vec![FieldModel::new("to", Rule::BetweenLimit)]);
        assert!(resolve(&class).is_empty());
    }

    #[test]
    fn test_argument_order_per_kind() {
        let class = class(vec![
            FieldModel::new("code", Rule::Length { min: 2, max: 5, required: false }),
            FieldModel::new(
                "amount",
                Rule::NumericLimit { min: "1".into(), max: "10.5".into(), required: true },
            ),
            FieldModel::new(
                "birthday",
                Rule::PastDate {
                    date_format: "%d/%m/%Y".into(),
                    limit_date: "01/01/2000".into(),
                    required: true,
                },
            )
            .with_auto_dismiss(false),
            FieldModel::new("slug", Rule::Pattern { pattern: "^[a-z]+$".into(), required: true }),
        ]);

        let descriptors = resolve(&class);
        assert_eq!(
            descriptors[0].args,
            vec![Arg::Int(2), Arg::Int(5), Arg::Bool(true), Arg::Bool(false)]
        );
        assert_eq!(
            descriptors[1].args,
            vec![
                Arg::Bool(true),
                Arg::Str("1".into()),
                Arg::Str("10.5".into()),
                Arg::Bool(true),
            ]
        );
        assert_eq!(
            descriptors[2].args,
            vec![
                Arg::Str("%d/%m/%Y".into()),
                Arg::Str("01/01/2000".into()),
                Arg::Bool(false),
                Arg::Bool(true),
            ]
        );
        assert_eq!(
            descriptors[3].args,
            vec![Arg::Str("^[a-z]+$".into()), Arg::Bool(true), Arg::Bool(true)]
        );
    }

    #[test]
    fn test_resource_message_wins_for_every_single_kind() {
        let rules = vec![
            Rule::Required,
            Rule::Email { required: true },
            Rule::OnlyNumber { required: true },
            Rule::Cpf { required: true },
            Rule::Cnpj { required: true },
            Rule::Isbn { required: true },
            Rule::CreditCard { required: true },
            Rule::Ipv4 { required: true },
            Rule::Ipv6 { required: true },
            Rule::Url { required: true },
        ];

        for rule in rules {
            let class = class(vec![FieldModel::new("field", rule)
                .with_error_message_res(3)
                .with_error_message("literal")]);
            assert_eq!(resolve(&class)[0].message, ErrorMessageSource::Resource(3));
        }
    }
}
