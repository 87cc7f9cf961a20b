//! Code emission
//!
//! Builds the [`GeneratedUnit`] for one host type from its model and its
//! resolved descriptors. The unit holds the validator set in a private field,
//! constructs and wires everything in a private `new`, and exposes a single
//! `init` factory.

use crate::ir::{Expr, FieldDecl, Function, GeneratedUnit, Method, Param, Stmt, TypeRef, Variant};
use crate::model::{ClassModel, ErrorArity};
use crate::options::ProcessingOptions;
use crate::resolver::{Arg, ValidatorDescriptor};

pub const VALIDATOR_SET: &str = "validator_set";
pub const TARGET: &str = "target";
pub const BINDING: &str = "binding";
pub const BUTTON: &str = "button";
pub const VALIDATE_LISTENER: &str = "validate_on_click_listener";
pub const CLEAR_LISTENER: &str = "clear_validations_on_click_listener";

/// Reflective scanning is only used when data binding is on and the host
/// declares no annotated field of its own.
pub fn select_variant(class: &ClassModel, options: &ProcessingOptions) -> Variant {
    if options.data_binding && class.fields.is_empty() {
        Variant::Reflective
    } else {
        Variant::Direct
    }
}

/// Name of the generated unit for `class`.
pub fn unit_name(class: &ClassModel, options: &ProcessingOptions) -> String {
    let host = class.name.rsplit("::").next().unwrap_or(&class.name).trim();
    format!("{}{}", host, options.unit_suffix)
}

pub fn emit(
    class: &ClassModel,
    descriptors: &[ValidatorDescriptor],
    options: &ProcessingOptions,
) -> GeneratedUnit {
    let variant = select_variant(class, options);
    log::debug!(
        "emitting {:?} unit for `{}` with {} validator(s)",
        variant,
        class.name,
        descriptors.len()
    );

    let methods = match variant {
        Variant::Direct => {
            let mut methods = vec![direct_constructor(class, descriptors)];
            if class.validate_action.is_some() {
                methods.push(validate_listener(class));
            }
            if class.clear_action.is_some() {
                methods.push(clear_listener());
            }
            methods.push(init(false));
            methods
        }
        Variant::Reflective => vec![
            reflective_constructor(),
            validate_listener(class),
            clear_listener(),
            init(true),
        ],
    };

    GeneratedUnit {
        doc: format!(
            "Validation wiring for `{}`. Generated by formwire, do not modify.",
            class.name
        ),
        name: unit_name(class, options),
        host: class.name.clone(),
        visibility: class.visibility,
        variant,
        fields: vec![FieldDecl {
            name: VALIDATOR_SET.to_string(),
            ty: TypeRef::SharedValidatorSet,
        }],
        methods,
    }
}

fn validator_set() -> Expr {
    Expr::var(VALIDATOR_SET)
}

fn target() -> Expr {
    Expr::var(TARGET)
}

fn arg(arg: &Arg) -> Expr {
    match arg {
        Arg::Bool(value) => Expr::Bool(*value),
        Arg::Int(value) => Expr::Int(*value),
        Arg::Str(value) => Expr::Str(value.clone()),
        Arg::Message(source) => Expr::Message(source.clone()),
    }
}

/// `validators::<Kind>::new(inputs.., message, args..)`
pub fn validator(descriptor: &ValidatorDescriptor) -> Expr {
    let args = descriptor
        .targets
        .iter()
        .map(|member| Expr::Input(member.clone()))
        .chain(std::iter::once(Expr::Message(descriptor.message.clone())))
        .chain(descriptor.args.iter().map(arg))
        .collect();

    Expr::NewValidator { kind: descriptor.kind, args }
}

fn share_validator_set() -> Stmt {
    Stmt::Let {
        name: VALIDATOR_SET.to_string(),
        mutable: false,
        value: Expr::call(Function::RcNew, vec![validator_set()]),
    }
}

fn construct_self() -> Stmt {
    Stmt::Tail(Expr::ConstructSelf { fields: vec![(VALIDATOR_SET.to_string(), validator_set())] })
}

fn wire_validate(element: Expr) -> Stmt {
    Stmt::Expr(Expr::call(
        Function::Associated(VALIDATE_LISTENER.to_string()),
        vec![validator_set().reference(), element.reference(), target()],
    ))
}

fn wire_clear(element: Expr) -> Stmt {
    Stmt::Expr(Expr::call(
        Function::Associated(CLEAR_LISTENER.to_string()),
        vec![validator_set().reference(), element.reference()],
    ))
}

fn direct_constructor(class: &ClassModel, descriptors: &[ValidatorDescriptor]) -> Method {
    let mut body = vec![Stmt::Let {
        name: VALIDATOR_SET.to_string(),
        mutable: !descriptors.is_empty(),
        value: Expr::NewValidatorSet,
    }];

    body.extend(descriptors.iter().map(|descriptor| {
        Stmt::Expr(validator_set().method("add_validator", vec![validator(descriptor)]))
    }));

    body.push(share_validator_set());

    if let Some(button) = &class.validate_action {
        body.push(wire_validate(Expr::target_field(button)));
    }
    if let Some(button) = &class.clear_action {
        body.push(wire_clear(Expr::target_field(button)));
    }

    body.push(construct_self());

    Method {
        name: "new".to_string(),
        public: false,
        params: vec![Param::new(TARGET, TypeRef::HostRef)],
        returns: Some(TypeRef::SelfType),
        body,
    }
}

fn reflective_constructor() -> Method {
    let binding = || Expr::var(BINDING);

    let body = vec![
        Stmt::If {
            condition: binding().method("has_pending_bindings", vec![]),
            then_branch: vec![Stmt::Expr(binding().method("execute_pending_bindings", vec![]))],
            else_branch: vec![],
        },
        Stmt::Let { name: VALIDATOR_SET.to_string(), mutable: true, value: Expr::NewValidatorSet },
        Stmt::Let {
            name: "views".to_string(),
            mutable: false,
            value: binding().method("root", vec![]).method("validation_views", vec![]),
        },
        Stmt::Let {
            name: "buttons".to_string(),
            mutable: false,
            value: binding().method("root", vec![]).method("action_views", vec![]),
        },
        Stmt::ForEach {
            binding: "view".to_string(),
            iterable: Expr::var("views"),
            body: vec![Stmt::Expr(validator_set().method(
                "add_validators",
                vec![Expr::var("view").method("validators", vec![])],
            ))],
        },
        Stmt::Let {
            name: "actions".to_string(),
            mutable: false,
            value: Expr::call(Function::SelectActions, vec![Expr::var("buttons").reference()]),
        },
        share_validator_set(),
        Stmt::IfSome {
            binding: "validate_button".to_string(),
            value: Expr::var("actions").field("validate"),
            body: vec![wire_validate(Expr::var("validate_button"))],
        },
        Stmt::IfSome {
            binding: "clear_button".to_string(),
            value: Expr::var("actions").field("clear"),
            body: vec![wire_clear(Expr::var("clear_button"))],
        },
        construct_self(),
    ];

    Method {
        name: "new".to_string(),
        public: false,
        params: vec![
            Param::new(TARGET, TypeRef::HostRef),
            Param::new(BINDING, TypeRef::DataBindingRef),
        ],
        returns: Some(TypeRef::SelfType),
        body,
    }
}

fn validate_listener(class: &ClassModel) -> Method {
    let on_error = match &class.on_error {
        None => vec![],
        Some(callback) => {
            let args = match callback.arity {
                ErrorArity::None => vec![],
                ErrorArity::Errors => vec![validator_set().method("errors", vec![]).reference()],
            };
            vec![Stmt::Expr(target().method(callback.method.clone(), args))]
        }
    };

    let verdict = Stmt::If {
        condition: validator_set().method("is_valid", vec![]),
        then_branch: vec![Stmt::Expr(target().method(class.on_success.clone(), vec![]))],
        else_branch: on_error,
    };

    Method {
        name: VALIDATE_LISTENER.to_string(),
        public: false,
        params: vec![
            Param::new(VALIDATOR_SET, TypeRef::SharedValidatorSetRef),
            Param::new(BUTTON, TypeRef::ClickableRef),
            Param::new(TARGET, TypeRef::HostRef),
        ],
        returns: None,
        body: vec![Stmt::OnClick {
            element: Expr::var(BUTTON),
            captures_target: true,
            body: vec![verdict],
        }],
    }
}

fn clear_listener() -> Method {
    Method {
        name: CLEAR_LISTENER.to_string(),
        public: false,
        params: vec![
            Param::new(VALIDATOR_SET, TypeRef::SharedValidatorSetRef),
            Param::new(BUTTON, TypeRef::ClickableRef),
        ],
        returns: None,
        body: vec![Stmt::OnClick {
            element: Expr::var(BUTTON),
            captures_target: false,
            body: vec![Stmt::Expr(validator_set().method("clear_validators", vec![]))],
        }],
    }
}

fn init(with_binding: bool) -> Method {
    let mut params = vec![Param::new(TARGET, TypeRef::HostRef)];
    let mut args = vec![target()];
    if with_binding {
        params.push(Param::new(BINDING, TypeRef::DataBindingRef));
        args.push(Expr::var(BINDING));
    }

    Method {
        name: "init".to_string(),
        public: true,
        params,
        returns: None,
        body: vec![Stmt::Expr(Expr::call(Function::Associated("new".to_string()), args))],
    }
}
