//! Intermediate representation of a generated unit
//!
//! The emitter builds these trees; [`crate::render`] lowers them to tokens.
//! Keeping the two apart lets the emitter be tested against expected trees
//! instead of formatted source text.

use crate::message::ErrorMessageSource;
use crate::model::Visibility;
use crate::resolver::ValidatorKind;

/// Emission variant for one host type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Members are accessed directly on the host.
    Direct,
    /// Validators and action elements are discovered by scanning the view tree.
    Reflective,
}

/// The generated type and its associated functions.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedUnit {
    pub doc: String,
    pub name: String,
    /// Host type path.
    pub host: String,
    pub visibility: Visibility,
    pub variant: Variant,
    /// Always private.
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<Method>,
}

impl GeneratedUnit {
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|method| method.name == name)
    }

    /// Public entry points of the unit.
    pub fn public_methods(&self) -> impl Iterator<Item = &Method> {
        self.methods.iter().filter(|method| method.public)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub name: String,
    pub public: bool,
    pub params: Vec<Param>,
    pub returns: Option<TypeRef>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: TypeRef,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self { name: name.into(), ty }
    }
}

/// The handful of types generated code mentions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRef {
    /// `Self`
    SelfType,
    /// `&Rc<Host>`
    HostRef,
    /// `Rc<ValidatorSet>`
    SharedValidatorSet,
    /// `&Rc<ValidatorSet>`
    SharedValidatorSetRef,
    /// `&dyn Clickable`
    ClickableRef,
    /// `&dyn DataBinding`
    DataBindingRef,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Let { name: String, mutable: bool, value: Expr },
    Expr(Expr),
    If { condition: Expr, then_branch: Vec<Stmt>, else_branch: Vec<Stmt> },
    /// `if let Some(binding) = value { body }`
    IfSome { binding: String, value: Expr, body: Vec<Stmt> },
    ForEach { binding: String, iterable: Expr, body: Vec<Stmt> },
    /// Installs `body` as the click handler of `element`. The handler owns a
    /// clone of `validator_set` and, when `captures_target` is set, a weak
    /// reference to the host that is upgraded as `target` on each click.
    OnClick { element: Expr, captures_target: bool, body: Vec<Stmt> },
    /// Trailing expression of a block.
    Tail(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Var(String),
    Field { base: Box<Expr>, name: String },
    Bool(bool),
    Int(i64),
    Str(String),
    /// Error text: a literal or a resource lookup on `target`.
    Message(ErrorMessageSource),
    /// Input handle of host member `target.<name>`.
    Input(String),
    Ref(Box<Expr>),
    /// `ValidatorSet::new()`
    NewValidatorSet,
    /// `validators::<Kind>Validator::new(args)`
    NewValidator { kind: ValidatorKind, args: Vec<Expr> },
    Call { function: Function, args: Vec<Expr> },
    MethodCall { receiver: Box<Expr>, method: String, args: Vec<Expr> },
    /// `Self { name: value, .. }`
    ConstructSelf { fields: Vec<(String, Expr)> },
}

/// Free or associated functions generated code calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Function {
    /// `Self::<name>`
    Associated(String),
    /// `Rc::new`
    RcNew,
    /// `ui::select_actions`
    SelectActions,
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    pub fn target_field(name: impl Into<String>) -> Self {
        Expr::Field { base: Box::new(Expr::var("target")), name: name.into() }
    }

    pub fn field(self, name: impl Into<String>) -> Self {
        Expr::Field { base: Box::new(self), name: name.into() }
    }

    pub fn reference(self) -> Self {
        Expr::Ref(Box::new(self))
    }

    pub fn method(self, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::MethodCall { receiver: Box::new(self), method: method.into(), args }
    }

    pub fn call(function: Function, args: Vec<Expr>) -> Self {
        Expr::Call { function, args }
    }
}
