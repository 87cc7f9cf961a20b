//! Compiler error types

/// Contract violations a front end must reject before code is emitted.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("`{class}` declares no success callback")]
    MissingSuccessCallback { class: String },
    #[error("field `{field}` is declared twice in `{class}`")]
    DuplicateField { class: String, field: String },
    #[error("field `{field}` declares more than one validation rule")]
    DuplicateRule { field: String },
    #[error("action member `{field}` cannot also carry a validation rule")]
    ActionIsValidated { field: String },
    #[error("`on_error` and `on_error_with_errors` cannot both be set")]
    ConflictingErrorCallbacks,
    #[error("`#[{rule}]` requires the `{option}` option")]
    MissingOption { rule: &'static str, option: &'static str },
    #[error("`#[{rule}]` does not accept the `{option}` option")]
    UnsupportedOption { rule: &'static str, option: String },
}

/// Names in a model that cannot be turned into Rust tokens.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("`{0}` is not a valid identifier")]
    InvalidIdent(String),
    #[error("`{0}` is not a valid path")]
    InvalidPath(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Render(#[from] RenderError),
}
