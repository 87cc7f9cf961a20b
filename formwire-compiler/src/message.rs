//! Error-message sourcing policy

use serde::{Deserialize, Serialize};

use crate::model::UNSET_RESOURCE_ID;

/// Where a validator's error text comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "value", rename_all = "snake_case")]
pub enum ErrorMessageSource {
    /// Looked up on the host at construction time.
    Resource(i32),
    /// Quoted string constant.
    Literal(String),
}

/// Resource id wins whenever it is set; the literal is used otherwise.
pub fn resolve(resource_id: i32, literal: &str) -> ErrorMessageSource {
    if resource_id != UNSET_RESOURCE_ID {
        ErrorMessageSource::Resource(resource_id)
    } else {
        ErrorMessageSource::Literal(literal.to_string())
    }
}
