//! Text validators

use std::rc::Rc;
use std::sync::LazyLock;

use regex::Regex;

use super::{check, FieldRule};
use crate::ui::TextInput;
use crate::validation::InputBinding;

static EMAIL_REGEX: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+",
        r"@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
        r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    ))
});

/// Compiles a user pattern so that it must match the whole value. `None`
/// for an invalid pattern, which then rejects every value.
fn compile_pattern(pattern: &str) -> Option<Regex> {
    match Regex::new(&format!("^(?:{})$", pattern)) {
        Ok(regex) => Some(regex),
        Err(err) => {
            log::warn!("invalid validation pattern {:?}: {}", pattern, err);
            None
        }
    }
}

pub struct RequiredValidator {
    binding: InputBinding,
}

impl RequiredValidator {
    pub fn new(input: Rc<dyn TextInput>, message: impl Into<String>, auto_dismiss: bool) -> Self {
        Self { binding: InputBinding::new(input, message, auto_dismiss) }
    }
}

impl FieldRule for RequiredValidator {
    fn binding(&self) -> &InputBinding {
        &self.binding
    }

    fn accepts(&self, value: &str) -> bool {
        !value.trim().is_empty()
    }
}

pub struct EmailValidator {
    binding: InputBinding,
    required: bool,
}

impl EmailValidator {
    pub fn new(
        input: Rc<dyn TextInput>,
        message: impl Into<String>,
        auto_dismiss: bool,
        required: bool,
    ) -> Self {
        Self { binding: InputBinding::new(input, message, auto_dismiss), required }
    }
}

impl FieldRule for EmailValidator {
    fn binding(&self) -> &InputBinding {
        &self.binding
    }

    fn accepts(&self, value: &str) -> bool {
        check(self.required, value, |value| {
            EMAIL_REGEX.as_ref().map(|regex| regex.is_match(value)).unwrap_or(false)
        })
    }
}

pub struct PatternValidator {
    binding: InputBinding,
    pattern: Option<Regex>,
    required: bool,
}

impl PatternValidator {
    pub fn new(
        input: Rc<dyn TextInput>,
        message: impl Into<String>,
        pattern: &str,
        auto_dismiss: bool,
        required: bool,
    ) -> Self {
        Self {
            binding: InputBinding::new(input, message, auto_dismiss),
            pattern: compile_pattern(pattern),
            required,
        }
    }
}

impl FieldRule for PatternValidator {
    fn binding(&self) -> &InputBinding {
        &self.binding
    }

    fn accepts(&self, value: &str) -> bool {
        check(self.required, value, |value| {
            self.pattern.as_ref().is_some_and(|pattern| pattern.is_match(value))
        })
    }
}

/// Character count within `min..=max`; `max == 0` means no upper bound.
pub struct LengthValidator {
    binding: InputBinding,
    min: i64,
    max: i64,
    required: bool,
}

impl LengthValidator {
    pub fn new(
        input: Rc<dyn TextInput>,
        message: impl Into<String>,
        min: i64,
        max: i64,
        auto_dismiss: bool,
        required: bool,
    ) -> Self {
        Self { binding: InputBinding::new(input, message, auto_dismiss), min, max, required }
    }
}

impl FieldRule for LengthValidator {
    fn binding(&self) -> &InputBinding {
        &self.binding
    }

    fn accepts(&self, value: &str) -> bool {
        check(self.required, value, |value| {
            let length = value.chars().count() as i64;
            length >= self.min && (self.max == 0 || length <= self.max)
        })
    }
}

/// At least `min` characters and, when given, a match of `pattern`.
pub struct PasswordValidator {
    binding: InputBinding,
    min: i64,
    pattern: String,
    compiled: Option<Regex>,
}

impl PasswordValidator {
    pub fn new(
        input: Rc<dyn TextInput>,
        message: impl Into<String>,
        min: i64,
        pattern: &str,
        auto_dismiss: bool,
    ) -> Self {
        let compiled = if pattern.is_empty() { None } else { compile_pattern(pattern) };
        Self {
            binding: InputBinding::new(input, message, auto_dismiss),
            min,
            pattern: pattern.to_string(),
            compiled,
        }
    }
}

impl FieldRule for PasswordValidator {
    fn binding(&self) -> &InputBinding {
        &self.binding
    }

    fn accepts(&self, value: &str) -> bool {
        if value.is_empty() || (value.chars().count() as i64) < self.min {
            return false;
        }
        self.pattern.is_empty() || self.compiled.as_ref().is_some_and(|regex| regex.is_match(value))
    }
}
