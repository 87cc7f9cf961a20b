//! Validators binding two inputs

use std::rc::Rc;

use crate::ui::TextInput;
use crate::validation::{InputBinding, Validator};

/// The confirmation input must repeat the original exactly.
struct Confirmation {
    original: Rc<dyn TextInput>,
    confirm: InputBinding,
}

impl Confirmation {
    fn new(
        original: Rc<dyn TextInput>,
        confirm: Rc<dyn TextInput>,
        message: impl Into<String>,
        auto_dismiss: bool,
    ) -> Self {
        Self { original, confirm: InputBinding::new(confirm, message, auto_dismiss) }
    }

    fn validate(&self) -> Result<(), Vec<String>> {
        self.confirm.report(self.confirm.text() == self.original.text())
    }
}

pub struct ConfirmEmailValidator(Confirmation);

impl ConfirmEmailValidator {
    pub fn new(
        email: Rc<dyn TextInput>,
        confirm: Rc<dyn TextInput>,
        message: impl Into<String>,
        auto_dismiss: bool,
    ) -> Self {
        Self(Confirmation::new(email, confirm, message, auto_dismiss))
    }
}

impl Validator for ConfirmEmailValidator {
    fn validate(&self) -> Result<(), Vec<String>> {
        self.0.validate()
    }

    fn clear(&self) {
        self.0.confirm.clear()
    }
}

pub struct ConfirmPasswordValidator(Confirmation);

impl ConfirmPasswordValidator {
    pub fn new(
        password: Rc<dyn TextInput>,
        confirm: Rc<dyn TextInput>,
        message: impl Into<String>,
        auto_dismiss: bool,
    ) -> Self {
        Self(Confirmation::new(password, confirm, message, auto_dismiss))
    }
}

impl Validator for ConfirmPasswordValidator {
    fn validate(&self) -> Result<(), Vec<String>> {
        self.0.validate()
    }

    fn clear(&self) {
        self.0.confirm.clear()
    }
}

/// A numeric range entered as two inputs: both must be numbers and the
/// start must not exceed the limit. Each side keeps its own message and
/// dismiss policy.
///
/// Both failing inputs show their error, but a failure reports a single
/// message: the start's when the start side fails, the limit's otherwise.
pub struct BetweenValidator {
    start: InputBinding,
    limit: InputBinding,
}

impl BetweenValidator {
    pub fn new(
        start: Rc<dyn TextInput>,
        limit: Rc<dyn TextInput>,
        start_message: impl Into<String>,
        limit_message: impl Into<String>,
        start_auto_dismiss: bool,
        limit_auto_dismiss: bool,
    ) -> Self {
        Self {
            start: InputBinding::new(start, start_message, start_auto_dismiss),
            limit: InputBinding::new(limit, limit_message, limit_auto_dismiss),
        }
    }
}

fn number(binding: &InputBinding) -> Option<f64> {
    binding.text().trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

impl Validator for BetweenValidator {
    fn validate(&self) -> Result<(), Vec<String>> {
        let (start_ok, limit_ok) = match (number(&self.start), number(&self.limit)) {
            (Some(start), Some(limit)) => (start <= limit, start <= limit),
            (start, limit) => (start.is_some(), limit.is_some()),
        };

        let start = self.start.report(start_ok);
        let limit = self.limit.report(limit_ok);
        start.and(limit)
    }

    fn clear(&self) {
        self.start.clear();
        self.limit.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeInput;

    #[test]
    fn test_confirm_password() {
        let password = FakeInput::with_text("s3cret!!");
        let confirm = FakeInput::with_text("s3cret");
        let validator =
            ConfirmPasswordValidator::new(password.clone(), confirm.clone(), "Mismatch", true);

        assert_eq!(validator.validate(), Err(vec!["Mismatch".to_string()]));
        assert_eq!(password.error(), None);
        assert_eq!(confirm.error().as_deref(), Some("Mismatch"));

        confirm.type_text("s3cret!!");
        assert!(validator.validate().is_ok());
    }

    #[test]
    fn test_confirm_email_clear() {
        let confirm = FakeInput::with_text("b@example.com");
        let validator =
            ConfirmEmailValidator::new(
                FakeInput::with_text("a@example.com"),
                confirm.clone(),
                "Mismatch",
                false,
            );

        assert!(validator.validate().is_err());
        validator.clear();
        assert_eq!(confirm.error(), None);
    }

    #[test]
    fn test_between_ordering() {
        let start = FakeInput::with_text("10");
        let limit = FakeInput::with_text("5");
        let validator = BetweenValidator::new(
            start.clone(),
            limit.clone(),
            "Bad start",
            "Bad limit",
            true,
            false,
        );

        assert_eq!(validator.validate(), Err(vec!["Bad start".to_string()]));
        assert_eq!(start.error().as_deref(), Some("Bad start"));
        assert_eq!(limit.error().as_deref(), Some("Bad limit"));

        limit.type_text("20");
        assert_eq!(limit.error().as_deref(), Some("Bad limit"));
        assert!(validator.validate().is_ok());
        assert_eq!(start.error(), None);
    }

    #[test]
    fn test_between_reports_only_unparseable_side() {
        let start = FakeInput::with_text("abc");
        let limit = FakeInput::with_text("3.5");
        let validator = BetweenValidator::new(
            start.clone(),
            limit.clone(),
            "Bad start",
            "Bad limit",
            true,
            true,
        );

        assert_eq!(validator.validate(), Err(vec!["Bad start".to_string()]));
        assert_eq!(limit.error(), None);
    }

    #[test]
    fn test_between_limit_message_when_only_limit_fails() {
        let start = FakeInput::with_text("1");
        let limit = FakeInput::with_text("lots");
        let validator =
            BetweenValidator::new(
                start.clone(),
                limit.clone(),
                "Bad start",
                "Bad limit",
                true,
                true,
            );

        assert_eq!(validator.validate(), Err(vec!["Bad limit".to_string()]));
        assert_eq!(start.error(), None);
    }
}
