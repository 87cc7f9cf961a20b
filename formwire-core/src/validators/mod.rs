//! Leaf validators
//!
//! Constructors take the bound input(s) first, then the error message, then
//! the kind-specific parameters in the order generated code passes them.

mod date;
mod documents;
mod network;
mod numeric;
mod paired;
mod text;

pub use date::{FutureDateValidator, PastDateValidator};
pub use documents::{CnpjValidator, CpfValidator, CreditCardValidator, IsbnValidator};
pub use network::{Ipv4Validator, Ipv6Validator, UrlValidator};
pub use numeric::{NumericLimitValidator, OnlyNumberValidator};
pub use paired::{BetweenValidator, ConfirmEmailValidator, ConfirmPasswordValidator};
pub use text::{
    EmailValidator, LengthValidator, PasswordValidator, PatternValidator, RequiredValidator,
};

use crate::validation::{InputBinding, Validator};

/// A check over the text of a single input.
pub trait FieldRule {
    fn binding(&self) -> &InputBinding;

    fn accepts(&self, value: &str) -> bool;
}

impl<R: FieldRule> Validator for R {
    fn validate(&self) -> Result<(), Vec<String>> {
        let binding = self.binding();
        binding.report(self.accepts(&binding.text()))
    }

    fn clear(&self) {
        self.binding().clear()
    }
}

/// Shared handling of the `required` flag. Surrounding whitespace is
/// ignored, so a blank optional value passes without running the check and
/// the check only ever sees trimmed text.
fn check(required: bool, value: &str, rule: impl FnOnce(&str) -> bool) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return !required;
    }
    rule(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_required_flag() {
        assert!(!check(true, "", |_| true));
        assert!(check(false, "", |_| false));
        assert!(!check(false, "x", |_| false));
        assert!(check(true, "x", |_| true));
    }

    #[test]
    fn test_check_ignores_surrounding_whitespace() {
        assert!(check(false, "   ", |_| false));
        assert!(!check(true, " \t ", |_| true));
        assert!(check(true, "  abc ", |value| value == "abc"));
    }
}
