//! Input binding shared by field validators

use std::rc::Rc;

use crate::ui::TextInput;

/// An input together with its error message and dismiss policy.
///
/// With `auto_dismiss` on, a shown error disappears as soon as the input
/// text changes.
pub struct InputBinding {
    input: Rc<dyn TextInput>,
    message: String,
    auto_dismiss: bool,
}

impl InputBinding {
    pub fn new(input: Rc<dyn TextInput>, message: impl Into<String>, auto_dismiss: bool) -> Self {
        if auto_dismiss {
            let weak = Rc::downgrade(&input);
            input.on_text_changed(Box::new(move || {
                if let Some(input) = weak.upgrade() {
                    input.set_error(None);
                }
            }));
        }

        Self { input, message: message.into(), auto_dismiss }
    }

    pub fn text(&self) -> String {
        self.input.text()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn auto_dismiss(&self) -> bool {
        self.auto_dismiss
    }

    /// Shows or hides the error for `valid` and returns the verdict.
    pub fn report(&self, valid: bool) -> Result<(), Vec<String>> {
        if valid {
            self.input.set_error(None);
            Ok(())
        } else {
            self.input.set_error(Some(&self.message));
            Err(vec![self.message.clone()])
        }
    }

    pub fn clear(&self) {
        self.input.set_error(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeInput;

    #[test]
    fn test_report_shows_and_hides_error() {
        let input = FakeInput::new();
        let binding = InputBinding::new(input.clone(), "Required", false);

        assert_eq!(binding.report(false), Err(vec!["Required".to_string()]));
        assert_eq!(input.error().as_deref(), Some("Required"));

        assert_eq!(binding.report(true), Ok(()));
        assert_eq!(input.error(), None);
    }

    #[test]
    fn test_auto_dismiss_clears_on_text_change() {
        let input = FakeInput::new();
        let binding = InputBinding::new(input.clone(), "Required", true);

        let _ = binding.report(false);
        input.type_text("a");
        assert_eq!(input.error(), None);
    }

    #[test]
    fn test_error_stays_without_auto_dismiss() {
        let input = FakeInput::new();
        let binding = InputBinding::new(input.clone(), "Required", false);

        let _ = binding.report(false);
        input.type_text("a");
        assert_eq!(input.error().as_deref(), Some("Required"));
        assert!(!binding.auto_dismiss());
    }
}
