//! Validator trait and the validator-set aggregate

mod binding;

pub use binding::InputBinding;

use std::cell::RefCell;
use std::rc::Rc;

/// One runtime check bound to one or two inputs.
pub trait Validator {
    /// Checks the bound input(s) and shows or hides their errors.
    ///
    /// Returns the messages of every failure, in display order.
    fn validate(&self) -> Result<(), Vec<String>>;

    /// Hides any error currently shown by this validator.
    fn clear(&self);
}

/// All validators of one host, answering aggregate validity.
///
/// Shared through an `Rc` between the generated unit and its click handlers.
#[derive(Default)]
pub struct ValidatorSet {
    validators: Vec<Rc<dyn Validator>>,
    errors: RefCell<Vec<String>>,
}

impl ValidatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_validator<V: Validator + 'static>(&mut self, validator: V) {
        self.validators.push(Rc::new(validator));
    }

    pub fn add_validators<I>(&mut self, validators: I)
    where
        I: IntoIterator<Item = Rc<dyn Validator>>,
    {
        self.validators.extend(validators);
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Evaluates every validator once, in insertion order.
    ///
    /// Each validator is evaluated even after a failure so that every
    /// invalid input shows its error. The collected messages are available
    /// through [`ValidatorSet::errors`] until the next evaluation.
    pub fn is_valid(&self) -> bool {
        let mut valid = true;
        let mut errors = Vec::new();

        for validator in &self.validators {
            if let Err(messages) = validator.validate() {
                valid = false;
                errors.extend(messages);
            }
        }

        log::debug!(
            "validator set evaluated: {} validator(s), valid = {}, {} error(s)",
            self.validators.len(),
            valid,
            errors.len()
        );

        *self.errors.borrow_mut() = errors;
        valid
    }

    /// Messages of the last evaluation.
    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }

    pub fn clear_validators(&self) {
        for validator in &self.validators {
            validator.clear();
        }
        self.errors.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Scripted {
        verdict: Cell<bool>,
        message: &'static str,
        cleared: Rc<Cell<usize>>,
        evaluated: Rc<Cell<usize>>,
    }

    impl Validator for Scripted {
        fn validate(&self) -> Result<(), Vec<String>> {
            self.evaluated.set(self.evaluated.get() + 1);
            if self.verdict.get() {
                Ok(())
            } else {
                Err(vec![self.message.to_string()])
            }
        }

        fn clear(&self) {
            self.cleared.set(self.cleared.get() + 1);
        }
    }

    fn scripted(
        verdict: bool,
        message: &'static str,
        counters: &(Rc<Cell<usize>>, Rc<Cell<usize>>),
    ) -> Scripted {
        Scripted {
            verdict: Cell::new(verdict),
            message,
            cleared: counters.0.clone(),
            evaluated: counters.1.clone(),
        }
    }

    #[test]
    fn test_empty_set_is_valid() {
        let set = ValidatorSet::new();
        assert!(set.is_empty());
        assert!(set.is_valid());
        assert!(set.errors().is_empty());
    }

    #[test]
    fn test_every_validator_is_evaluated_once() {
        let counters = (Rc::new(Cell::new(0)), Rc::new(Cell::new(0)));
        let mut set = ValidatorSet::new();
        set.add_validator(scripted(false, "first", &counters));
        set.add_validator(scripted(true, "second", &counters));
        set.add_validator(scripted(false, "third", &counters));

        assert!(!set.is_valid());
        assert_eq!(counters.1.get(), 3);
        assert_eq!(set.errors(), vec!["first", "third"]);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let counters = (Rc::new(Cell::new(0)), Rc::new(Cell::new(0)));
        let mut set = ValidatorSet::new();
        set.add_validator(scripted(false, "broken", &counters));

        let first = (set.is_valid(), set.errors());
        let second = (set.is_valid(), set.errors());
        assert_eq!(first, second);
    }

    #[test]
    fn test_clear_validators_resets_errors() {
        let counters = (Rc::new(Cell::new(0)), Rc::new(Cell::new(0)));
        let mut set = ValidatorSet::new();
        set.add_validators(vec![
            Rc::new(scripted(false, "a", &counters)) as Rc<dyn Validator>,
            Rc::new(scripted(false, "b", &counters)) as Rc<dyn Validator>,
        ]);

        assert!(!set.is_valid());
        set.clear_validators();
        assert_eq!(counters.0.get(), 2);
        assert!(set.errors().is_empty());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_failing_range_pair_reports_one_error() {
        use crate::testing::FakeInput;
        use crate::validators::BetweenValidator;

        let start = FakeInput::with_text("10");
        let limit = FakeInput::with_text("5");
        let mut set = ValidatorSet::new();
        set.add_validator(BetweenValidator::new(
            start.clone(),
            limit.clone(),
            "start bad",
            "limit bad",
            true,
            true,
        ));

        assert!(!set.is_valid());
        assert_eq!(set.errors(), vec!["start bad"]);
        assert_eq!(limit.error().as_deref(), Some("limit bad"));
    }
}
