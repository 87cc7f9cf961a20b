//! Numeric validators

use std::rc::Rc;

use super::{check, FieldRule};
use crate::ui::TextInput;
use crate::validation::InputBinding;

pub struct OnlyNumberValidator {
    binding: InputBinding,
    required: bool,
}

impl OnlyNumberValidator {
    pub fn new(
        input: Rc<dyn TextInput>,
        message: impl Into<String>,
        auto_dismiss: bool,
        required: bool,
    ) -> Self {
        Self { binding: InputBinding::new(input, message, auto_dismiss), required }
    }
}

impl FieldRule for OnlyNumberValidator {
    fn binding(&self) -> &InputBinding {
        &self.binding
    }

    fn accepts(&self, value: &str) -> bool {
        check(self.required, value, |value| value.chars().all(|c| c.is_ascii_digit()))
    }
}

/// Value within `min..=max`. Bounds are given as text and parsed once.
pub struct NumericLimitValidator {
    binding: InputBinding,
    bounds: Option<(f64, f64)>,
    required: bool,
}

fn bound(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

impl NumericLimitValidator {
    pub fn new(
        input: Rc<dyn TextInput>,
        message: impl Into<String>,
        auto_dismiss: bool,
        min: &str,
        max: &str,
        required: bool,
    ) -> Self {
        let bounds = bound(min).zip(bound(max));
        if bounds.is_none() {
            log::warn!(
                "invalid numeric limit bounds {:?}..{:?}, every value will be rejected",
                min,
                max
            );
        }
        Self { binding: InputBinding::new(input, message, auto_dismiss), bounds, required }
    }
}

impl FieldRule for NumericLimitValidator {
    fn binding(&self) -> &InputBinding {
        &self.binding
    }

    fn accepts(&self, value: &str) -> bool {
        check(self.required, value, |value| {
            match (self.bounds, value.parse::<f64>()) {
                (Some((min, max)), Ok(value)) => min <= value && value <= max,
                _ => false,
            }
        })
    }
}
