//! Date validators
//!
//! Formats use `chrono` strftime syntax, e.g. `%d/%m/%Y`.

use std::rc::Rc;

use chrono::NaiveDate;

use super::{check, FieldRule};
use crate::ui::TextInput;
use crate::validation::InputBinding;

struct DateLimit {
    format: String,
    limit: Option<NaiveDate>,
}

impl DateLimit {
    fn new(format: &str, limit_date: &str) -> Self {
        let limit = NaiveDate::parse_from_str(limit_date.trim(), format).ok();
        if limit.is_none() {
            log::warn!("limit date {:?} does not match format {:?}", limit_date, format);
        }
        Self { format: format.to_string(), limit }
    }

    /// Parses `value` and compares it with the limit.
    fn compare(&self, value: &str, accept: impl FnOnce(NaiveDate, NaiveDate) -> bool) -> bool {
        match (NaiveDate::parse_from_str(value.trim(), &self.format), self.limit) {
            (Ok(date), Some(limit)) => accept(date, limit),
            _ => false,
        }
    }
}

/// Dates on or after the limit date.
pub struct PastDateValidator {
    binding: InputBinding,
    limit: DateLimit,
    required: bool,
}

impl PastDateValidator {
    pub fn new(
        input: Rc<dyn TextInput>,
        message: impl Into<String>,
        date_format: &str,
        limit_date: &str,
        auto_dismiss: bool,
        required: bool,
    ) -> Self {
        Self {
            binding: InputBinding::new(input, message, auto_dismiss),
            limit: DateLimit::new(date_format, limit_date),
            required,
        }
    }
}

impl FieldRule for PastDateValidator {
    fn binding(&self) -> &InputBinding {
        &self.binding
    }

    fn accepts(&self, value: &str) -> bool {
        check(self.required, value, |value| self.limit.compare(value, |date, limit| date >= limit))
    }
}

/// Dates on or before the limit date.
pub struct FutureDateValidator {
    binding: InputBinding,
    limit: DateLimit,
    required: bool,
}

impl FutureDateValidator {
    pub fn new(
        input: Rc<dyn TextInput>,
        message: impl Into<String>,
        date_format: &str,
        limit_date: &str,
        auto_dismiss: bool,
        required: bool,
    ) -> Self {
        Self {
            binding: InputBinding::new(input, message, auto_dismiss),
            limit: DateLimit::new(date_format, limit_date),
            required,
        }
    }
}

impl FieldRule for FutureDateValidator {
    fn binding(&self) -> &InputBinding {
        &self.binding
    }

    fn accepts(&self, value: &str) -> bool {
        check(self.required, value, |value| self.limit.compare(value, |date, limit| date <= limit))
    }
}
