//! Address validators

use std::net::{Ipv4Addr, Ipv6Addr};
use std::rc::Rc;
use std::sync::LazyLock;

use regex::Regex;

use super::{check, FieldRule};
use crate::ui::TextInput;
use crate::validation::InputBinding;

static URL_REGEX: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^(?i)(https?|ftp)://[^\s/$.?#][^\s]*$"));

fn is_url(value: &str) -> bool {
    URL_REGEX.as_ref().map(|regex| regex.is_match(value)).unwrap_or(false)
}

fn is_ipv4(value: &str) -> bool {
    value.parse::<Ipv4Addr>().is_ok()
}

fn is_ipv6(value: &str) -> bool {
    value.parse::<Ipv6Addr>().is_ok()
}

macro_rules! address_validator {
    ($name:ident, $check:path) => {
        pub struct $name {
            binding: InputBinding,
            required: bool,
        }

        impl $name {
            pub fn new(
                input: Rc<dyn TextInput>,
                message: impl Into<String>,
                auto_dismiss: bool,
                required: bool,
            ) -> Self {
                Self { binding: InputBinding::new(input, message, auto_dismiss), required }
            }
        }

        impl FieldRule for $name {
            fn binding(&self) -> &InputBinding {
                &self.binding
            }

            fn accepts(&self, value: &str) -> bool {
                check(self.required, value, $check)
            }
        }
    };
}

address_validator!(Ipv4Validator, is_ipv4);
address_validator!(Ipv6Validator, is_ipv6);
address_validator!(UrlValidator, is_url);
