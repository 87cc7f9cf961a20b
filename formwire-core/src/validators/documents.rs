//! Document-number validators: CPF, CNPJ, ISBN and payment cards

use std::rc::Rc;

use super::{check, FieldRule};
use crate::ui::TextInput;
use crate::validation::InputBinding;

/// Digits of `value` once the listed separators are removed. `None` when
/// any other character is present.
fn digits(value: &str, separators: &[char]) -> Option<Vec<u32>> {
    value
        .chars()
        .filter(|c| !separators.contains(c))
        .map(|c| c.to_digit(10))
        .collect()
}

fn all_same(digits: &[u32]) -> bool {
    digits.windows(2).all(|pair| pair[0] == pair[1])
}

/// Mod-11 check digit over `digits` with the given weights.
fn mod11_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(digit, weight)| digit * weight).sum();
    match sum % 11 {
        0 | 1 => 0,
        remainder => 11 - remainder,
    }
}

pub(crate) fn is_cpf(value: &str) -> bool {
    let Some(digits) = digits(value, &['.', '-', ' ']) else {
        return false;
    };
    if digits.len() != 11 || all_same(&digits) {
        return false;
    }

    let first = mod11_digit(&digits[..9], &[10, 9, 8, 7, 6, 5, 4, 3, 2]);
    let second = mod11_digit(&digits[..10], &[11, 10, 9, 8, 7, 6, 5, 4, 3, 2]);
    digits[9] == first && digits[10] == second
}

pub(crate) fn is_cnpj(value: &str) -> bool {
    let Some(digits) = digits(value, &['.', '-', '/', ' ']) else {
        return false;
    };
    if digits.len() != 14 || all_same(&digits) {
        return false;
    }

    let first = mod11_digit(&digits[..12], &[5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2]);
    let second = mod11_digit(&digits[..13], &[6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2]);
    digits[12] == first && digits[13] == second
}

/// ISBN-10 (final `X` allowed) or ISBN-13.
pub(crate) fn is_isbn(value: &str) -> bool {
    let compact: Vec<char> = value.chars().filter(|c| *c != '-' && *c != ' ').collect();

    match compact.len() {
        10 => {
            let mut sum = 0;
            for (index, c) in compact.iter().enumerate() {
                let digit = match (index, c) {
                    (9, 'X' | 'x') => 10,
                    _ => match c.to_digit(10) {
                        Some(digit) => digit,
                        None => return false,
                    },
                };
                sum += digit * (10 - index as u32);
            }
            sum % 11 == 0
        }
        13 => {
            let digits: Option<Vec<u32>> = compact.iter().map(|c| c.to_digit(10)).collect();
            let Some(digits) = digits else {
                return false;
            };
            let sum: u32 = digits
                .iter()
                .enumerate()
                .map(|(index, digit)| if index % 2 == 0 { *digit } else { digit * 3 })
                .sum();
            sum % 10 == 0
        }
        _ => false,
    }
}

/// 13 to 19 digits passing the Luhn check.
pub(crate) fn is_credit_card(value: &str) -> bool {
    let Some(digits) = digits(value, &[' ', '-']) else {
        return false;
    };
    if !(13..=19).contains(&digits.len()) {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(index, digit)| {
            if index % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                *digit
            }
        })
        .sum();
    sum % 10 == 0
}

macro_rules! document_validator {
    ($(#[$doc:meta])* $name:ident, $check:path) => {
        $(#[$doc])*
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

document_validator!(
    /// Brazilian individual taxpayer number, with or without punctuation.
    CpfValidator,
    is_cpf
);
document_validator!(
    /// Brazilian company registration number, with or without punctuation.
    CnpjValidator,
    is_cnpj
);
document_validator!(IsbnValidator, is_isbn);
document_validator!(CreditCardValidator, is_credit_card);
