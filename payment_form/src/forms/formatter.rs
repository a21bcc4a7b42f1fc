//! Keystroke formatters.
//!
//! Each one maps raw user input to the value kept in the form. They never
//! fail: characters that do not fit are dropped. All of them are idempotent.

use super::payment::FormField;
use crate::{consts, utils};

/// `"4111111111111111"` -> `"4111 1111 1111 1111"`
pub fn format_card_number(raw: &str) -> String {
    let digits = utils::digits_only(raw);
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 4);

    for (idx, digit) in digits.chars().enumerate() {
        if idx > 0 && idx % consts::CARD_NUMBER_GROUP_SIZE == 0 {
            formatted.push(' ');
        }
        formatted.push(digit);
    }

    formatted
}

/// Keeps the first four digits, read as `YYMM`
pub fn format_expiration_date(raw: &str) -> String {
    utils::digits_only(raw)
        .chars()
        .take(consts::EXPIRATION_DATE_DIGITS)
        .collect()
}

pub fn format_digits(raw: &str) -> String {
    utils::digits_only(raw)
}

/// Applies the formatter registered for `field`; free text passes through
pub fn format_field(field: FormField, raw: &str) -> String {
    match field {
        FormField::CardNumber => format_card_number(raw),
        FormField::ExpirationDate => format_expiration_date(raw),
        FormField::RoutingNumber | FormField::AccountNumber => format_digits(raw),
        FormField::Amount
        | FormField::CardHolderName
        | FormField::Cvv
        | FormField::NameOnAccount => raw.to_string(),
    }
}

/// Card number as sent to the payment api, grouping spaces removed
pub fn strip_card_number(stored: &str) -> String {
    stored.chars().filter(|c| !c.is_whitespace()).collect()
}
