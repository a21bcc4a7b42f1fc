//! Field rules of the payment forms.
//!
//! Every rule runs on every call (no short-circuit) so the user sees all the
//! problems at once. Nothing here does I/O: the current date is an argument.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::{collections::BTreeMap, str::FromStr};

use super::{
    formatter,
    payment::{BankFields, CardFields, FormField, InstrumentFields, PaymentForm},
};
use crate::{consts, utils};

/// Field name -> message. Empty means the form can be submitted.
pub type FieldErrors = BTreeMap<FormField, String>;

pub fn validate(form: &PaymentForm, today: NaiveDate) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if let Err(msg) = parse_amount(&form.amount) {
        errors.insert(FormField::Amount, msg.to_string());
    }

    let checks = match &form.instrument {
        InstrumentFields::Card(card) => card_checks(card, today),
        InstrumentFields::Bank(bank) => bank_checks(bank),
    };
    for (field, check) in checks {
        if let Err(msg) = check {
            errors.insert(field, msg.to_string());
        }
    }

    errors
}

type Check = (FormField, Result<(), &'static str>);

fn card_checks(card: &CardFields, today: NaiveDate) -> Vec<Check> {
    vec![
        (FormField::CardNumber, check_card_number(&card.card_number)),
        (
            FormField::CardHolderName,
            check_required(&card.card_holder_name, consts::MISSING_CARD_HOLDER_MSG),
        ),
        (
            FormField::ExpirationDate,
            check_expiration_date(&card.expiration_date, today),
        ),
        (FormField::Cvv, check_cvv(&card.cvv)),
    ]
}

fn bank_checks(bank: &BankFields) -> Vec<Check> {
    vec![
        (
            FormField::RoutingNumber,
            check_routing_number(&bank.routing_number),
        ),
        (
            FormField::AccountNumber,
            check_account_number(&bank.account_number),
        ),
        (
            FormField::NameOnAccount,
            check_required(&bank.name_on_account, consts::MISSING_NAME_ON_ACCOUNT_MSG),
        ),
    ]
}

/// Required, numeric and strictly positive
pub fn parse_amount(raw: &str) -> Result<Decimal, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(consts::INVALID_AMOUNT_MSG);
    }

    if !is_plain_decimal(raw) {
        return Err(consts::INVALID_AMOUNT_MSG);
    }

    match Decimal::from_str(raw) {
        Ok(amount) if amount > Decimal::ZERO => Ok(amount),
        _ => Err(consts::INVALID_AMOUNT_MSG),
    }
}

/// Optional sign, digits, then at most one `.` followed by digits
fn is_plain_decimal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    utils::is_all_digits(int_part) && frac_part.is_none_or(utils::is_all_digits)
}

/// Checked on the number without its grouping spaces
pub fn check_card_number(stored: &str) -> Result<(), &'static str> {
    let number = formatter::strip_card_number(stored);
    let len = number.len();

    if utils::is_all_digits(&number)
        && (consts::CARD_NUMBER_MIN_DIGITS..=consts::CARD_NUMBER_MAX_DIGITS).contains(&len)
    {
        return Ok(());
    }
    Err(consts::INVALID_CARD_NUMBER_MSG)
}

pub fn check_required(value: &str, msg: &'static str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err(msg);
    }
    Ok(())
}

/// `YYMM`, month in 01..=12 and not before the current month.
///
/// Years compare as two digits against `today.year() % 100`.
pub fn check_expiration_date(value: &str, today: NaiveDate) -> Result<(), &'static str> {
    if value.len() != consts::EXPIRATION_DATE_DIGITS || !utils::is_all_digits(value) {
        return Err(consts::INVALID_EXPIRATION_MSG);
    }

    let (year, month) = value.split_at(2);
    let (Ok(year), Ok(month)) = (year.parse::<u32>(), month.parse::<u32>()) else {
        return Err(consts::INVALID_EXPIRATION_MSG);
    };

    if !(1..=12).contains(&month) {
        return Err(consts::INVALID_EXPIRATION_MONTH_MSG);
    }

    let current_year = today.year().rem_euclid(100) as u32;
    if (year, month) < (current_year, today.month()) {
        return Err(consts::CARD_EXPIRED_MSG);
    }

    Ok(())
}

pub fn check_cvv(value: &str) -> Result<(), &'static str> {
    if utils::is_all_digits(value)
        && (consts::CVV_MIN_DIGITS..=consts::CVV_MAX_DIGITS).contains(&value.len())
    {
        return Ok(());
    }
    Err(consts::INVALID_CVV_MSG)
}

pub fn check_routing_number(value: &str) -> Result<(), &'static str> {
    if utils::is_all_digits(value) && value.len() == consts::ROUTING_NUMBER_DIGITS {
        return Ok(());
    }
    Err(consts::INVALID_ROUTING_NUMBER_MSG)
}

pub fn check_account_number(value: &str) -> Result<(), &'static str> {
    if utils::is_all_digits(value)
        && (consts::ACCOUNT_NUMBER_MIN_DIGITS..=consts::ACCOUNT_NUMBER_MAX_DIGITS)
            .contains(&value.len())
    {
        return Ok(());
    }
    Err(consts::INVALID_ACCOUNT_NUMBER_MSG)
}
