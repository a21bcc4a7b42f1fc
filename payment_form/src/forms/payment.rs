use derive_more::Display;
use serde::Serialize;

use super::formatter;
use crate::{
    errors::FormError,
    models::payment::{AccountType, PaymentKind},
    utils,
};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    #[display("amount")]
    Amount,
    #[display("cardNumber")]
    CardNumber,
    #[display("cardHolderName")]
    CardHolderName,
    #[display("expirationDate")]
    ExpirationDate,
    #[display("cvv")]
    Cvv,
    #[display("routingNumber")]
    RoutingNumber,
    #[display("accountNumber")]
    AccountNumber,
    #[display("nameOnAccount")]
    NameOnAccount,
}

#[derive(Clone, Default, PartialEq)]
pub struct CardFields {
    /// Grouped by four for display, e.g. `4111 1111 1111 1111`
    pub card_number: String,
    pub card_holder_name: String,
    pub expiration_date: String,
    pub cvv: String,
}

impl std::fmt::Debug for CardFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardFields")
            .field("card_number", &utils::mask_digits(&self.card_number))
            .field("card_holder_name", &self.card_holder_name)
            .field("expiration_date", &self.expiration_date)
            .field("cvv", &"***")
            .finish()
    }
}

#[derive(Clone, Default, PartialEq)]
pub struct BankFields {
    pub routing_number: String,
    pub account_number: String,
    pub name_on_account: String,
    pub account_type: AccountType,
}

impl std::fmt::Debug for BankFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BankFields")
            .field("routing_number", &self.routing_number)
            .field("account_number", &utils::mask_digits(&self.account_number))
            .field("name_on_account", &self.name_on_account)
            .field("account_type", &self.account_type)
            .finish()
    }
}

/// Instrument fields. A form holds exactly one variant, picked by its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum InstrumentFields {
    Card(CardFields),
    Bank(BankFields),
}

/// Field values of one form interaction, as stored after formatting
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentForm {
    /// Raw text, parsed during validation
    pub amount: String,
    pub instrument: InstrumentFields,
}

impl PaymentForm {
    pub fn new(kind: PaymentKind) -> Self {
        let instrument = match kind {
            PaymentKind::Card => InstrumentFields::Card(CardFields::default()),
            PaymentKind::Ach => InstrumentFields::Bank(BankFields::default()),
        };

        Self {
            amount: String::new(),
            instrument,
        }
    }

    pub fn kind(&self) -> PaymentKind {
        match self.instrument {
            InstrumentFields::Card(_) => PaymentKind::Card,
            InstrumentFields::Bank(_) => PaymentKind::Ach,
        }
    }

    pub fn card(&self) -> Option<&CardFields> {
        match &self.instrument {
            InstrumentFields::Card(card) => Some(card),
            InstrumentFields::Bank(_) => None,
        }
    }

    pub fn bank(&self) -> Option<&BankFields> {
        match &self.instrument {
            InstrumentFields::Bank(bank) => Some(bank),
            InstrumentFields::Card(_) => None,
        }
    }

    pub fn value(&self, field: FormField) -> Option<&str> {
        let value = match (&self.instrument, field) {
            (_, FormField::Amount) => &self.amount,
            (InstrumentFields::Card(card), FormField::CardNumber) => &card.card_number,
            (InstrumentFields::Card(card), FormField::CardHolderName) => &card.card_holder_name,
            (InstrumentFields::Card(card), FormField::ExpirationDate) => &card.expiration_date,
            (InstrumentFields::Card(card), FormField::Cvv) => &card.cvv,
            (InstrumentFields::Bank(bank), FormField::RoutingNumber) => &bank.routing_number,
            (InstrumentFields::Bank(bank), FormField::AccountNumber) => &bank.account_number,
            (InstrumentFields::Bank(bank), FormField::NameOnAccount) => &bank.name_on_account,
            _ => return None,
        };

        Some(value.as_str())
    }

    /// Formats `raw` for `field` and stores it
    pub fn set(&mut self, field: FormField, raw: &str) -> Result<(), FormError> {
        let kind = self.kind();
        let formatted = formatter::format_field(field, raw);

        let slot = match (&mut self.instrument, field) {
            (_, FormField::Amount) => &mut self.amount,
            (InstrumentFields::Card(card), FormField::CardNumber) => &mut card.card_number,
            (InstrumentFields::Card(card), FormField::CardHolderName) => {
                &mut card.card_holder_name
            }
            (InstrumentFields::Card(card), FormField::ExpirationDate) => {
                &mut card.expiration_date
            }
            (InstrumentFields::Card(card), FormField::Cvv) => &mut card.cvv,
            (InstrumentFields::Bank(bank), FormField::RoutingNumber) => &mut bank.routing_number,
            (InstrumentFields::Bank(bank), FormField::AccountNumber) => &mut bank.account_number,
            (InstrumentFields::Bank(bank), FormField::NameOnAccount) => {
                &mut bank.name_on_account
            }
            _ => return Err(FormError::FieldNotInForm(field, kind)),
        };

        *slot = formatted;
        Ok(())
    }

    pub fn set_account_type(&mut self, account_type: AccountType) -> Result<(), FormError> {
        match &mut self.instrument {
            InstrumentFields::Bank(bank) => {
                bank.account_type = account_type;
                Ok(())
            }
            InstrumentFields::Card(_) => Err(FormError::NotABankForm),
        }
    }

    pub fn is_blank(&self) -> bool {
        *self == Self::new(self.kind())
    }
}
