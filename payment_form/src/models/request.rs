//! Request bodies accepted by the payment api.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::payment::PaymentKind;
use crate::utils;

#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    pub card_number: String,
    pub card_holder_name: String,
    /// `YYMM`
    pub expiration_date: String,
    pub cvv: String,
}

impl std::fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardDetails")
            .field("card_number", &utils::mask_digits(&self.card_number))
            .field("card_holder_name", &self.card_holder_name)
            .field("expiration_date", &self.expiration_date)
            .field("cvv", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardPaymentRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency: String,
    pub card: CardDetails,
    pub device_guid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountDetails {
    pub routing_number: String,
    pub account_number: String,
    pub name_on_account: String,
}

impl std::fmt::Debug for BankAccountDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BankAccountDetails")
            .field("routing_number", &self.routing_number)
            .field("account_number", &utils::mask_digits(&self.account_number))
            .field("name_on_account", &self.name_on_account)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AchPaymentRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency: String,
    pub bank_account: BankAccountDetails,
    pub device_guid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
}

/// Normalized request built from a valid form, one variant per payment kind
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentRequest {
    Card(CardPaymentRequest),
    Ach(AchPaymentRequest),
}

impl PaymentRequest {
    pub fn kind(&self) -> PaymentKind {
        match self {
            PaymentRequest::Card(_) => PaymentKind::Card,
            PaymentRequest::Ach(_) => PaymentKind::Ach,
        }
    }

    pub fn amount(&self) -> Decimal {
        match self {
            PaymentRequest::Card(req) => req.amount,
            PaymentRequest::Ach(req) => req.amount,
        }
    }
}
