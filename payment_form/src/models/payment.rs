use derive_more::Display;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::consts;

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Display)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    #[display("card")]
    Card,
    /// Bank transfer through the ACH network
    #[display("ach")]
    Ach,
}

impl PaymentKind {
    pub fn endpoint(&self) -> &'static str {
        match self {
            PaymentKind::Card => consts::CARD_PAYMENT_ENDPOINT,
            PaymentKind::Ach => consts::ACH_PAYMENT_ENDPOINT,
        }
    }

    /// Shown when the payment api fails without a message of its own
    pub fn failure_message(&self) -> &'static str {
        match self {
            PaymentKind::Card => consts::CARD_PAYMENT_FAILED_MSG,
            PaymentKind::Ach => consts::ACH_PAYMENT_FAILED_MSG,
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            PaymentKind::Card => consts::CARD_PAYMENT_SUCCESS_MSG,
            PaymentKind::Ach => consts::ACH_PAYMENT_SUCCESS_MSG,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, Display)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    #[default]
    #[display("checking")]
    Checking,
    #[display("savings")]
    Savings,
}

impl std::str::FromStr for AccountType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "checking" => Ok(AccountType::Checking),
            "savings" => Ok(AccountType::Savings),
            other => Err(format!("unknown account type: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, Display)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    #[display("idle")]
    Idle,
    /// Request sent, waiting for the payment api
    #[display("submitting")]
    Submitting,
    #[display("succeeded")]
    Succeeded,
    /// Declined or unreachable, the user can correct and retry
    #[display("failed")]
    Failed,
}

impl SubmissionStatus {
    /// Allowed moves: `idle -> submitting -> {succeeded, failed} -> idle`
    pub fn can_transition_to(&self, next: SubmissionStatus) -> bool {
        matches!(
            (self, next),
            (SubmissionStatus::Idle, SubmissionStatus::Submitting)
                | (SubmissionStatus::Submitting, SubmissionStatus::Succeeded)
                | (SubmissionStatus::Submitting, SubmissionStatus::Failed)
                | (SubmissionStatus::Succeeded, SubmissionStatus::Idle)
                | (SubmissionStatus::Failed, SubmissionStatus::Idle)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionStatus::Succeeded | SubmissionStatus::Failed)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaskedCard {
    pub first6: Option<String>,
    pub last4: Option<String>,
    pub card_type: Option<String>,
    pub card_holder_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaskedBankAccount {
    pub guid: Option<String>,
    pub routing_number: Option<String>,
    pub account_number: Option<String>,
    pub account_number_last_four: Option<String>,
    pub name_on_account: Option<String>,
}

/// Record the payment processor returns for an accepted transaction.
///
/// Only the fields shown to the user are typed; settlement metadata and any
/// other processor data is kept untouched in `extra`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResult {
    pub guid: Option<String>,
    pub status: Option<String>,
    pub time_stamp: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub processor_status_code: Option<String>,
    pub processor_response_message: Option<String>,
    pub auth_code: Option<String>,
    pub approval_code: Option<String>,
    pub ref_number: Option<String>,
    pub customer_receipt: Option<String>,
    pub card: Option<MaskedCard>,
    pub bank_account: Option<MaskedBankAccount>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PaymentResult {
    pub fn transaction_id(&self) -> Option<&str> {
        self.guid.as_deref()
    }

    /// Card or bank account as the processor masked it, e.g. `Visa (411111******1111)`
    pub fn masked_instrument(&self) -> Option<String> {
        if let Some(card) = &self.card {
            return Some(format!(
                "{} ({}******{})",
                card.card_type.as_deref().unwrap_or("card"),
                card.first6.as_deref().unwrap_or(""),
                card.last4.as_deref().unwrap_or("")
            ));
        }

        self.bank_account.as_ref().map(|account| {
            let last_four = account
                .account_number_last_four
                .as_deref()
                .or(account.account_number.as_deref())
                .unwrap_or("");
            format!("account ****{last_four}")
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetails {
    pub payment_method: Option<String>,
    pub last4: Option<String>,
    pub card_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStatus {
    pub transaction_id: Option<String>,
    pub status: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub timestamp: Option<String>,
    pub details: Option<TransactionDetails>,
}
