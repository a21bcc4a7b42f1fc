use derive_more::{Display, Error};

use crate::{forms::payment::FormField, models::payment::PaymentKind};

/// Failures talking to the external payment API.
///
/// The submission workflow does not tell these apart: all of them end in the
/// failed state, carrying either the server message or a static fallback.
#[derive(Debug, Display, Error, PartialEq)]
pub enum GatewayError {
    #[display("transport error: {_0}")]
    Transport(#[error(not(source))] String),
    #[display("payment api answered with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },
    #[display("malformed response body: {_0}")]
    MalformedResponse(#[error(not(source))] String),
}

impl GatewayError {
    /// Message sent by the payment API, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            GatewayError::Rejected {
                message: Some(msg), ..
            } if !msg.trim().is_empty() => Some(msg.as_str()),
            _ => None,
        }
    }

    /// Server message or the given fallback, the text shown to the user
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

#[derive(Debug, Display, Error, PartialEq)]
pub enum FormError {
    #[display("device guid {_0:?} is not a valid uuid")]
    InvalidDeviceGuid(#[error(not(source))] String),
    #[display("amount is fixed by invoice {_0}")]
    AmountLocked(#[error(not(source))] String),
    #[display("field {_0} does not belong to a {_1} form")]
    FieldNotInForm(FormField, PaymentKind),
    #[display("account type only applies to bank transfer forms")]
    NotABankForm,
    #[display("no submission is in flight")]
    NotSubmitting,
}
