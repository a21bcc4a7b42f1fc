pub mod gateway;
pub mod notification;

use async_trait::async_trait;

use crate::{
    errors::GatewayError,
    models::{
        invoice::InvoiceContext,
        payment::{PaymentResult, TransactionStatus},
        request::{AchPaymentRequest, CardPaymentRequest},
    },
};

/// External payment api. Settlement, persistence and card security all live
/// behind it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn process_card_payment(
        &self,
        request: &CardPaymentRequest,
    ) -> Result<PaymentResult, GatewayError>;

    async fn process_ach_payment(
        &self,
        request: &AchPaymentRequest,
    ) -> Result<PaymentResult, GatewayError>;

    async fn check_status(&self, transaction_id: &str) -> Result<TransactionStatus, GatewayError>;

    /// Invoice of the merchant session the api token belongs to
    async fn fetch_invoice(&self) -> Result<InvoiceContext, GatewayError>;
}

/// Transient user notifications (toasts) raised by the form controller
#[cfg_attr(test, mockall::automock)]
pub trait FormNotifier: Send + Sync {
    fn notify(&self, notice: &notification::Notice);
}

pub type ImplPaymentGateway = Box<dyn PaymentGateway>;
pub type ImplFormNotifier = Box<dyn FormNotifier>;
