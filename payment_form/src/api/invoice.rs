use log::{error, info};

use crate::{consts, models::invoice::InvoiceContext, services::PaymentGateway};

/// Loads the invoice a public payment page is paying; the error is the text
/// shown to the user
pub async fn load_invoice(gateway: &dyn PaymentGateway) -> Result<InvoiceContext, String> {
    match gateway.fetch_invoice().await {
        Ok(invoice) => {
            info!(
                "invoice {} due {} {}",
                invoice.invoice_id, invoice.amount_due, invoice.currency
            );
            Ok(invoice)
        }
        Err(e) => {
            error!("invoice lookup failed: {e}");
            Err(e.user_message(consts::INVOICE_LOOKUP_FAILED_MSG))
        }
    }
}
