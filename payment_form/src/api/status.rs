use log::{error, info};

use crate::{consts, models::payment::TransactionStatus, services::PaymentGateway};

/// Looks a transaction up by id; the error is the text shown to the user
pub async fn check_transaction_status(
    gateway: &dyn PaymentGateway,
    transaction_id: &str,
) -> Result<TransactionStatus, String> {
    let transaction_id = transaction_id.trim();
    if transaction_id.is_empty() {
        return Err(consts::MISSING_TRANSACTION_ID_MSG.to_string());
    }

    match gateway.check_status(transaction_id).await {
        Ok(status) => {
            info!(
                "transaction {transaction_id} is {}",
                status.status.as_deref().unwrap_or("unknown")
            );
            Ok(status)
        }
        Err(e) => {
            error!("status lookup of {transaction_id} failed: {e}");
            Err(e.user_message(consts::STATUS_LOOKUP_FAILED_MSG))
        }
    }
}
