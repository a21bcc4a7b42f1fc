use log::{error, info};

use crate::models::payment::PaymentKind;

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Success {
        kind: PaymentKind,
        message: String,
        transaction_id: Option<String>,
    },
    Failure {
        kind: PaymentKind,
        message: String,
    },
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success { message, .. } | Notice::Failure { message, .. } => message,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Notice::Success { .. })
    }
}

/// Notifier writing notices to the log, used when no ui is attached
#[derive(Clone, Default)]
pub struct LogNotifier;

impl crate::services::FormNotifier for LogNotifier {
    fn notify(&self, notice: &Notice) {
        match notice {
            Notice::Success {
                kind,
                message,
                transaction_id,
            } => info!(
                "[{kind}] {message} (transaction: {})",
                transaction_id.as_deref().unwrap_or("unknown")
            ),
            Notice::Failure { kind, message } => error!("[{kind}] {message}"),
        }
    }
}
