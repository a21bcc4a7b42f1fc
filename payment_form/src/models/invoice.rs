use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::payment::PaymentKind;
use crate::consts;

/// Invoice a form is embedded in. Fixes the amount and the currency.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceContext {
    pub invoice_id: String,
    pub amount_due: Decimal,
    pub currency: String,
    /// Percent added to card payments (dual pricing), zero disables it
    #[serde(default)]
    pub card_payment_surcharge: Decimal,
    /// Surcharge as billed by the api
    #[serde(default)]
    pub surcharge_amount: Option<Decimal>,
    /// Card total as billed by the api, wins over the local computation
    #[serde(default)]
    pub total_with_surcharge: Option<Decimal>,
}

impl InvoiceContext {
    /// Amount charged for the given payment kind. Bank transfers pay the
    /// amount due, cards pay it plus the surcharge.
    pub fn amount_for(&self, kind: PaymentKind) -> Decimal {
        match kind {
            PaymentKind::Card => self.total_with_surcharge.unwrap_or_else(|| {
                with_surcharge(self.amount_due, self.card_payment_surcharge)
            }),
            PaymentKind::Ach => self.amount_due,
        }
    }

    pub fn card_surcharge(&self) -> Decimal {
        self.surcharge_amount
            .unwrap_or_else(|| self.amount_for(PaymentKind::Card) - self.amount_due)
    }
}

/// Body of `GET /ghl/my/invoice` once the `data` envelope is removed
#[derive(Debug, Deserialize)]
pub struct InvoiceRecord {
    pub invoice: InvoiceContext,
}

/// `base * (1 + percent / 100)`, rounded half-up to cents
pub fn with_surcharge(base: Decimal, percent: Decimal) -> Decimal {
    if percent <= Decimal::ZERO {
        return base;
    }

    let total = base + base * percent / consts::ONE_HUNDRED;
    total.round_dp_with_strategy(
        consts::MONEY_DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    )
}
