//! Portal configuration management.
//!
//! Values are read from the environment. Device GUIDs select the processor
//! side channel for each payment kind and are never typed by the user.
//!
//! # Security Notes
//! - `PAYMENT_API_TOKEN` is sensitive and must never be logged
//! - Card and bank data never goes through this module

use envconfig::Envconfig;
use uuid::Uuid;

use crate::{
    consts,
    errors::FormError,
    models::{invoice::InvoiceContext, payment::PaymentKind},
};

#[derive(Envconfig, Clone)]
pub struct PortalConfig {
    /// Environment name (NON-SENSITIVE)
    /// Values: "local", "dev", "staging", "prod"
    #[envconfig(from = "ENV", default = "local")]
    pub env: String,

    /// Payment api base url (NON-SENSITIVE)
    #[envconfig(
        from = "PAYMENT_API_BASE_URL",
        default = "https://api-vendara.usapayments.com/api/v1"
    )]
    pub payment_api_base_url: String,

    /// 🔒 SENSITIVE: bearer token sent to the payment api
    #[envconfig(from = "PAYMENT_API_TOKEN")]
    pub payment_api_token: Option<String>,

    /// Processor channel for card payments (NON-SENSITIVE)
    #[envconfig(from = "CARD_DEVICE_GUID")]
    pub card_device_guid: String,

    /// Processor channel for bank transfers (NON-SENSITIVE)
    #[envconfig(from = "ACH_DEVICE_GUID")]
    pub ach_device_guid: String,

    #[envconfig(from = "PAYMENT_CURRENCY", default = "USD")]
    pub currency: String,
}

impl PortalConfig {
    pub fn is_prod(&self) -> bool {
        self.env.to_lowercase() == "prod"
    }

    pub fn device_guid(&self, kind: PaymentKind) -> &str {
        match kind {
            PaymentKind::Card => &self.card_device_guid,
            PaymentKind::Ach => &self.ach_device_guid,
        }
    }

    /// Settings of a standalone form of the given kind
    pub fn form_config(&self, kind: PaymentKind) -> Result<FormConfig, FormError> {
        FormConfig::new(kind, self.device_guid(kind), &self.currency)
    }
}

/// Settings injected in one form controller
#[derive(Debug, Clone, PartialEq)]
pub struct FormConfig {
    pub kind: PaymentKind,
    pub device_guid: String,
    pub currency: String,
    pub invoice: Option<InvoiceContext>,
}

impl FormConfig {
    pub fn new(kind: PaymentKind, device_guid: &str, currency: &str) -> Result<Self, FormError> {
        let device_guid = device_guid.trim();
        Uuid::parse_str(device_guid)
            .map_err(|_| FormError::InvalidDeviceGuid(device_guid.to_string()))?;

        let currency = match currency.trim() {
            "" => consts::DEFAULT_CURRENCY.to_string(),
            other => other.to_uppercase(),
        };

        Ok(Self {
            kind,
            device_guid: device_guid.to_string(),
            currency,
            invoice: None,
        })
    }

    /// Embeds the form in an invoice page: amount and currency come from it
    pub fn with_invoice(mut self, invoice: InvoiceContext) -> Self {
        if !invoice.currency.trim().is_empty() {
            self.currency = invoice.currency.trim().to_uppercase();
        }
        self.invoice = Some(invoice);
        self
    }
}
