//! # Payment API client
//!
//! Talks JSON over HTTP to the payment processing api. Records come back
//! wrapped as `{ "data": <record>, "message": ... }`; a bare record is
//! accepted too. Error bodies may carry a `message` shown to the user.

use async_trait::async_trait;
use log::{error, info};
use reqwest::StatusCode;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    config::PortalConfig,
    consts,
    errors::GatewayError,
    models::{
        invoice::{InvoiceContext, InvoiceRecord},
        payment::{PaymentKind, PaymentResult, TransactionStatus},
        request::{AchPaymentRequest, CardPaymentRequest},
    },
    utils,
};

#[derive(Clone)]
pub struct HttpPaymentGateway {
    client: reqwest::Client,
    base_url: String,
    /// Bearer token of the logged merchant, when the api asks for one
    auth_token: Option<String>,
}

impl HttpPaymentGateway {
    pub fn new(base_url: &str, auth_token: Option<String>) -> Self {
        Self {
            client: utils::REQUEST_CLIENT.clone(),
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token,
        }
    }

    pub fn from_config(config: &PortalConfig) -> Self {
        Self::new(&config.payment_api_base_url, config.payment_api_token.clone())
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .request(method, self.url(path))
            .header("accept", "application/json")
            .header("content-type", "application/json");

        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, GatewayError> {
        let response = builder.send().await.map_err(|e| {
            error!("payment api unreachable at {path}: {e}");
            GatewayError::Transport(e.to_string())
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            error!("payment api body could not be read at {path}: {e}");
            GatewayError::Transport(e.to_string())
        })?;

        decode_response(status, &body).inspect_err(|e| error!("{path}: {e}"))
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        let builder = self.request(reqwest::Method::POST, path).json(body);
        self.send(path, builder).await
    }
}

#[async_trait]
impl crate::services::PaymentGateway for HttpPaymentGateway {
    async fn process_card_payment(
        &self,
        request: &CardPaymentRequest,
    ) -> Result<PaymentResult, GatewayError> {
        info!(
            "sending card payment of {} {} ({})",
            request.amount,
            request.currency,
            utils::mask_digits(&request.card.card_number)
        );
        self.post_json(PaymentKind::Card.endpoint(), request).await
    }

    async fn process_ach_payment(
        &self,
        request: &AchPaymentRequest,
    ) -> Result<PaymentResult, GatewayError> {
        info!(
            "sending bank transfer of {} {} ({})",
            request.amount,
            request.currency,
            utils::mask_digits(&request.bank_account.account_number)
        );
        self.post_json(PaymentKind::Ach.endpoint(), request).await
    }

    async fn check_status(&self, transaction_id: &str) -> Result<TransactionStatus, GatewayError> {
        let path = format!("{}/{}", consts::STATUS_ENDPOINT, transaction_id);
        let builder = self.request(reqwest::Method::GET, &path);
        self.send(&path, builder).await
    }

    async fn fetch_invoice(&self) -> Result<InvoiceContext, GatewayError> {
        let builder = self.request(reqwest::Method::GET, consts::INVOICE_ENDPOINT);
        let record: InvoiceRecord = self.send(consts::INVOICE_ENDPOINT, builder).await?;
        Ok(record.invoice)
    }
}

/// Maps a status code and raw body to the record or a [`GatewayError`]
pub fn decode_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> Result<T, GatewayError> {
    let parsed = serde_json::from_slice::<serde_json::Value>(body);

    if !status.is_success() {
        let message = parsed.ok().and_then(|value| {
            value
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        });
        return Err(GatewayError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    let mut value = parsed.map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;
    let record = match value.get_mut("data").map(serde_json::Value::take) {
        Some(data) => data,
        None => value,
    };

    serde_json::from_value(record).map_err(|e| GatewayError::MalformedResponse(e.to_string()))
}
