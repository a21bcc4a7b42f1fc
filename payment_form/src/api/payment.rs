//! Payment form controller.
//!
//! Drives one form interaction: field edits go through the formatters, a
//! submit runs the validator and, when it passes, sends exactly one request
//! to the payment api. Status moves `idle -> submitting -> {succeeded,
//! failed} -> idle`; a submit while a request is in flight is ignored.

use chrono::{NaiveDate, Utc};
use log::{debug, error, info, warn};
use rust_decimal::Decimal;

use crate::{
    config::FormConfig,
    errors::{FormError, GatewayError},
    forms::{
        formatter,
        payment::{FormField, InstrumentFields, PaymentForm},
        validator::{self, FieldErrors},
    },
    models::{
        payment::{AccountType, PaymentKind, PaymentResult, SubmissionStatus},
        request::{
            AchPaymentRequest, BankAccountDetails, CardDetails, CardPaymentRequest, PaymentRequest,
        },
    },
    services::{self, ImplFormNotifier, ImplPaymentGateway, notification::Notice},
};

/// Result of trying to start a submission
#[derive(Debug)]
pub enum Submission {
    /// Validation passed, the controller is now `submitting`
    Ready(PaymentRequest),
    Invalid(FieldErrors),
    AlreadySubmitting,
}

#[derive(Debug, PartialEq)]
pub enum SubmitOutcome {
    Invalid(FieldErrors),
    /// A request was already in flight, nothing was sent
    Ignored,
    Succeeded(PaymentResult),
    /// Message shown to the user
    Failed(String),
}

pub struct PaymentFormController {
    config: FormConfig,
    form: PaymentForm,
    status: SubmissionStatus,
    field_errors: FieldErrors,
    last_error: Option<String>,
    last_result: Option<PaymentResult>,
    gateway: ImplPaymentGateway,
    notifier: ImplFormNotifier,
}

impl PaymentFormController {
    pub fn new(
        config: FormConfig,
        gateway: ImplPaymentGateway,
        notifier: ImplFormNotifier,
    ) -> Self {
        Self {
            form: default_form(&config),
            config,
            status: SubmissionStatus::Idle,
            field_errors: FieldErrors::new(),
            last_error: None,
            last_result: None,
            gateway,
            notifier,
        }
    }

    pub fn kind(&self) -> PaymentKind {
        self.config.kind
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn form(&self) -> &PaymentForm {
        &self.form
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn last_result(&self) -> Option<&PaymentResult> {
        self.last_result.as_ref()
    }

    pub fn gateway(&self) -> &dyn services::PaymentGateway {
        self.gateway.as_ref()
    }

    /// The submit trigger is disabled while a request is in flight
    pub fn can_submit(&self) -> bool {
        self.status != SubmissionStatus::Submitting
    }

    /// Stores a keystroke/blur value for `field` after formatting it
    pub fn input(&mut self, field: FormField, raw: &str) -> Result<(), FormError> {
        if let (FormField::Amount, Some(invoice)) = (field, &self.config.invoice) {
            return Err(FormError::AmountLocked(invoice.invoice_id.clone()));
        }

        self.form.set(field, raw)?;
        self.field_errors.remove(&field);
        self.leave_terminal_state();
        Ok(())
    }

    pub fn select_account_type(&mut self, account_type: AccountType) -> Result<(), FormError> {
        self.form.set_account_type(account_type)?;
        self.leave_terminal_state();
        Ok(())
    }

    pub fn validate_at(&self, today: NaiveDate) -> FieldErrors {
        validator::validate(&self.form, today)
    }

    pub fn begin_submission(&mut self) -> Submission {
        self.begin_submission_at(Utc::now().date_naive())
    }

    /// Validates the form (amount included, every time) and moves to
    /// `submitting`, handing back the request to send.
    pub fn begin_submission_at(&mut self, today: NaiveDate) -> Submission {
        if self.status == SubmissionStatus::Submitting {
            warn!("[{}] submit ignored, a payment is in flight", self.kind());
            return Submission::AlreadySubmitting;
        }
        self.leave_terminal_state();

        let errors = validator::validate(&self.form, today);
        let amount = match validator::parse_amount(&self.form.amount) {
            Ok(amount) if errors.is_empty() => amount,
            _ => {
                debug!("[{}] form rejected on {:?}", self.kind(), errors.keys());
                self.field_errors = errors.clone();
                return Submission::Invalid(errors);
            }
        };

        let request = build_request(&self.config, &self.form, amount);
        info!(
            "[{}] submitting {} {}",
            request.kind(),
            request.amount(),
            self.config.currency
        );
        self.field_errors.clear();
        self.last_error = None;
        self.last_result = None;
        self.transition(SubmissionStatus::Submitting);

        Submission::Ready(request)
    }

    /// Applies the payment api answer to an in-flight submission
    pub fn finish_submission(
        &mut self,
        response: Result<PaymentResult, GatewayError>,
    ) -> Result<SubmitOutcome, FormError> {
        if self.status != SubmissionStatus::Submitting {
            return Err(FormError::NotSubmitting);
        }

        Ok(self.apply_response(response))
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        self.submit_at(Utc::now().date_naive()).await
    }

    pub async fn submit_at(&mut self, today: NaiveDate) -> SubmitOutcome {
        let request = match self.begin_submission_at(today) {
            Submission::Ready(request) => request,
            Submission::Invalid(errors) => return SubmitOutcome::Invalid(errors),
            Submission::AlreadySubmitting => return SubmitOutcome::Ignored,
        };

        let response = send_payment(self.gateway.as_ref(), &request).await;
        self.apply_response(response)
    }

    fn apply_response(&mut self, response: Result<PaymentResult, GatewayError>) -> SubmitOutcome {
        let kind = self.kind();

        match response {
            Ok(result) => {
                self.transition(SubmissionStatus::Succeeded);
                info!(
                    "[{kind}] payment accepted, transaction {}",
                    result.transaction_id().unwrap_or("unknown")
                );

                self.notifier.notify(&Notice::Success {
                    kind,
                    message: kind.success_message().to_string(),
                    transaction_id: result.guid.clone(),
                });
                self.form = default_form(&self.config);
                self.field_errors.clear();
                self.last_error = None;
                self.last_result = Some(result.clone());

                SubmitOutcome::Succeeded(result)
            }
            Err(err) => {
                self.transition(SubmissionStatus::Failed);
                error!("[{kind}] payment failed: {err}");

                let message = err.user_message(kind.failure_message());
                self.notifier.notify(&Notice::Failure {
                    kind,
                    message: message.clone(),
                });
                self.last_error = Some(message.clone());

                SubmitOutcome::Failed(message)
            }
        }
    }

    fn leave_terminal_state(&mut self) {
        if self.status.is_terminal() {
            self.transition(SubmissionStatus::Idle);
        }
    }

    fn transition(&mut self, next: SubmissionStatus) {
        debug_assert!(
            self.status.can_transition_to(next),
            "{} -> {next}",
            self.status
        );
        debug!("[{}] {} -> {next}", self.kind(), self.status);
        self.status = next;
    }
}

/// Sends the request to the endpoint of its kind
pub async fn send_payment(
    gateway: &dyn services::PaymentGateway,
    request: &PaymentRequest,
) -> Result<PaymentResult, GatewayError> {
    match request {
        PaymentRequest::Card(card) => gateway.process_card_payment(card).await,
        PaymentRequest::Ach(ach) => gateway.process_ach_payment(ach).await,
    }
}

/// Blank form of the configured kind; invoice forms start with the amount due
fn default_form(config: &FormConfig) -> PaymentForm {
    let mut form = PaymentForm::new(config.kind);
    if let Some(invoice) = &config.invoice {
        form.amount = invoice.amount_for(config.kind).to_string();
        if config.kind == PaymentKind::Card {
            debug!(
                "invoice {} card surcharge {}",
                invoice.invoice_id,
                invoice.card_surcharge()
            );
        }
    }
    form
}

fn build_request(config: &FormConfig, form: &PaymentForm, amount: Decimal) -> PaymentRequest {
    let invoice_id = config.invoice.as_ref().map(|inv| inv.invoice_id.clone());

    match &form.instrument {
        InstrumentFields::Card(card) => PaymentRequest::Card(CardPaymentRequest {
            amount,
            currency: config.currency.clone(),
            card: CardDetails {
                card_number: formatter::strip_card_number(&card.card_number),
                card_holder_name: card.card_holder_name.trim().to_string(),
                expiration_date: card.expiration_date.clone(),
                cvv: card.cvv.clone(),
            },
            device_guid: config.device_guid.clone(),
            invoice_id,
        }),
        InstrumentFields::Bank(bank) => PaymentRequest::Ach(AchPaymentRequest {
            amount,
            currency: config.currency.clone(),
            bank_account: BankAccountDetails {
                routing_number: bank.routing_number.clone(),
                account_number: bank.account_number.clone(),
                name_on_account: bank.name_on_account.trim().to_string(),
            },
            device_guid: config.device_guid.clone(),
            invoice_id,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        consts,
        models::invoice::InvoiceContext,
        services::{MockFormNotifier, MockPaymentGateway},
    };
    use rust_decimal_macros::dec;

    const CARD_GUID: &str = "b28c858c-cdb5-44be-949d-3edbb38069af";
    const ACH_GUID: &str = "412aeec3-05ae-421e-8163-7939eb5cea37";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn approved_result(guid: &str) -> PaymentResult {
        PaymentResult {
            guid: Some(guid.to_string()),
            status: Some("Approved".to_string()),
            ..PaymentResult::default()
        }
    }

    fn silent_notifier() -> MockFormNotifier {
        let mut notifier = MockFormNotifier::new();
        notifier.expect_notify().return_const(());
        notifier
    }

    fn card_controller(
        gateway: MockPaymentGateway,
        notifier: MockFormNotifier,
    ) -> PaymentFormController {
        let config = FormConfig::new(PaymentKind::Card, CARD_GUID, "USD").unwrap();
        PaymentFormController::new(config, Box::new(gateway), Box::new(notifier))
    }

    fn ach_controller(
        gateway: MockPaymentGateway,
        notifier: MockFormNotifier,
    ) -> PaymentFormController {
        let config = FormConfig::new(PaymentKind::Ach, ACH_GUID, "USD").unwrap();
        PaymentFormController::new(config, Box::new(gateway), Box::new(notifier))
    }

    fn fill_card(controller: &mut PaymentFormController) {
        controller.input(FormField::Amount, "100").unwrap();
        controller.input(FormField::CardNumber, "4111111111111111").unwrap();
        controller.input(FormField::CardHolderName, "John Doe").unwrap();
        controller.input(FormField::ExpirationDate, "30/12").unwrap();
        controller.input(FormField::Cvv, "123").unwrap();
    }

    fn fill_bank(controller: &mut PaymentFormController) {
        controller.input(FormField::Amount, "42.50").unwrap();
        controller.input(FormField::RoutingNumber, "021000021").unwrap();
        controller.input(FormField::AccountNumber, "123456789").unwrap();
        controller.input(FormField::NameOnAccount, "Jane Roe").unwrap();
    }

    #[tokio::test]
    async fn test_valid_card_payment_succeeds_and_clears_form() {
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_process_card_payment()
            .withf(|req| {
                req.amount == dec!(100)
                    && req.currency == "USD"
                    && req.card.card_number == "4111111111111111"
                    && req.card.expiration_date == "3012"
                    && req.device_guid == CARD_GUID
                    && req.invoice_id.is_none()
            })
            .times(1)
            .returning(|_| Ok(approved_result("tx-1")));
        gateway.expect_process_ach_payment().never();

        let mut notifier = MockFormNotifier::new();
        notifier
            .expect_notify()
            .withf(|notice| {
                matches!(
                    notice,
                    Notice::Success {
                        kind: PaymentKind::Card,
                        message,
                        transaction_id: Some(id),
                    } if message == consts::CARD_PAYMENT_SUCCESS_MSG && id == "tx-1"
                )
            })
            .times(1)
            .return_const(());

        let mut controller = card_controller(gateway, notifier);
        fill_card(&mut controller);
        assert!(controller.validate_at(today()).is_empty());

        let outcome = controller.submit_at(today()).await;

        assert_eq!(outcome, SubmitOutcome::Succeeded(approved_result("tx-1")));
        assert_eq!(controller.status(), SubmissionStatus::Succeeded);
        assert_eq!(
            controller.last_result().and_then(|r| r.transaction_id()),
            Some("tx-1")
        );
        assert!(controller.last_error().is_none());
        assert!(controller.form().is_blank());
    }

    #[tokio::test]
    async fn test_short_routing_number_never_reaches_the_network() {
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_process_ach_payment().never();

        let mut notifier = MockFormNotifier::new();
        notifier.expect_notify().never();

        let mut controller = ach_controller(gateway, notifier);
        fill_bank(&mut controller);
        controller.input(FormField::RoutingNumber, "12345").unwrap();

        let outcome = controller.submit_at(today()).await;

        let SubmitOutcome::Invalid(errors) = outcome else {
            panic!("expected validation errors, got {outcome:?}");
        };
        assert_eq!(
            errors.get(&FormField::RoutingNumber).map(String::as_str),
            Some(consts::INVALID_ROUTING_NUMBER_MSG)
        );
        assert_eq!(controller.status(), SubmissionStatus::Idle);
        assert_eq!(controller.field_errors(), &errors);
    }

    #[tokio::test]
    async fn test_declined_card_keeps_fields_and_server_message() {
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_process_card_payment()
            .times(1)
            .returning(|_| {
                Err(GatewayError::Rejected {
                    status: 402,
                    message: Some("card declined".to_string()),
                })
            });

        let mut notifier = MockFormNotifier::new();
        notifier
            .expect_notify()
            .withf(|notice| !notice.is_success() && notice.message() == "card declined")
            .times(1)
            .return_const(());

        let mut controller = card_controller(gateway, notifier);
        fill_card(&mut controller);

        let outcome = controller.submit_at(today()).await;

        assert_eq!(outcome, SubmitOutcome::Failed("card declined".to_string()));
        assert_eq!(controller.status(), SubmissionStatus::Failed);
        assert_eq!(controller.last_error(), Some("card declined"));
        assert!(controller.last_result().is_none());
        assert_eq!(
            controller.form().value(FormField::CardNumber),
            Some("4111 1111 1111 1111")
        );
        assert_eq!(controller.form().amount, "100");
    }

    #[tokio::test]
    async fn test_transport_error_uses_fallback_message() {
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_process_ach_payment()
            .times(1)
            .returning(|_| Err(GatewayError::Transport("connection reset".to_string())));

        let mut controller = ach_controller(gateway, silent_notifier());
        fill_bank(&mut controller);

        let outcome = controller.submit_at(today()).await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed(consts::ACH_PAYMENT_FAILED_MSG.to_string())
        );
        assert_eq!(controller.last_error(), Some(consts::ACH_PAYMENT_FAILED_MSG));
    }

    #[tokio::test]
    async fn test_submit_while_submitting_sends_nothing() {
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_process_card_payment()
            .times(1)
            .returning(|_| Ok(approved_result("tx-2")));

        let mut controller = card_controller(gateway, silent_notifier());
        fill_card(&mut controller);

        let Submission::Ready(request) = controller.begin_submission_at(today()) else {
            panic!("form should be valid");
        };
        assert_eq!(controller.status(), SubmissionStatus::Submitting);
        assert!(!controller.can_submit());

        // second trigger while the first request is in flight
        assert_eq!(controller.submit_at(today()).await, SubmitOutcome::Ignored);
        assert!(matches!(
            controller.begin_submission_at(today()),
            Submission::AlreadySubmitting
        ));

        let response = send_payment(controller.gateway(), &request).await;
        let outcome = controller.finish_submission(response).unwrap();

        assert!(matches!(outcome, SubmitOutcome::Succeeded(_)));
        assert!(controller.can_submit());
    }

    #[test]
    fn test_finish_without_submission_is_rejected() {
        let mut controller = card_controller(MockPaymentGateway::new(), silent_notifier());

        assert_eq!(
            controller.finish_submission(Ok(approved_result("tx-3"))),
            Err(FormError::NotSubmitting)
        );
        assert_eq!(controller.status(), SubmissionStatus::Idle);
    }

    #[tokio::test]
    async fn test_edit_after_failure_returns_to_idle_and_retry_sends_again() {
        let mut gateway = MockPaymentGateway::new();
        let mut seq = mockall::Sequence::new();
        gateway
            .expect_process_card_payment()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Err(GatewayError::Rejected {
                    status: 400,
                    message: None,
                })
            });
        gateway
            .expect_process_card_payment()
            .withf(|req| req.card.cvv == "4321")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(approved_result("tx-4")));

        let mut controller = card_controller(gateway, silent_notifier());
        fill_card(&mut controller);

        assert_eq!(
            controller.submit_at(today()).await,
            SubmitOutcome::Failed(consts::CARD_PAYMENT_FAILED_MSG.to_string())
        );

        controller.input(FormField::Cvv, "4321").unwrap();
        assert_eq!(controller.status(), SubmissionStatus::Idle);

        let outcome = controller.submit_at(today()).await;
        assert!(matches!(outcome, SubmitOutcome::Succeeded(_)));
        assert!(controller.last_error().is_none());
    }

    #[tokio::test]
    async fn test_amount_is_revalidated_at_submit() {
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_process_card_payment().never();

        let mut controller = card_controller(gateway, silent_notifier());
        fill_card(&mut controller);
        assert!(controller.validate_at(today()).is_empty());

        controller.input(FormField::Amount, "0").unwrap();
        let outcome = controller.submit_at(today()).await;

        let SubmitOutcome::Invalid(errors) = outcome else {
            panic!("amount 0 must be rejected");
        };
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key(&FormField::Amount));
    }

    #[test]
    fn test_edit_clears_field_error() {
        let mut controller = ach_controller(MockPaymentGateway::new(), silent_notifier());
        fill_bank(&mut controller);
        controller.input(FormField::AccountNumber, "12").unwrap();

        assert!(matches!(
            controller.begin_submission_at(today()),
            Submission::Invalid(_)
        ));
        assert!(controller.field_errors().contains_key(&FormField::AccountNumber));

        controller.input(FormField::AccountNumber, "1234").unwrap();
        assert!(controller.field_errors().is_empty());
    }

    #[test]
    fn test_fields_of_other_kind_are_rejected() {
        let mut controller = card_controller(MockPaymentGateway::new(), silent_notifier());

        assert_eq!(
            controller.input(FormField::RoutingNumber, "021000021"),
            Err(FormError::FieldNotInForm(
                FormField::RoutingNumber,
                PaymentKind::Card
            ))
        );
        assert_eq!(
            controller.select_account_type(AccountType::Savings),
            Err(FormError::NotABankForm)
        );
    }

    #[tokio::test]
    async fn test_invoice_card_form_charges_surcharge() {
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_process_card_payment()
            .withf(|req| {
                req.amount == dec!(103.50)
                    && req.invoice_id.as_deref() == Some("INV-100")
                    && req.currency == "USD"
            })
            .times(1)
            .returning(|_| Ok(approved_result("tx-5")));

        let config = FormConfig::new(PaymentKind::Card, CARD_GUID, "USD")
            .unwrap()
            .with_invoice(InvoiceContext {
                invoice_id: "INV-100".into(),
                amount_due: dec!(100.00),
                currency: "USD".into(),
                card_payment_surcharge: dec!(3.5),
                ..InvoiceContext::default()
            });
        let mut controller =
            PaymentFormController::new(config, Box::new(gateway), Box::new(silent_notifier()));

        assert_eq!(controller.form().amount, "103.50");
        assert_eq!(
            controller.input(FormField::Amount, "1"),
            Err(FormError::AmountLocked("INV-100".into()))
        );

        controller.input(FormField::CardNumber, "4111 1111 1111 1111").unwrap();
        controller.input(FormField::CardHolderName, "John Doe").unwrap();
        controller.input(FormField::ExpirationDate, "3012").unwrap();
        controller.input(FormField::Cvv, "123").unwrap();

        assert!(matches!(
            controller.submit_at(today()).await,
            SubmitOutcome::Succeeded(_)
        ));
        // reset keeps the amount due of the invoice
        assert_eq!(controller.form().amount, "103.50");
        assert_eq!(controller.form().value(FormField::CardNumber), Some(""));
    }

    #[tokio::test]
    async fn test_loaded_invoice_charges_billed_total() {
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_process_card_payment()
            .withf(|req| req.amount == dec!(257.50) && req.invoice_id.as_deref() == Some("INV-7"))
            .times(1)
            .returning(|_| Ok(approved_result("tx-7")));

        let config = FormConfig::new(PaymentKind::Card, CARD_GUID, "USD")
            .unwrap()
            .with_invoice(InvoiceContext {
                invoice_id: "INV-7".into(),
                amount_due: dec!(250.00),
                currency: "USD".into(),
                card_payment_surcharge: dec!(3),
                surcharge_amount: Some(dec!(7.50)),
                total_with_surcharge: Some(dec!(257.50)),
            });
        let mut controller =
            PaymentFormController::new(config, Box::new(gateway), Box::new(silent_notifier()));
        assert_eq!(controller.form().amount, "257.50");

        controller.input(FormField::CardNumber, "4111111111111111").unwrap();
        controller.input(FormField::CardHolderName, "John Doe").unwrap();
        controller.input(FormField::ExpirationDate, "3012").unwrap();
        controller.input(FormField::Cvv, "123").unwrap();

        assert!(matches!(
            controller.submit_at(today()).await,
            SubmitOutcome::Succeeded(_)
        ));
    }

    #[tokio::test]
    async fn test_ach_request_trims_name_and_keeps_digits() {
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_process_ach_payment()
            .withf(|req| {
                req.bank_account.routing_number == "021000021"
                    && req.bank_account.account_number == "123456789"
                    && req.bank_account.name_on_account == "Jane Roe"
                    && req.amount == dec!(42.50)
                    && req.device_guid == ACH_GUID
            })
            .times(1)
            .returning(|_| Ok(approved_result("tx-6")));

        let mut controller = ach_controller(gateway, silent_notifier());
        fill_bank(&mut controller);
        controller.input(FormField::RoutingNumber, "0210-00021").unwrap();
        controller.input(FormField::NameOnAccount, "  Jane Roe ").unwrap();
        controller.select_account_type(AccountType::Savings).unwrap();

        assert!(matches!(
            controller.submit_at(today()).await,
            SubmitOutcome::Succeeded(_)
        ));
        // account type is back to its default after the reset
        assert_eq!(
            controller.form().bank().map(|b| b.account_type),
            Some(AccountType::Checking)
        );
    }
}
