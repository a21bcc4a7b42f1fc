use clap::{Args, Parser, Subcommand};
use envconfig::Envconfig;
use log::debug;
use payment_form::{
    api::{invoice, payment::PaymentFormController, status},
    config::{FormConfig, PortalConfig},
    forms::payment::FormField,
    logger,
    models::{
        invoice::InvoiceContext,
        payment::{AccountType, PaymentKind},
    },
    services::{PaymentGateway, gateway::HttpPaymentGateway, notification::LogNotifier},
};
use rust_decimal::Decimal;

use crate::utils;

/// Pays an invoice instead of a free amount
#[derive(Args, Debug, Clone)]
pub struct InvoiceArgs {
    /// Loads the invoice of the session from the payment api
    #[arg(long, conflicts_with = "invoice_id")]
    my_invoice: bool,
    #[arg(long, requires = "amount_due")]
    invoice_id: Option<String>,
    #[arg(long, requires = "invoice_id")]
    amount_due: Option<Decimal>,
    /// Defaults to the configured currency
    #[arg(long)]
    invoice_currency: Option<String>,
    /// Percent added to card payments of the invoice
    #[arg(long, default_value = "0")]
    card_surcharge: Decimal,
}

impl InvoiceArgs {
    fn context(&self) -> Option<InvoiceContext> {
        let (invoice_id, amount_due) = (self.invoice_id.clone()?, self.amount_due?);

        Some(InvoiceContext {
            invoice_id,
            amount_due,
            currency: self.invoice_currency.clone().unwrap_or_default(),
            card_payment_surcharge: self.card_surcharge,
            surcharge_amount: None,
            total_with_surcharge: None,
        })
    }

    async fn apply(
        &self,
        form_config: FormConfig,
        gateway: &dyn PaymentGateway,
    ) -> anyhow::Result<FormConfig> {
        let invoice = if self.my_invoice {
            let loaded = invoice::load_invoice(gateway).await;
            Some(loaded.map_err(anyhow::Error::msg)?)
        } else {
            self.context()
        };

        Ok(match invoice {
            Some(invoice) => form_config.with_invoice(invoice),
            None => form_config,
        })
    }
}

#[derive(Args, Debug, Clone)]
pub struct PayCardArgs {
    /// Ignored when paying an invoice
    #[arg(short, long)]
    amount: Option<String>,
    #[arg(long)]
    card_number: String,
    #[arg(long)]
    card_holder_name: String,
    /// YYMM
    #[arg(long)]
    expiration_date: String,
    #[arg(long)]
    cvv: String,
    #[command(flatten)]
    invoice: InvoiceArgs,
}

#[derive(Args, Debug, Clone)]
pub struct PayAchArgs {
    #[arg(short, long)]
    amount: Option<String>,
    #[arg(long)]
    routing_number: String,
    #[arg(long)]
    account_number: String,
    #[arg(long)]
    name_on_account: String,
    #[arg(long, default_value = "checking")]
    account_type: AccountType,
    #[command(flatten)]
    invoice: InvoiceArgs,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    transaction_id: String,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Action {
    /// Submits a card payment
    PayCard(PayCardArgs),
    /// Submits a bank transfer (ACH)
    PayAch(PayAchArgs),
    /// Looks a transaction up
    Status(StatusArgs),
}

/// Command line front of the payment portal
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct AppArgs {
    #[arg(short, long)]
    pub verbose: bool,
    #[command(subcommand)]
    pub action: Action,
}

impl AppArgs {
    pub async fn run(&self) -> anyhow::Result<()> {
        let config = PortalConfig::init_from_env()?;
        logger::setup_simple_logger(self.verbose || !config.is_prod())?;
        let gateway = HttpPaymentGateway::from_config(&config);
        debug!(
            "payment api at {} ({})",
            config.payment_api_base_url, config.env
        );

        match &self.action {
            Action::PayCard(args) => {
                let form_config = args
                    .invoice
                    .apply(config.form_config(PaymentKind::Card)?, &gateway)
                    .await?;
                let mut controller = PaymentFormController::new(
                    form_config,
                    Box::new(gateway),
                    Box::new(LogNotifier),
                );

                if let Some(amount) = &args.amount
                    && controller.config().invoice.is_none()
                {
                    controller.input(FormField::Amount, amount)?;
                }
                controller.input(FormField::CardNumber, &args.card_number)?;
                controller.input(FormField::CardHolderName, &args.card_holder_name)?;
                controller.input(FormField::ExpirationDate, &args.expiration_date)?;
                controller.input(FormField::Cvv, &args.cvv)?;

                utils::report_outcome(controller.submit().await)
            }
            Action::PayAch(args) => {
                let form_config = args
                    .invoice
                    .apply(config.form_config(PaymentKind::Ach)?, &gateway)
                    .await?;
                let mut controller = PaymentFormController::new(
                    form_config,
                    Box::new(gateway),
                    Box::new(LogNotifier),
                );

                if let Some(amount) = &args.amount
                    && controller.config().invoice.is_none()
                {
                    controller.input(FormField::Amount, amount)?;
                }
                controller.input(FormField::RoutingNumber, &args.routing_number)?;
                controller.input(FormField::AccountNumber, &args.account_number)?;
                controller.input(FormField::NameOnAccount, &args.name_on_account)?;
                controller.select_account_type(args.account_type)?;

                utils::report_outcome(controller.submit().await)
            }
            Action::Status(StatusArgs { transaction_id }) => {
                let found = status::check_transaction_status(&gateway, transaction_id)
                    .await
                    .map_err(anyhow::Error::msg)?;

                utils::print_json(&found)
            }
        }
    }
}
