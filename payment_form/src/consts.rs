use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const DEFAULT_API_BASE_URL: &str = "https://api-vendara.usapayments.com/api/v1";
pub const DEFAULT_CURRENCY: &str = "USD";

pub const CARD_PAYMENT_ENDPOINT: &str = "/payment/card";
pub const ACH_PAYMENT_ENDPOINT: &str = "/payment/ach";
pub const STATUS_ENDPOINT: &str = "/status";
pub const INVOICE_ENDPOINT: &str = "/ghl/my/invoice";

pub const CARD_NUMBER_MIN_DIGITS: usize = 16;
pub const CARD_NUMBER_MAX_DIGITS: usize = 19;
pub const CARD_NUMBER_GROUP_SIZE: usize = 4;
pub const EXPIRATION_DATE_DIGITS: usize = 4;
pub const CVV_MIN_DIGITS: usize = 3;
pub const CVV_MAX_DIGITS: usize = 4;
pub const ROUTING_NUMBER_DIGITS: usize = 9;
pub const ACCOUNT_NUMBER_MIN_DIGITS: usize = 4;
pub const ACCOUNT_NUMBER_MAX_DIGITS: usize = 17;

pub const MONEY_DECIMAL_PLACES: u32 = 2;
pub const ONE_HUNDRED: Decimal = dec!(100);

pub const CARD_PAYMENT_FAILED_MSG: &str = "Payment processing failed";
pub const ACH_PAYMENT_FAILED_MSG: &str = "Bank transfer failed";
pub const STATUS_LOOKUP_FAILED_MSG: &str = "Failed to fetch transaction status";
pub const INVOICE_LOOKUP_FAILED_MSG: &str = "Failed to fetch invoice details";
pub const MISSING_TRANSACTION_ID_MSG: &str = "Please enter a transaction ID";
pub const CARD_PAYMENT_SUCCESS_MSG: &str = "Payment processed successfully!";
pub const ACH_PAYMENT_SUCCESS_MSG: &str = "Bank transfer initiated successfully!";

pub const INVALID_AMOUNT_MSG: &str = "Please enter a valid amount";
pub const INVALID_CARD_NUMBER_MSG: &str = "Please enter a valid card number";
pub const MISSING_CARD_HOLDER_MSG: &str = "Cardholder name is required";
pub const INVALID_EXPIRATION_MSG: &str = "Please enter a valid expiration date (YYMM)";
pub const INVALID_EXPIRATION_MONTH_MSG: &str = "Please enter a valid month (01-12)";
pub const CARD_EXPIRED_MSG: &str = "Card has expired";
pub const INVALID_CVV_MSG: &str = "Please enter a valid CVV (3-4 digits)";
pub const INVALID_ROUTING_NUMBER_MSG: &str = "Routing number must be 9 digits";
pub const INVALID_ACCOUNT_NUMBER_MSG: &str = "Account number must be between 4-17 digits";
pub const MISSING_NAME_ON_ACCOUNT_MSG: &str = "Name on account is required";
