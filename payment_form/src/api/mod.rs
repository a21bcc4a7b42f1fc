//! # API Module
//!
//! Operations a page (or the command line) drives on a payment form.
//!
//! ## Modules
//!
//! - [`invoice`] - Invoice a public payment page pays
//! - [`payment`] - Form controller: input, validation and submission workflow
//! - [`status`] - Transaction status lookup

pub mod invoice;
pub mod payment;
pub mod status;
