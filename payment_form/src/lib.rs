//! # Payment form
//!
//! Client side of a payment portal: collects card or bank account (ACH)
//! details, formats and validates them as they are typed and submits a
//! single payment request to an external payment api.
//!
//! Settlement, persistence and card security are the job of that api; this
//! crate only talks JSON to it through [`services::PaymentGateway`].

pub mod api;
pub mod config;
pub mod consts;
pub mod errors;
pub mod forms;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;
