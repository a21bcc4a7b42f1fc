//! # Forms
//!
//! Field state of the payment forms and the pure functions working on it.
//!
//! - [`formatter`] - keystroke input to stored value
//! - [`payment`] - form state for card and bank transfer payments
//! - [`validator`] - field rules, producing a field -> message mapping

pub mod formatter;
pub mod payment;
pub mod validator;
