pub mod invoice;
pub mod payment;
pub mod request;
