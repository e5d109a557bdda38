//! Customers

pub mod errors;
mod service;

pub use errors::CustomersServiceError;
pub use service::*;
