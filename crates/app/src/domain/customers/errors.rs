//! Customer directory errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustomersServiceError {
    #[error("customer not found")]
    NotFound,

    #[error("customer already exists")]
    AlreadyExists,

    #[error("missing required data: {0}")]
    MissingRequiredData(&'static str),
}
