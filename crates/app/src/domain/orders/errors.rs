//! Orders errors.

use thiserror::Error;

use crate::domain::{catalog::CatalogError, customers::CustomersServiceError};

/// Failures reported by an [`OrdersStore`](super::OrdersStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrdersStoreError {
    /// No order with that id.
    #[error("order not found")]
    NotFound,

    /// An order with that id is already stored.
    #[error("order already exists")]
    AlreadyExists,

    /// The backing store could not answer.
    #[error("order store unavailable: {0}")]
    Unavailable(String),
}

/// Failures returned by [`OrdersService`](super::OrdersService).
#[derive(Debug, Error)]
pub enum OrdersServiceError {
    /// No order with that id.
    #[error("order not found")]
    NotFound,

    /// An order with that id already exists.
    #[error("order already exists")]
    AlreadyExists,

    /// Another create or update for the same order has not finished.
    #[error("a submit for this order is already in progress")]
    SubmitInProgress,

    /// Orders need at least one stem.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// No zone price applies and no manual delivery price was given.
    #[error("delivery cannot be priced from the destination; a manual delivery price is required")]
    Undeliverable,

    /// The ordered bouquet is not in the catalog.
    #[error("bouquet not found")]
    BouquetNotFound,

    /// The linked customer is not in the directory.
    #[error("customer not found")]
    CustomerNotFound,

    /// Any other catalog failure.
    #[error("catalog error")]
    Catalog(#[source] CatalogError),

    /// Any other customer directory failure.
    #[error("customer directory error")]
    Customers(#[source] CustomersServiceError),

    /// Store failure other than a missing or duplicate order.
    #[error("order store error")]
    Store(#[source] OrdersStoreError),
}

impl From<OrdersStoreError> for OrdersServiceError {
    fn from(error: OrdersStoreError) -> Self {
        match error {
            OrdersStoreError::NotFound => Self::NotFound,
            OrdersStoreError::AlreadyExists => Self::AlreadyExists,
            OrdersStoreError::Unavailable(_) => Self::Store(error),
        }
    }
}

impl From<CatalogError> for OrdersServiceError {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::NotFound => Self::BouquetNotFound,
            CatalogError::InvalidData(_)
            | CatalogError::Unavailable(_)
            | CatalogError::Cancelled => Self::Catalog(error),
        }
    }
}

impl From<CustomersServiceError> for OrdersServiceError {
    fn from(error: CustomersServiceError) -> Self {
        match error {
            CustomersServiceError::NotFound => Self::CustomerNotFound,
            CustomersServiceError::AlreadyExists
            | CustomersServiceError::MissingRequiredData(_) => Self::Customers(error),
        }
    }
}
