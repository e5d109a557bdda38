//! Catalog errors.

use std::sync::Arc;

use thiserror::Error;

use crate::cache::CacheError;

/// Failures reading or writing the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No bouquet or collection with that id.
    #[error("bouquet not found")]
    NotFound,

    /// A write was rejected; names the offending field.
    #[error("invalid data: {0}")]
    InvalidData(&'static str),

    /// The backing source could not answer.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    /// The caller's cancellation signal fired before the data arrived.
    #[error("catalog request cancelled")]
    Cancelled,
}

impl From<CacheError<Self>> for CatalogError {
    fn from(error: CacheError<Self>) -> Self {
        match error {
            CacheError::Fetch(source) => Arc::unwrap_or_clone(source),
            CacheError::Cancelled => Self::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_failure_unwraps_to_source_error() {
        let error = CatalogError::from(CacheError::Fetch(Arc::new(CatalogError::NotFound)));

        assert_eq!(error, CatalogError::NotFound);
    }

    #[test]
    fn cancelled_read_maps_to_cancelled() {
        let error = CatalogError::from(CacheError::<CatalogError>::Cancelled);

        assert_eq!(error, CatalogError::Cancelled);
    }
}
