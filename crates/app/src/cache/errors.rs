//! Reference cache errors.

use std::sync::Arc;

use thiserror::Error;

/// Errors surfaced by [`ReferenceCache::get`](super::ReferenceCache::get).
#[derive(Debug, Error)]
pub enum CacheError<E> {
    /// The fetch failed. Every caller sharing the request receives the same error.
    #[error("reference data fetch failed: {0}")]
    Fetch(Arc<E>),

    /// This caller's cancellation signal fired before the data arrived.
    #[error("reference data request was cancelled")]
    Cancelled,
}

impl<E> Clone for CacheError<E> {
    fn clone(&self) -> Self {
        match self {
            Self::Fetch(error) => Self::Fetch(Arc::clone(error)),
            Self::Cancelled => Self::Cancelled,
        }
    }
}
