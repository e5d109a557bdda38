//! Catalog
//!
//! Bouquets and collections are reference data: read far more often than they change. Reads
//! go through [`CachedCatalog`], which fronts a [`CatalogSource`] with the reference cache and
//! clears it after every mutation.

pub mod errors;
pub mod models;
mod service;
mod source;

pub use errors::CatalogError;
pub use service::*;
pub use source::*;
