//! Storefront services around the bloom pricing engine: the reference-data cache, catalog,
//! customer directory and order management.

pub mod cache;
pub mod config;
pub mod context;
pub mod domain;
pub mod observability;

#[cfg(test)]
mod test;
