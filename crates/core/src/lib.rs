//! Bloom
//!
//! Order pricing and lifecycle engine for a florist storefront: bulk discount tiers, delivery
//! pricing by distance, payment totals and status, the fulfilment state machine and the
//! append-only activity log. Everything here is synchronous and free of I/O.

pub mod activity;
pub mod customers;
pub mod delivery;
pub mod discounts;
pub mod geo;
pub mod money;
pub mod orders;
pub mod payments;
pub mod prelude;
pub mod status;
pub mod uuids;
