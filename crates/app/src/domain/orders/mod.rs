//! Orders
//!
//! Order creation, listing and the patch/status operations an admin performs, persisted
//! through an [`OrdersStore`]. Submits for the same order never overlap: see [`SubmitGuard`].

pub mod data;
pub mod errors;
mod guard;
mod service;
mod store;

pub use errors::{OrdersServiceError, OrdersStoreError};
pub use guard::{SubmitGuard, SubmitPermit};
pub use service::*;
pub use store::*;
