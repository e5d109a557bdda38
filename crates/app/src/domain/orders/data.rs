//! Orders Data

use bloom::{
    customers::{BuyerDetails, CustomerUuid},
    geo::Coordinates,
    money::Amount,
    orders::{BouquetUuid, Order, OrderUuid, Payments},
    payments::PaymentStatus,
    status::OrderStatus,
};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Default page size for [`OrderFilter`].
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Data for a new order.
///
/// The unit price is not part of this: it is read from the catalog when the order is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrder {
    /// Optional caller-chosen id; generated when omitted.
    pub uuid: Option<OrderUuid>,

    /// Links the order to a directory entry. Its details are copied onto the order.
    pub customer: Option<CustomerUuid>,

    /// Inline buyer details, used when no customer is linked.
    pub buyer: BuyerDetails,

    /// Catalog bouquet; its current price becomes the order's unit price.
    pub bouquet: BouquetUuid,

    /// Number of stems. Must be at least one.
    pub quantity: u32,

    pub delivery_address: String,
    pub scheduled_at: Option<Timestamp>,

    /// Used to quote delivery when no manual price is given.
    pub destination: Option<Coordinates>,

    /// Overrides the zone price. Required when the destination cannot be priced.
    pub manual_delivery_price: Option<Amount>,

    /// Payments taken up front. Negative amounts are read as zero.
    #[serde(default)]
    pub payments: Payments,

    #[serde(default)]
    pub status: OrderStatus,

    pub notes: Option<String>,
}

/// Listing filter. Empty fields match every order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,

    /// Compared against the status derived from current amounts.
    pub payment_status: Option<PaymentStatus>,

    /// Case-insensitive match on buyer name, phone number and bouquet name.
    pub search: Option<String>,

    /// Matches to skip.
    pub offset: usize,

    /// Page size, [`DEFAULT_PAGE_SIZE`] unless set.
    pub limit: usize,
}

impl Default for OrderFilter {
    fn default() -> Self {
        Self {
            status: None,
            payment_status: None,
            search: None,
            offset: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl OrderFilter {
    /// Whether `order` passes every set criterion. Pagination is not considered.
    pub fn matches(&self, order: &Order) -> bool {
        if self.status.is_some_and(|status| status != order.status()) {
            return false;
        }

        // Payment status is derived, so it is recomputed here rather than read from storage.
        if self
            .payment_status
            .is_some_and(|status| status != order.payment_status())
        {
            return false;
        }

        let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
        else {
            return true;
        };

        let needle = search.to_lowercase();
        let buyer = &order.buyer().details;

        [
            &buyer.buyer_name,
            &buyer.phone_number,
            &order.bouquet().name,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// A page of results plus the number of matches overall.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,

    /// Matches before pagination.
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::helpers::{create_order, order};

    use super::*;

    #[test]
    fn negative_payments_in_request_are_read_as_zero() -> TestResult {
        let mut request = serde_json::to_value(create_order(BouquetUuid::new(), 1))?;
        request["payments"] = serde_json::json!({
            "down_payment_amount": -5000,
            "additional_payment": -1,
        });

        let create: CreateOrder = serde_json::from_value(request)?;

        assert_eq!(create.payments, Payments::default());

        Ok(())
    }

    #[test]
    fn default_filter_matches_everything() {
        let filter = OrderFilter::default();

        assert_eq!(filter.limit, DEFAULT_PAGE_SIZE);
        assert!(
            filter.matches(&order(100_000, 1)),
            "empty filter should match"
        );
    }
}
