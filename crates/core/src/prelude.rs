//! Prelude
//!
//! The types most callers need when pricing and managing orders.

pub use crate::{
    activity::{ActivityEntry, ActivityKind, ActivityLog},
    customers::{Buyer, BuyerDetails, Customer, CustomerUuid, NewCustomer},
    delivery::{DeliveryPriceResult, DeliveryQuote, calculate_delivery_price, quote_between},
    discounts::{BulkDiscountResult, calculate_bulk_discount, next_discount_tier},
    geo::Coordinates,
    money::Amount,
    orders::{
        BouquetRef, BouquetUuid, Delivery, DeliveryCharge, NewOrder, Order, OrderPatch,
        OrderSummary, OrderUuid, Payments,
    },
    payments::{PaymentInputs, PaymentStatus, PaymentSummary},
    status::{OrderStatus, StatusChange, next_status},
};
