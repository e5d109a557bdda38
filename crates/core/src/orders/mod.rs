//! Orders
//!
//! The [`Order`] aggregate ties the pricing rules together. The unit price is captured once
//! in [`Order::create`] and has no setter, so later catalog changes cannot alter an existing
//! order's total. Totals and the payment status are recomputed on every read.

mod patch;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    activity::{ActivityKind, ActivityLog},
    customers::Buyer,
    delivery::DeliveryPriceResult,
    discounts::{BulkDiscountResult, calculate_bulk_discount},
    geo::Coordinates,
    money::Amount,
    payments::{PaymentStatus, PaymentSummary, summarize},
    status::{OrderStatus, StatusChange},
    uuids::TypedUuid,
};

pub use patch::OrderPatch;

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Bouquet UUID
pub type BouquetUuid = TypedUuid<BouquetRef>;

/// The catalog item an order was placed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BouquetRef {
    /// Catalog id.
    pub uuid: BouquetUuid,

    /// Name as it read when the order was placed.
    pub name: String,
}

/// What the buyer is charged for delivery and how it was derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryCharge {
    /// Amount added to the order total.
    pub price: Amount,

    /// Distance from the shop in kilometres. `None` for manual charges.
    pub distance_km: Option<f64>,

    /// Zone the distance fell into. `None` for manual charges.
    pub zone_label: Option<String>,

    /// Delivery estimate for the zone. `None` for manual charges.
    pub estimated_time: Option<String>,
}

impl DeliveryCharge {
    /// A charge from a zone quote.
    pub fn from_quote(quote: &DeliveryPriceResult) -> Self {
        Self {
            price: quote.price,
            distance_km: Some(quote.distance_km),
            zone_label: Some(quote.zone_label.to_string()),
            estimated_time: Some(quote.estimated_time.to_string()),
        }
    }

    /// A price agreed by hand, e.g. for a destination outside every zone.
    pub const fn manual(price: Amount) -> Self {
        Self {
            price,
            distance_km: None,
            zone_label: None,
            estimated_time: None,
        }
    }
}

/// Delivery metadata on an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    /// Free-text delivery address.
    pub address: String,

    /// Requested delivery time, if any.
    pub scheduled_at: Option<Timestamp>,

    /// Geocoded destination used for zone pricing.
    pub destination: Option<Coordinates>,

    /// Price charged for delivery.
    pub charge: DeliveryCharge,
}

/// Payments received so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payments {
    /// Paid when the order was placed.
    pub down_payment_amount: Amount,

    /// Paid later, typically on delivery.
    pub additional_payment: Amount,
}

/// Input for [`Order::create`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    /// Id for the new order.
    pub uuid: OrderUuid,

    /// Who is paying.
    pub buyer: Buyer,

    /// What was ordered.
    pub bouquet: BouquetRef,

    /// Catalog price at the moment of ordering. Never changes afterwards.
    pub unit_price: Amount,

    /// Number of stems; drives the bulk discount tier.
    pub quantity: u32,

    /// Delivery details and charge.
    pub delivery: Delivery,

    /// Amounts already received.
    pub payments: Payments,

    /// Starting status, usually [`OrderStatus::Inquiring`].
    pub status: OrderStatus,

    /// Free-text notes.
    pub notes: Option<String>,
}

/// An order with its price snapshot and audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    uuid: OrderUuid,
    buyer: Buyer,
    bouquet: BouquetRef,
    unit_price: Amount,
    quantity: u32,
    delivery: Delivery,
    payments: Payments,
    status: OrderStatus,
    notes: Option<String>,
    activity: ActivityLog,
    created_at: Timestamp,
    updated_at: Timestamp,
}

/// Read-side view with every derived figure filled in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    /// Order id.
    pub uuid: OrderUuid,
    /// Buyer name as copied onto the order.
    pub buyer_name: String,
    /// Bouquet name at ordering time.
    pub bouquet_name: String,
    /// Number of stems.
    pub quantity: u32,
    /// Bulk discount on the snapshot price.
    pub discount: BulkDiscountResult,
    /// Delivery charge.
    pub delivery_price: Amount,
    /// Totals and derived payment status.
    pub payment: PaymentSummary,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Display label for `status`.
    pub status_label: &'static str,
    /// Display label for the payment status.
    pub payment_label: &'static str,
}

impl Order {
    /// Create an order, freezing `new.unit_price` as its price snapshot.
    pub fn create(new: NewOrder, now: Timestamp) -> Self {
        let mut activity = ActivityLog::new();

        activity.record(
            now,
            ActivityKind::Created,
            format!(
                "Pesanan dibuat: {}x {} @ {}",
                new.quantity,
                new.bouquet.name,
                new.unit_price.format_idr()
            ),
        );

        Self {
            uuid: new.uuid,
            buyer: new.buyer,
            bouquet: new.bouquet,
            unit_price: new.unit_price,
            quantity: new.quantity,
            delivery: new.delivery,
            payments: new.payments,
            status: new.status,
            notes: new.notes,
            activity,
            created_at: now,
            updated_at: now,
        }
    }

    /// Order id.
    pub const fn uuid(&self) -> OrderUuid {
        self.uuid
    }

    /// Buyer details as copied onto the order.
    pub const fn buyer(&self) -> &Buyer {
        &self.buyer
    }

    /// The bouquet ordered.
    pub const fn bouquet(&self) -> &BouquetRef {
        &self.bouquet
    }

    /// Unit price captured when the order was created.
    pub const fn unit_price(&self) -> Amount {
        self.unit_price
    }

    /// Number of stems.
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Delivery address, schedule and charge.
    pub const fn delivery(&self) -> &Delivery {
        &self.delivery
    }

    /// Amounts received so far.
    pub const fn payments(&self) -> Payments {
        self.payments
    }

    /// Current lifecycle status.
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Free-text notes, e.g. a greeting card message.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Audit trail, oldest entry first.
    pub const fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    /// When the order was created.
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Time of the latest activity entry.
    pub const fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Bulk discount applied to the snapshot price.
    pub fn discount(&self) -> BulkDiscountResult {
        calculate_bulk_discount(self.unit_price, self.quantity)
    }

    /// Bouquet price after the bulk discount.
    pub fn bouquet_price(&self) -> Amount {
        self.discount().final_price
    }

    /// Totals and payment status, derived from the current amounts.
    pub fn payment_summary(&self) -> PaymentSummary {
        summarize(
            self.bouquet_price(),
            self.delivery.charge.price,
            self.payments.down_payment_amount,
            self.payments.additional_payment,
        )
    }

    /// Payment status, derived from the current amounts.
    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_summary().status
    }

    /// Step to the next status. Returns `None`, recording nothing, when already delivered.
    pub fn advance_status(&mut self, now: Timestamp) -> Option<StatusChange> {
        if self.status.is_terminal() {
            return None;
        }

        let from = self.status;
        let to = from.next();

        self.status = to;
        self.touch(
            now,
            ActivityKind::Status,
            format!("Status: {} → {}", from.label(), to.label()),
        );

        Some(StatusChange::Advanced { from, to })
    }

    /// Set the status directly, bypassing the guided sequence.
    pub fn force_status(&mut self, to: OrderStatus, now: Timestamp) -> StatusChange {
        let from = self.status;

        self.status = to;
        self.touch(
            now,
            ActivityKind::Status,
            format!("Status diubah manual: {} → {}", from.label(), to.label()),
        );

        StatusChange::Forced { from, to }
    }

    /// Read-side view with derived totals.
    pub fn summary(&self) -> OrderSummary {
        let payment = self.payment_summary();

        OrderSummary {
            uuid: self.uuid,
            buyer_name: self.buyer.details.buyer_name.clone(),
            bouquet_name: self.bouquet.name.clone(),
            quantity: self.quantity,
            discount: self.discount(),
            delivery_price: self.delivery.charge.price,
            payment,
            status: self.status,
            status_label: self.status.label(),
            payment_label: payment.status.label(),
        }
    }

    fn touch(&mut self, now: Timestamp, kind: ActivityKind, message: String) {
        self.activity.record(now, kind, message);
        self.updated_at = now;
    }
}
