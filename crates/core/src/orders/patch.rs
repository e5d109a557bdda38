//! Order Patches
//!
//! A patch can touch payments, delivery, buyer and notes. It has no field for the unit price
//! snapshot or the payment status: the first is frozen at creation and the second is always
//! derived. Status changes go through [`Order::advance_status`] and [`Order::force_status`].

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{
    activity::ActivityKind,
    customers::BuyerDetails,
    geo::Coordinates,
    money::Amount,
};

use super::{DeliveryCharge, Order};

/// Partial update to an order. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderPatch {
    /// New down payment. Negative input is read as zero.
    pub down_payment_amount: Option<Amount>,
    /// New additional payment. Negative input is read as zero.
    pub additional_payment: Option<Amount>,

    pub delivery_address: Option<String>,
    pub scheduled_at: Option<Timestamp>,
    pub destination: Option<Coordinates>,
    pub delivery_charge: Option<DeliveryCharge>,

    /// Replaces the buyer details copied onto the order. A linked customer stays linked.
    pub buyer: Option<BuyerDetails>,
    pub notes: Option<String>,
}

impl OrderPatch {
    /// Whether applying the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn touches_payments(&self) -> bool {
        self.down_payment_amount.is_some() || self.additional_payment.is_some()
    }

    fn touches_delivery(&self) -> bool {
        self.delivery_address.is_some()
            || self.scheduled_at.is_some()
            || self.destination.is_some()
            || self.delivery_charge.is_some()
    }

    fn touches_details(&self) -> bool {
        self.buyer.is_some() || self.notes.is_some()
    }
}

impl Order {
    /// Apply a patch and record one activity entry per area it touched.
    ///
    /// Returns the kinds of the entries appended, in order.
    pub fn apply_patch(
        &mut self,
        patch: OrderPatch,
        now: Timestamp,
    ) -> SmallVec<[ActivityKind; 3]> {
        let mut recorded = SmallVec::new();

        let touches_payments = patch.touches_payments();
        let touches_delivery = patch.touches_delivery();
        let touches_details = patch.touches_details();

        if touches_payments {
            if let Some(amount) = patch.down_payment_amount {
                self.payments.down_payment_amount = amount;
            }
            if let Some(amount) = patch.additional_payment {
                self.payments.additional_payment = amount;
            }

            let summary = self.payment_summary();
            self.touch(
                now,
                ActivityKind::Payment,
                format!(
                    "Pembayaran diperbarui: dibayar {} dari {} ({})",
                    summary.paid.format_idr(),
                    summary.total.format_idr(),
                    summary.status.label()
                ),
            );
            recorded.push(ActivityKind::Payment);
        }

        if touches_delivery {
            if let Some(address) = patch.delivery_address {
                self.delivery.address = address;
            }
            if let Some(scheduled_at) = patch.scheduled_at {
                self.delivery.scheduled_at = Some(scheduled_at);
            }
            if let Some(destination) = patch.destination {
                self.delivery.destination = Some(destination);
            }
            if let Some(charge) = patch.delivery_charge {
                self.delivery.charge = charge;
            }

            let message = format!(
                "Pengiriman diperbarui: {} ({})",
                self.delivery.address,
                self.delivery.charge.price.format_idr()
            );
            self.touch(now, ActivityKind::Delivery, message);
            recorded.push(ActivityKind::Delivery);
        }

        if touches_details {
            let mut changed = Vec::new();

            if let Some(buyer) = patch.buyer {
                self.buyer.details = buyer;
                changed.push("data pembeli");
            }
            if let Some(notes) = patch.notes {
                self.notes = Some(notes);
                changed.push("catatan");
            }

            self.touch(
                now,
                ActivityKind::Edit,
                format!("Diperbarui: {}", changed.join(", ")),
            );
            recorded.push(ActivityKind::Edit);
        }

        recorded
    }
}
