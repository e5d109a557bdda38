//! Order Totals & Payment Status
//!
//! The payment status is always derived from the four underlying amounts. It is never
//! stored on an order or accepted as input, so it cannot drift from the amounts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::money::Amount;

/// Raw amounts as captured by the order form. Missing values default to zero and
/// negative values are clamped to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentInputs {
    /// Bouquet price after any bulk discount.
    pub bouquet_price: i64,

    /// Delivery price.
    pub delivery_price: i64,

    /// Down payment received.
    pub down_payment_amount: i64,

    /// Any later payment received.
    pub additional_payment: i64,
}

/// Derived payment classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Nothing paid yet.
    Unpaid,

    /// A down payment has been received but a balance remains.
    Partial,

    /// Nothing remains to be paid.
    FullyPaid,
}

impl PaymentStatus {
    /// Customer-facing label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unpaid => "Belum Bayar",
            Self::Partial => "DP",
            Self::FullyPaid => "Lunas",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Totals derived from [`PaymentInputs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentSummary {
    /// `bouquet_price + delivery_price`.
    pub total: Amount,

    /// `down_payment_amount + additional_payment`.
    pub paid: Amount,

    /// `max(0, total - paid)`.
    pub remaining: Amount,

    /// Classification of `total` against `paid`.
    pub status: PaymentStatus,
}

/// Classify a payment. First match wins:
/// nothing owed, nothing paid, paid in full, otherwise partial.
pub fn payment_status(total: Amount, paid: Amount) -> PaymentStatus {
    if total.is_zero() {
        PaymentStatus::FullyPaid
    } else if paid.is_zero() {
        PaymentStatus::Unpaid
    } else if paid >= total {
        PaymentStatus::FullyPaid
    } else {
        PaymentStatus::Partial
    }
}

/// Combine amounts already in whole units.
pub fn summarize(
    bouquet_price: Amount,
    delivery_price: Amount,
    down_payment_amount: Amount,
    additional_payment: Amount,
) -> PaymentSummary {
    let total = bouquet_price + delivery_price;
    let paid = down_payment_amount + additional_payment;

    PaymentSummary {
        total,
        paid,
        remaining: total.saturating_sub(paid),
        status: payment_status(total, paid),
    }
}

impl PaymentInputs {
    /// Clamp the raw inputs and derive the totals.
    pub fn summarize(&self) -> PaymentSummary {
        summarize(
            Amount::clamped(self.bouquet_price),
            Amount::clamped(self.delivery_price),
            Amount::clamped(self.down_payment_amount),
            Amount::clamped(self.additional_payment),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(bouquet: i64, delivery: i64, down: i64, additional: i64) -> PaymentInputs {
        PaymentInputs {
            bouquet_price: bouquet,
            delivery_price: delivery,
            down_payment_amount: down,
            additional_payment: additional,
        }
    }

    #[test]
    fn down_payment_leaves_partial_balance() {
        let summary = inputs(100_000, 20_000, 60_000, 0).summarize();

        assert_eq!(summary.total, Amount::new(120_000));
        assert_eq!(summary.paid, Amount::new(60_000));
        assert_eq!(summary.remaining, Amount::new(60_000));
        assert_eq!(summary.status, PaymentStatus::Partial);
    }

    #[test]
    fn zero_total_is_fully_paid_regardless_of_payment() {
        assert_eq!(inputs(0, 0, 0, 0).summarize().status, PaymentStatus::FullyPaid);
        assert_eq!(
            inputs(0, 0, 50_000, 0).summarize().status,
            PaymentStatus::FullyPaid
        );
    }

    #[test]
    fn nothing_paid_is_unpaid() {
        let summary = inputs(75_000, 15_000, 0, 0).summarize();

        assert_eq!(summary.status, PaymentStatus::Unpaid);
        assert_eq!(summary.remaining, Amount::new(90_000));
    }

    #[test]
    fn exact_payment_is_fully_paid() {
        let summary = inputs(75_000, 15_000, 50_000, 40_000).summarize();

        assert_eq!(summary.status, PaymentStatus::FullyPaid);
        assert_eq!(summary.remaining, Amount::ZERO);
    }

    #[test]
    fn overpayment_never_yields_negative_remaining() {
        let summary = inputs(10_000, 0, 25_000, 25_000).summarize();

        assert_eq!(summary.remaining, Amount::ZERO);
        assert_eq!(summary.status, PaymentStatus::FullyPaid);
    }

    #[test]
    fn negative_inputs_are_clamped() {
        let summary = inputs(50_000, -5_000, -10_000, 20_000).summarize();

        assert_eq!(summary.total, Amount::new(50_000));
        assert_eq!(summary.paid, Amount::new(20_000));
        assert_eq!(summary.status, PaymentStatus::Partial);
    }

    #[test]
    fn remaining_is_never_negative() {
        for total in [0_u64, 1, 50_000, 120_000] {
            for paid in [0_u64, 1, 60_000, 120_000, 500_000] {
                let summary = summarize(
                    Amount::new(total),
                    Amount::ZERO,
                    Amount::new(paid),
                    Amount::ZERO,
                );

                assert_eq!(
                    summary.remaining.units(),
                    total.saturating_sub(paid),
                    "total {total} paid {paid}"
                );
            }
        }
    }
}
