//! Order Status
//!
//! Fulfilment moves strictly forward through [`OrderStatus::ALL`]. Guided progression goes
//! through [`OrderStatus::next`]; admin correction uses a forced change, recorded as
//! [`StatusChange::Forced`] so the two can be told apart in the activity log.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fulfilment lifecycle of an order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// The buyer is still asking questions.
    #[default]
    Inquiring,

    /// The order is confirmed.
    Ordered,

    /// The florist is arranging the bouquet.
    Processing,

    /// Ready and waiting for a courier.
    AwaitingCourier,

    /// With the courier.
    InTransit,

    /// Handed to the recipient. Terminal.
    Delivered,
}

/// Returned when a raw status string is not one of the known states.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status `{0}`")]
pub struct UnknownStatus(pub String);

impl OrderStatus {
    /// Every state, in lifecycle order.
    pub const ALL: [Self; 6] = [
        Self::Inquiring,
        Self::Ordered,
        Self::Processing,
        Self::AwaitingCourier,
        Self::InTransit,
        Self::Delivered,
    ];

    /// The following state, or `self` when already delivered.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Inquiring => Self::Ordered,
            Self::Ordered => Self::Processing,
            Self::Processing => Self::AwaitingCourier,
            Self::AwaitingCourier => Self::InTransit,
            Self::InTransit | Self::Delivered => Self::Delivered,
        }
    }

    /// Whether no further transition exists.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// Wire identifier, as stored by the order store.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inquiring => "inquiring",
            Self::Ordered => "ordered",
            Self::Processing => "processing",
            Self::AwaitingCourier => "awaiting_courier",
            Self::InTransit => "in_transit",
            Self::Delivered => "delivered",
        }
    }

    /// Label shown to admins and buyers.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Inquiring => "Tanya-tanya",
            Self::Ordered => "Dipesan",
            Self::Processing => "Diproses",
            Self::AwaitingCourier => "Menunggu Kurir",
            Self::InTransit => "Dalam Pengiriman",
            Self::Delivered => "Terkirim",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Advance a raw status string. Terminal and unrecognized values come back unchanged.
pub fn next_status(current: &str) -> &str {
    current
        .parse::<OrderStatus>()
        .map_or(current, |status| status.next().as_str())
}

/// How a status change came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatusChange {
    /// One step along the guided sequence.
    Advanced {
        /// State before the change.
        from: OrderStatus,
        /// State after the change.
        to: OrderStatus,
    },

    /// A manual override that may skip states. Skipped states did not necessarily happen.
    Forced {
        /// State before the change.
        from: OrderStatus,
        /// State after the change.
        to: OrderStatus,
    },
}

impl StatusChange {
    /// The resulting state.
    pub const fn current(self) -> OrderStatus {
        match self {
            Self::Advanced { to, .. } | Self::Forced { to, .. } => to,
        }
    }

    /// The state before the change.
    pub const fn previous(self) -> OrderStatus {
        match self {
            Self::Advanced { from, .. } | Self::Forced { from, .. } => from,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivered_is_terminal() {
        assert_eq!(OrderStatus::Delivered.next(), OrderStatus::Delivered);
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(!OrderStatus::InTransit.is_terminal());
    }

    #[test]
    fn five_steps_reach_delivered_and_sixth_stays() {
        let mut status = OrderStatus::Inquiring;

        for _ in 0..5 {
            status = status.next();
        }

        assert_eq!(status, OrderStatus::Delivered);
        assert_eq!(status.next(), OrderStatus::Delivered);
    }

    #[test]
    fn next_never_skips_or_goes_back() {
        for pair in OrderStatus::ALL.windows(2) {
            if let [current, following] = pair {
                assert_eq!(current.next(), *following);
            }
        }
    }

    #[test]
    fn raw_strings_advance_and_unknowns_are_kept() {
        assert_eq!(next_status("inquiring"), "ordered");
        assert_eq!(next_status("awaiting_courier"), "in_transit");
        assert_eq!(next_status("delivered"), "delivered");
        assert_eq!(next_status("cancelled"), "cancelled");
        assert_eq!(next_status(""), "");
    }

    #[test]
    fn parse_round_trips_wire_names() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }

        assert_eq!(
            "shipped".parse::<OrderStatus>(),
            Err(UnknownStatus("shipped".to_string()))
        );
    }
}
