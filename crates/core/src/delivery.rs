//! Delivery Pricing
//!
//! Maps the distance between the shop and the recipient onto a fixed table of zones. Band
//! selection uses the unrounded distance; the reported distance is rounded to one decimal.
//!
//! Coordinates that do not produce a finite distance are reported as
//! [`DeliveryQuote::Undeliverable`] instead of falling through to the catch-all zone.

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use serde::Serialize;

use crate::{
    geo::{Coordinates, haversine_km},
    money::Amount,
};

/// One distance band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeliveryZone {
    /// Inclusive upper bound in kilometres; `None` means unbounded.
    pub max_distance_km: Option<f64>,

    /// Flat delivery price for the band.
    pub price: Amount,

    /// Estimated delivery window shown to the buyer.
    pub estimated_time: &'static str,

    /// Zone name shown to the buyer.
    pub zone_label: &'static str,
}

impl DeliveryZone {
    fn covers(&self, distance_km: f64) -> bool {
        self.max_distance_km.is_none_or(|max| distance_km <= max)
    }
}

/// Delivery zones in ascending distance order. The last band is the catch-all.
pub const DELIVERY_ZONES: [DeliveryZone; 5] = [
    DeliveryZone {
        max_distance_km: Some(5.0),
        price: Amount::new(15_000),
        estimated_time: "30–45 menit",
        zone_label: "Zona Same-Day",
    },
    DeliveryZone {
        max_distance_km: Some(10.0),
        price: Amount::new(20_000),
        estimated_time: "45–60 menit",
        zone_label: "Zona Standar",
    },
    DeliveryZone {
        max_distance_km: Some(20.0),
        price: Amount::new(30_000),
        estimated_time: "1–2 jam",
        zone_label: "Zona Extended",
    },
    DeliveryZone {
        max_distance_km: Some(30.0),
        price: Amount::new(40_000),
        estimated_time: "2–3 jam",
        zone_label: "Zona Jauh",
    },
    DeliveryZone {
        max_distance_km: None,
        price: Amount::new(50_000),
        estimated_time: "3+ jam, confirm",
        zone_label: "Zona Khusus",
    },
];

/// A priced delivery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryPriceResult {
    /// Zone price.
    pub price: Amount,

    /// Distance rounded to one decimal place, for display.
    pub distance_km: f64,

    /// Estimated delivery window.
    pub estimated_time: &'static str,

    /// Zone name.
    pub zone_label: &'static str,

    /// Price formatted in rupiah.
    pub formatted_price: String,
}

/// Result of pricing a delivery.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeliveryQuote {
    /// The destination falls in a zone.
    Priced(DeliveryPriceResult),

    /// The distance could not be computed; a person has to arrange the delivery.
    Undeliverable,
}

impl DeliveryQuote {
    /// The priced result, if any.
    pub fn priced(&self) -> Option<&DeliveryPriceResult> {
        match self {
            Self::Priced(result) => Some(result),
            Self::Undeliverable => None,
        }
    }

    /// The zone price, if any.
    pub fn price(&self) -> Option<Amount> {
        self.priced().map(|result| result.price)
    }
}

/// Find the zone for a distance. Returns `None` for NaN or infinite input.
pub fn zone_for_distance(distance_km: f64) -> Option<&'static DeliveryZone> {
    if !distance_km.is_finite() {
        return None;
    }

    let distance_km = distance_km.max(0.0);

    DELIVERY_ZONES.iter().find(|zone| zone.covers(distance_km))
}

/// Price a delivery for an already-computed distance.
pub fn quote_for_distance(distance_km: f64) -> DeliveryQuote {
    let Some(zone) = zone_for_distance(distance_km) else {
        return DeliveryQuote::Undeliverable;
    };

    DeliveryQuote::Priced(DeliveryPriceResult {
        price: zone.price,
        distance_km: round_to_tenth(distance_km.max(0.0)),
        estimated_time: zone.estimated_time,
        zone_label: zone.zone_label,
        formatted_price: zone.price.format_idr(),
    })
}

/// Price a delivery from the shop to a destination, both in signed decimal degrees.
pub fn calculate_delivery_price(
    store_lat: f64,
    store_lng: f64,
    dest_lat: f64,
    dest_lng: f64,
) -> DeliveryQuote {
    quote_between(
        Coordinates::new(store_lat, store_lng),
        Coordinates::new(dest_lat, dest_lng),
    )
}

/// Price a delivery between two coordinate pairs.
pub fn quote_between(store: Coordinates, destination: Coordinates) -> DeliveryQuote {
    quote_for_distance(haversine_km(store, destination))
}

fn round_to_tenth(distance_km: f64) -> f64 {
    Decimal::from_f64(distance_km)
        .map(|d| d.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(distance_km)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced(distance_km: f64) -> DeliveryPriceResult {
        match quote_for_distance(distance_km) {
            DeliveryQuote::Priced(result) => result,
            DeliveryQuote::Undeliverable => {
                unreachable!("{distance_km} km should be deliverable")
            }
        }
    }

    #[test]
    fn band_edges_are_inclusive() {
        let exactly_five = priced(5.0);
        assert_eq!(exactly_five.price, Amount::new(15_000));
        assert_eq!(exactly_five.zone_label, "Zona Same-Day");

        let just_over_five = priced(5.1);
        assert_eq!(just_over_five.price, Amount::new(20_000));
        assert_eq!(just_over_five.zone_label, "Zona Standar");

        assert_eq!(priced(10.0).price, Amount::new(20_000));
        assert_eq!(priced(20.0).price, Amount::new(30_000));
        assert_eq!(priced(30.0).price, Amount::new(40_000));
        assert_eq!(priced(30.1).price, Amount::new(50_000));
        assert_eq!(priced(30.1).estimated_time, "3+ jam, confirm");
    }

    #[test]
    fn band_selection_uses_unrounded_distance() {
        // Rounds to 5.0 for display but lies beyond the first band.
        let result = priced(5.04);

        assert_eq!(result.price, Amount::new(20_000));
        assert!((result.distance_km - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn price_never_decreases_with_distance() {
        let mut previous = Amount::ZERO;

        for tenth in 0..500_u32 {
            let price = priced(f64::from(tenth) / 10.0).price;
            assert!(price >= previous, "price dropped at {tenth}");
            previous = price;
        }
    }

    #[test]
    fn nan_distance_is_undeliverable() {
        assert_eq!(quote_for_distance(f64::NAN), DeliveryQuote::Undeliverable);
        assert_eq!(
            calculate_delivery_price(f64::NAN, 106.8, -6.2, 106.8),
            DeliveryQuote::Undeliverable
        );
        assert_eq!(
            quote_for_distance(f64::INFINITY),
            DeliveryQuote::Undeliverable
        );
    }

    #[test]
    fn same_location_is_same_day() {
        let quote = calculate_delivery_price(-6.2, 106.8, -6.2, 106.8);

        assert_eq!(quote.price(), Some(Amount::new(15_000)));
        assert_eq!(quote.priced().map(|r| r.distance_km), Some(0.0));
    }

    #[test]
    fn coordinates_resolve_to_expected_zone() {
        // 0.089 degrees of latitude is about 9.9 km.
        let quote = calculate_delivery_price(-6.2, 106.8, -6.289, 106.8);
        let result = quote.priced().cloned();

        assert_eq!(result.as_ref().map(|r| r.zone_label), Some("Zona Standar"));
        assert_eq!(result.map(|r| r.distance_km), Some(9.9));
    }
}
