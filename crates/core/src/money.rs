//! Money
//!
//! All amounts are whole rupiah. Nothing in the engine ever produces a fractional
//! amount: every percentage step is rounded back to whole units immediately.

use std::{
    fmt,
    ops::{Add, Sub},
};

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso};
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, Visitor},
};

/// ISO 4217 gives the rupiah two minor digits even though sen are no longer issued.
const RUPIAH_MINOR_UNITS: i64 = 100;

/// A non-negative count of whole currency units.
///
/// Deserializes from any integer; negative input becomes zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    /// Zero rupiah.
    pub const ZERO: Self = Self(0);

    /// Wrap a whole-unit value.
    pub const fn new(units: u64) -> Self {
        Self(units)
    }

    /// Convert a signed value, clamping negatives to zero.
    pub fn clamped(units: i64) -> Self {
        Self(u64::try_from(units).unwrap_or(0))
    }

    /// Number of whole units.
    pub const fn units(self) -> u64 {
        self.0
    }

    /// Returns `true` when the amount is zero.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Multiply by a quantity, saturating at `u64::MAX`.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }

    /// Subtract, stopping at zero.
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// `percent`% of this amount, rounded half away from zero to whole units.
    #[must_use]
    pub fn percent(self, percent: u8) -> Self {
        let applied = Decimal::from(self.0) * Decimal::from(percent) / Decimal::ONE_HUNDRED;

        let rounded = applied.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

        // `percent` never exceeds 100 in the tier tables, but stay total for any input.
        Self(rounded.to_u64().unwrap_or(u64::MAX))
    }

    /// Convert into a `rusty-money` value in Indonesian rupiah.
    pub fn to_money(self) -> Money<'static, iso::Currency> {
        let minor = i64::try_from(self.0)
            .unwrap_or(i64::MAX)
            .saturating_mul(RUPIAH_MINOR_UNITS);

        Money::from_minor(minor, iso::IDR)
    }

    /// Human-readable rupiah string, e.g. for a delivery price badge.
    pub fn format_idr(self) -> String {
        self.to_money().to_string()
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.saturating_sub(rhs)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Amount> for u64 {
    fn from(value: Amount) -> Self {
        value.0
    }
}

struct AmountVisitor;

impl Visitor<'_> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a whole number of rupiah")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Amount, E> {
        Ok(Amount::clamped(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Amount, E> {
        Ok(Amount::new(value))
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_i64(AmountVisitor)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
