//! Bulk Discounts
//!
//! Quantity-based discount tiers for bouquet orders. This is the single source of the
//! discount percentages: display surfaces should call [`calculate_bulk_discount`] rather
//! than re-deriving a percentage from the quantity themselves.

use serde::{Deserialize, Serialize};

use crate::money::Amount;

/// A quantity band with its discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiscountTier {
    /// Inclusive lower bound on quantity.
    pub threshold_quantity: u32,

    /// Whole-number percentage, 0 to 100.
    pub percentage: u8,

    /// Customer-facing label.
    pub label: &'static str,
}

/// Tier used when the quantity is below every threshold.
pub const NO_DISCOUNT: DiscountTier = DiscountTier {
    threshold_quantity: 0,
    percentage: 0,
    label: "Tanpa diskon",
};

/// Bulk tiers, highest threshold first.
pub const BULK_DISCOUNT_TIERS: [DiscountTier; 4] = [
    DiscountTier {
        threshold_quantity: 50,
        percentage: 20,
        label: "Diskon grosir 20%",
    },
    DiscountTier {
        threshold_quantity: 20,
        percentage: 15,
        label: "Diskon grosir 15%",
    },
    DiscountTier {
        threshold_quantity: 10,
        percentage: 10,
        label: "Diskon grosir 10%",
    },
    DiscountTier {
        threshold_quantity: 5,
        percentage: 5,
        label: "Diskon grosir 5%",
    },
];

/// Outcome of applying the bulk tiers to a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BulkDiscountResult {
    /// `unit_price * quantity`.
    pub original_price: Amount,

    /// `round(original_price * discount_percentage / 100)`.
    pub discount_amount: Amount,

    /// Percentage taken from the matching tier.
    pub discount_percentage: u8,

    /// `original_price - discount_amount`.
    pub final_price: Amount,

    /// The tier that matched.
    pub tier: DiscountTier,
}

/// The next tier a customer could reach by adding more units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextTierHint {
    /// Units still needed to unlock the tier.
    pub additional_quantity: u32,

    /// Percentage the tier would grant.
    pub percentage: u8,
}

/// Find the tier for a quantity: the highest threshold not exceeding it.
pub fn tier_for_quantity(quantity: u32) -> DiscountTier {
    BULK_DISCOUNT_TIERS
        .iter()
        .find(|tier| quantity >= tier.threshold_quantity)
        .copied()
        .unwrap_or(NO_DISCOUNT)
}

/// Apply the bulk discount tiers to `quantity` units at `unit_price`.
///
/// Quantity zero is accepted and yields zero on every amount.
pub fn calculate_bulk_discount(unit_price: Amount, quantity: u32) -> BulkDiscountResult {
    let tier = tier_for_quantity(quantity);
    let original_price = unit_price.times(quantity);
    let discount_amount = original_price.percent(tier.percentage);

    BulkDiscountResult {
        original_price,
        discount_amount,
        discount_percentage: tier.percentage,
        final_price: original_price.saturating_sub(discount_amount),
        tier,
    }
}

/// The closest tier above the current quantity, if any remain.
pub fn next_discount_tier(quantity: u32) -> Option<NextTierHint> {
    BULK_DISCOUNT_TIERS
        .iter()
        .rev()
        .find(|tier| tier.threshold_quantity > quantity)
        .map(|tier| NextTierHint {
            additional_quantity: tier.threshold_quantity - quantity,
            percentage: tier.percentage,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries_match_table() {
        let cases = [
            (0, 0),
            (1, 0),
            (4, 0),
            (5, 5),
            (9, 5),
            (10, 10),
            (19, 10),
            (20, 15),
            (49, 15),
            (50, 20),
            (500, 20),
        ];

        for (quantity, expected) in cases {
            assert_eq!(
                calculate_bulk_discount(Amount::new(10_000), quantity).discount_percentage,
                expected,
                "quantity {quantity}"
            );
        }
    }

    #[test]
    fn final_price_is_original_minus_discount() {
        for quantity in 0..=60 {
            for unit in [0, 1, 999, 12_345, 250_000] {
                let result = calculate_bulk_discount(Amount::new(unit), quantity);

                assert_eq!(
                    result.final_price,
                    result.original_price - result.discount_amount,
                    "unit {unit} quantity {quantity}"
                );
                assert!(result.discount_amount <= result.original_price);
            }
        }
    }

    #[test]
    fn discount_amount_is_rounded_to_whole_units() {
        // 7 * 1_001 = 7_007; 5% = 350.35
        let result = calculate_bulk_discount(Amount::new(1_001), 7);

        assert_eq!(result.original_price, Amount::new(7_007));
        assert_eq!(result.discount_amount, Amount::new(350));
        assert_eq!(result.final_price, Amount::new(6_657));
    }

    #[test]
    fn quantity_zero_yields_zero() {
        let result = calculate_bulk_discount(Amount::new(150_000), 0);

        assert_eq!(result.original_price, Amount::ZERO);
        assert_eq!(result.discount_amount, Amount::ZERO);
        assert_eq!(result.final_price, Amount::ZERO);
        assert_eq!(result.tier, NO_DISCOUNT);
    }

    #[test]
    fn fifty_stems_get_twenty_percent() {
        let result = calculate_bulk_discount(Amount::new(10_000), 50);

        assert_eq!(result.original_price, Amount::new(500_000));
        assert_eq!(result.discount_amount, Amount::new(100_000));
        assert_eq!(result.final_price, Amount::new(400_000));
        assert_eq!(result.tier.label, "Diskon grosir 20%");
    }

    #[test]
    fn next_tier_hint_points_at_closest_threshold() {
        assert_eq!(
            next_discount_tier(3),
            Some(NextTierHint {
                additional_quantity: 2,
                percentage: 5
            })
        );
        assert_eq!(
            next_discount_tier(10),
            Some(NextTierHint {
                additional_quantity: 10,
                percentage: 15
            })
        );
        assert_eq!(next_discount_tier(50), None);
    }
}
