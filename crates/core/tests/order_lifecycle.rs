//! Order lifecycle tests

use bloom::prelude::*;
use jiff::{Timestamp, ToSpan};
use testresult::TestResult;

fn new_order(unit_price: u64, quantity: u32, delivery: u64, down_payment: u64) -> NewOrder {
    NewOrder {
        uuid: OrderUuid::new(),
        buyer: Buyer::inline(BuyerDetails {
            buyer_name: "Dewi".to_string(),
            phone_number: "0812000111".to_string(),
            address: "Jl. Dahlia 12".to_string(),
        }),
        bouquet: BouquetRef {
            uuid: BouquetUuid::new(),
            name: "Lily Putih".to_string(),
        },
        unit_price: Amount::new(unit_price),
        quantity,
        delivery: Delivery {
            address: "Jl. Dahlia 12".to_string(),
            scheduled_at: None,
            destination: None,
            charge: DeliveryCharge::manual(Amount::new(delivery)),
        },
        payments: Payments {
            down_payment_amount: Amount::new(down_payment),
            additional_payment: Amount::ZERO,
        },
        status: OrderStatus::Inquiring,
        notes: None,
    }
}

#[test]
fn order_round_trip_totals() -> TestResult {
    let order = Order::create(new_order(100_000, 1, 20_000, 60_000), Timestamp::now());

    let payment = order.payment_summary();

    assert_eq!(payment.total, Amount::new(120_000));
    assert_eq!(payment.paid, Amount::new(60_000));
    assert_eq!(payment.remaining, Amount::new(60_000));
    assert_eq!(payment.status, PaymentStatus::Partial);
    assert_eq!(order.summary().payment_label, "DP");

    Ok(())
}

#[test]
fn full_lifecycle_keeps_price_snapshot_and_audit_trail() -> TestResult {
    let start = Timestamp::from_second(1_700_000_000)?;
    let mut order = Order::create(new_order(50_000, 12, 30_000, 0), start);

    // 12 x 50 000 = 600 000, less 10%.
    assert_eq!(order.bouquet_price(), Amount::new(540_000));
    assert_eq!(order.payment_status(), PaymentStatus::Unpaid);

    let mut now = start;
    let mut changes = Vec::new();

    while let Some(change) = order.advance_status(now) {
        changes.push(change);
        now = now.checked_add(1.hour())?;
    }

    assert_eq!(changes.len(), 5);
    assert_eq!(order.status(), OrderStatus::Delivered);
    assert!(changes
        .iter()
        .all(|change| matches!(change, StatusChange::Advanced { .. })));

    order.apply_patch(
        OrderPatch {
            down_payment_amount: Some(Amount::new(570_000)),
            ..OrderPatch::default()
        },
        now,
    );

    assert_eq!(order.payment_status(), PaymentStatus::FullyPaid);
    assert_eq!(order.unit_price(), Amount::new(50_000));

    let kinds: Vec<ActivityKind> = order
        .activity()
        .entries()
        .iter()
        .map(ActivityEntry::kind)
        .collect();

    assert_eq!(kinds.first(), Some(&ActivityKind::Created));
    assert_eq!(kinds.last(), Some(&ActivityKind::Payment));
    assert_eq!(kinds.len(), 7);
    assert!(order
        .activity()
        .entries()
        .windows(2)
        .all(|pair| matches!(pair, [a, b] if a.at() <= b.at())));

    Ok(())
}

#[test]
fn delivered_order_can_still_be_corrected_by_override() -> TestResult {
    let mut order = Order::create(new_order(100_000, 1, 20_000, 0), Timestamp::now());

    let change = order.force_status(OrderStatus::Delivered, Timestamp::now());

    assert_eq!(
        change,
        StatusChange::Forced {
            from: OrderStatus::Inquiring,
            to: OrderStatus::Delivered,
        }
    );
    assert_eq!(order.advance_status(Timestamp::now()), None);

    let corrected = order.force_status(OrderStatus::InTransit, Timestamp::now());

    assert_eq!(corrected.current(), OrderStatus::InTransit);
    assert_eq!(order.activity().of_kind(ActivityKind::Status).count(), 2);

    Ok(())
}

#[test]
fn delivery_quote_feeds_order_charge() -> TestResult {
    let quote = calculate_delivery_price(-6.2, 106.8, -6.2, 106.8);
    let priced = quote.priced().ok_or("expected a priced quote")?;

    let mut new = new_order(100_000, 1, 0, 0);
    new.delivery.charge = DeliveryCharge::from_quote(priced);

    let order = Order::create(new, Timestamp::now());

    assert_eq!(order.delivery().charge.price, Amount::new(15_000));
    assert_eq!(
        order.delivery().charge.zone_label.as_deref(),
        Some("Zona Same-Day")
    );
    assert_eq!(order.payment_summary().total, Amount::new(115_000));

    Ok(())
}

#[test]
fn discount_invariant_holds_across_quantities_and_prices() {
    for unit_price in [0, 1, 999, 15_000, 123_457, 1_000_000] {
        for quantity in 0..=60 {
            let result = calculate_bulk_discount(Amount::new(unit_price), quantity);

            assert_eq!(
                result.final_price + result.discount_amount,
                result.original_price,
                "price {unit_price} x {quantity}"
            );
            assert!(result.final_price <= result.original_price);
        }
    }
}

#[test]
fn remaining_is_never_negative() {
    for (total, paid) in [(0, 0), (0, 10), (10, 0), (10, 10), (10, 25), (25, 10)] {
        let summary = PaymentInputs {
            bouquet_price: total,
            delivery_price: 0,
            down_payment_amount: paid,
            additional_payment: 0,
        }
        .summarize();

        assert_eq!(
            summary.remaining.units(),
            u64::try_from((total - paid).max(0)).unwrap_or(0),
            "total {total} paid {paid}"
        );
    }
}

#[test]
fn upsell_hint_points_at_next_tier() {
    let hint = next_discount_tier(8);

    assert_eq!(hint.map(|h| (h.additional_quantity, h.percentage)), Some((2, 10)));
    assert_eq!(next_discount_tier(50), None);
}

#[test]
fn raw_status_strings_advance_through_sequence() {
    let mut status = "inquiring";

    for _ in 0..5 {
        status = next_status(status);
    }

    assert_eq!(status, "delivered");
    assert_eq!(next_status(status), "delivered");
}
