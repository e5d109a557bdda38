use bloom::{
    delivery::{DeliveryQuote, quote_between},
    discounts::{BulkDiscountResult, NextTierHint, calculate_bulk_discount, next_discount_tier},
    geo::Coordinates,
    money::Amount,
    payments::{PaymentInputs, PaymentSummary},
};
use bloom_app::config::AppConfig;
use clap::Args;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Args)]
pub(crate) struct QuoteArgs {
    /// Catalog price of one bouquet, in whole rupiah
    #[arg(long)]
    unit_price: u64,

    /// Number of bouquets
    #[arg(long, default_value_t = 1)]
    quantity: u32,

    /// Destination latitude in signed decimal degrees
    #[arg(long, requires = "dest_lng", allow_negative_numbers = true)]
    dest_lat: Option<f64>,

    /// Destination longitude in signed decimal degrees
    #[arg(long, requires = "dest_lat", allow_negative_numbers = true)]
    dest_lng: Option<f64>,

    /// Delivery price agreed by hand; replaces the zone price
    #[arg(long)]
    delivery_price: Option<i64>,

    /// Down payment received
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    down_payment: i64,

    /// Further payments received
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    additional_payment: i64,
}

#[derive(Debug, Serialize)]
struct QuoteReport {
    discount: BulkDiscountResult,
    next_tier: Option<NextTierHint>,
    delivery: Option<DeliveryQuote>,

    /// Absent when delivery could not be priced and no manual price was given.
    payment: Option<PaymentSummary>,
}

fn build_report(origin: Coordinates, args: &QuoteArgs) -> QuoteReport {
    let discount = calculate_bulk_discount(Amount::new(args.unit_price), args.quantity);

    let delivery = args
        .dest_lat
        .zip(args.dest_lng)
        .map(|(latitude, longitude)| quote_between(origin, Coordinates::new(latitude, longitude)));

    let delivery_price = args
        .delivery_price
        .or_else(|| {
            delivery
                .as_ref()
                .and_then(DeliveryQuote::price)
                .and_then(|price| i64::try_from(price.units()).ok())
        })
        .or_else(|| delivery.is_none().then_some(0));

    let payment = delivery_price.map(|delivery_price| {
        PaymentInputs {
            bouquet_price: i64::try_from(discount.final_price.units()).unwrap_or(i64::MAX),
            delivery_price,
            down_payment_amount: args.down_payment,
            additional_payment: args.additional_payment,
        }
        .summarize()
    });

    QuoteReport {
        discount,
        next_tier: next_discount_tier(args.quantity),
        delivery,
        payment,
    }
}

pub(crate) fn run(config: &AppConfig, args: &QuoteArgs) -> Result<(), String> {
    let report = build_report(config.store.origin(), args);

    debug!(?report, "quote built");

    let json = serde_json::to_string_pretty(&report)
        .map_err(|error| format!("failed to serialise quote: {error}"))?;

    println!("{json}");

    Ok(())
}
