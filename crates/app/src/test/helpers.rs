//! Fixture builders.

use bloom::{
    customers::{Buyer, BuyerDetails, NewCustomer},
    geo::Coordinates,
    money::Amount,
    orders::{BouquetUuid, Delivery, DeliveryCharge, NewOrder, Order, OrderUuid, Payments},
    status::OrderStatus,
};
use jiff::Timestamp;

use crate::domain::{
    catalog::models::{Bouquet, Collection, CollectionUuid},
    orders::data::CreateOrder,
};

/// Shop origin used by test services.
pub(crate) const STORE: Coordinates = Coordinates::new(-6.2, 106.8);

pub(crate) fn bouquet(name: &str, price: u64, collection: Option<CollectionUuid>) -> Bouquet {
    Bouquet {
        uuid: BouquetUuid::new(),
        name: name.to_string(),
        price: Amount::new(price),
        collection,
    }
}

pub(crate) fn collection(name: &str) -> Collection {
    Collection {
        uuid: CollectionUuid::new(),
        name: name.to_string(),
    }
}

pub(crate) fn new_customer(name: &str, phone: &str) -> NewCustomer {
    NewCustomer {
        buyer_name: name.to_string(),
        phone_number: phone.to_string(),
        address: "Jl. Melati No. 7".to_string(),
    }
}

fn buyer() -> BuyerDetails {
    BuyerDetails {
        buyer_name: "Rina".to_string(),
        phone_number: "08111".to_string(),
        address: "Jl. Kenanga 3".to_string(),
    }
}

/// Request with a manual 20 000 delivery charge and a 60 000 down payment.
pub(crate) fn create_order(bouquet: BouquetUuid, quantity: u32) -> CreateOrder {
    CreateOrder {
        uuid: None,
        customer: None,
        buyer: buyer(),
        bouquet,
        quantity,
        delivery_address: "Jl. Kenanga 3".to_string(),
        scheduled_at: None,
        destination: None,
        manual_delivery_price: Some(Amount::new(20_000)),
        payments: Payments {
            down_payment_amount: Amount::new(60_000),
            additional_payment: Amount::ZERO,
        },
        status: OrderStatus::Ordered,
        notes: None,
    }
}

pub(crate) fn order(unit_price: u64, quantity: u32) -> Order {
    Order::create(
        NewOrder {
            uuid: OrderUuid::new(),
            buyer: Buyer::inline(buyer()),
            bouquet: bouquet("Mawar Merah", unit_price, None).reference(),
            unit_price: Amount::new(unit_price),
            quantity,
            delivery: Delivery {
                address: "Jl. Kenanga 3".to_string(),
                scheduled_at: None,
                destination: None,
                charge: DeliveryCharge::manual(Amount::new(20_000)),
            },
            payments: Payments::default(),
            status: OrderStatus::Ordered,
            notes: None,
        },
        Timestamp::now(),
    )
}
