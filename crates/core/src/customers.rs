//! Customers

use serde::{Deserialize, Serialize};

use crate::uuids::TypedUuid;

/// Customer UUID
pub type CustomerUuid = TypedUuid<Customer>;

/// A customer record from the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub uuid: CustomerUuid,
    pub buyer_name: String,
    pub phone_number: String,
    pub address: String,
}

/// Data for a new directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub buyer_name: String,
    pub phone_number: String,
    pub address: String,
}

/// Buyer fields copied onto an order at a point in time.
///
/// Later edits to the [`Customer`] do not touch orders that already hold a copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyerDetails {
    pub buyer_name: String,
    pub phone_number: String,
    pub address: String,
}

/// The buyer on an order: an inline copy, optionally linked to a directory entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buyer {
    pub customer: Option<CustomerUuid>,
    pub details: BuyerDetails,
}

impl Customer {
    /// Copy the current fields for use on an order.
    pub fn snapshot(&self) -> BuyerDetails {
        BuyerDetails {
            buyer_name: self.buyer_name.clone(),
            phone_number: self.phone_number.clone(),
            address: self.address.clone(),
        }
    }

    /// Case-insensitive match on name, phone number or address.
    pub fn matches(&self, text: &str) -> bool {
        let needle = text.trim().to_lowercase();

        if needle.is_empty() {
            return true;
        }

        [&self.buyer_name, &self.phone_number, &self.address]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

impl Buyer {
    /// A buyer linked to a directory entry, with a copy of its current fields.
    pub fn linked(customer: &Customer) -> Self {
        Self {
            customer: Some(customer.uuid),
            details: customer.snapshot(),
        }
    }

    /// A walk-in buyer captured inline.
    pub fn inline(details: BuyerDetails) -> Self {
        Self {
            customer: None,
            details,
        }
    }
}
