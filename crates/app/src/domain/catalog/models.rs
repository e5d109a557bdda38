//! Catalog Models

use bloom::{
    money::Amount,
    orders::{BouquetRef, BouquetUuid},
    uuids::TypedUuid,
};
use serde::{Deserialize, Serialize};

/// Collection UUID
pub type CollectionUuid = TypedUuid<Collection>;

/// A named grouping of bouquets shown on the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub uuid: CollectionUuid,
    pub name: String,
}

/// A bouquet as currently listed, at its current price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bouquet {
    pub uuid: BouquetUuid,
    pub name: String,
    pub price: Amount,
    pub collection: Option<CollectionUuid>,
}

impl Bouquet {
    /// The identity an order keeps once it has taken its price snapshot.
    pub fn reference(&self) -> BouquetRef {
        BouquetRef {
            uuid: self.uuid,
            name: self.name.clone(),
        }
    }
}
