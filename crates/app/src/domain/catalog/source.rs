//! Catalog sources.

use async_trait::async_trait;
use bloom::{money::Amount, orders::BouquetUuid};
use mockall::automock;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;
use tracing::info;

use crate::domain::catalog::{
    errors::CatalogError,
    models::{Bouquet, Collection, CollectionUuid},
};

/// Where catalog data actually lives.
#[automock]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Bouquets, optionally restricted to one collection, ordered by name.
    async fn list_bouquets(
        &self,
        collection: Option<CollectionUuid>,
    ) -> Result<Vec<Bouquet>, CatalogError>;

    /// A single bouquet at its current price.
    async fn get_bouquet(&self, bouquet: BouquetUuid) -> Result<Bouquet, CatalogError>;

    /// All collections, ordered by name.
    async fn list_collections(&self) -> Result<Vec<Collection>, CatalogError>;

    /// Creates or replaces a bouquet.
    async fn upsert_bouquet(&self, bouquet: Bouquet) -> Result<Bouquet, CatalogError>;

    /// Changes the listed price of a bouquet.
    async fn update_bouquet_price(
        &self,
        bouquet: BouquetUuid,
        price: Amount,
    ) -> Result<Bouquet, CatalogError>;

    /// Removes a bouquet from the catalog.
    async fn delete_bouquet(&self, bouquet: BouquetUuid) -> Result<(), CatalogError>;

    /// Creates or replaces a collection.
    async fn upsert_collection(&self, collection: Collection) -> Result<Collection, CatalogError>;
}

#[derive(Debug, Default)]
struct CatalogData {
    bouquets: FxHashMap<BouquetUuid, Bouquet>,
    collections: FxHashMap<CollectionUuid, Collection>,
}

/// Catalog held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    data: RwLock<CatalogData>,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog seeded with the given collections and bouquets.
    pub fn with_data(
        collections: impl IntoIterator<Item = Collection>,
        bouquets: impl IntoIterator<Item = Bouquet>,
    ) -> Self {
        let data = CatalogData {
            bouquets: bouquets
                .into_iter()
                .map(|bouquet| (bouquet.uuid, bouquet))
                .collect(),
            collections: collections
                .into_iter()
                .map(|collection| (collection.uuid, collection))
                .collect(),
        };

        Self {
            data: RwLock::new(data),
        }
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn list_bouquets(
        &self,
        collection: Option<CollectionUuid>,
    ) -> Result<Vec<Bouquet>, CatalogError> {
        let data = self.data.read().await;

        let mut bouquets: Vec<Bouquet> = data
            .bouquets
            .values()
            .filter(|bouquet| collection.is_none() || bouquet.collection == collection)
            .cloned()
            .collect();

        bouquets.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(bouquets)
    }

    async fn get_bouquet(&self, bouquet: BouquetUuid) -> Result<Bouquet, CatalogError> {
        self.data
            .read()
            .await
            .bouquets
            .get(&bouquet)
            .cloned()
            .ok_or(CatalogError::NotFound)
    }

    async fn list_collections(&self) -> Result<Vec<Collection>, CatalogError> {
        let data = self.data.read().await;

        let mut collections: Vec<Collection> = data.collections.values().cloned().collect();

        collections.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(collections)
    }

    async fn upsert_bouquet(&self, bouquet: Bouquet) -> Result<Bouquet, CatalogError> {
        if bouquet.name.trim().is_empty() {
            return Err(CatalogError::InvalidData("bouquet name cannot be empty"));
        }

        let mut data = self.data.write().await;

        if let Some(collection) = bouquet.collection
            && !data.collections.contains_key(&collection)
        {
            return Err(CatalogError::InvalidData("unknown collection"));
        }

        data.bouquets.insert(bouquet.uuid, bouquet.clone());

        Ok(bouquet)
    }

    async fn update_bouquet_price(
        &self,
        bouquet: BouquetUuid,
        price: Amount,
    ) -> Result<Bouquet, CatalogError> {
        let mut data = self.data.write().await;

        let listed = data
            .bouquets
            .get_mut(&bouquet)
            .ok_or(CatalogError::NotFound)?;

        info!(%bouquet, from = %listed.price, to = %price, "bouquet price updated");

        listed.price = price;

        Ok(listed.clone())
    }

    async fn delete_bouquet(&self, bouquet: BouquetUuid) -> Result<(), CatalogError> {
        self.data
            .write()
            .await
            .bouquets
            .remove(&bouquet)
            .map(|_| ())
            .ok_or(CatalogError::NotFound)
    }

    async fn upsert_collection(&self, collection: Collection) -> Result<Collection, CatalogError> {
        if collection.name.trim().is_empty() {
            return Err(CatalogError::InvalidData("collection name cannot be empty"));
        }

        self.data
            .write()
            .await
            .collections
            .insert(collection.uuid, collection.clone());

        Ok(collection)
    }
}
