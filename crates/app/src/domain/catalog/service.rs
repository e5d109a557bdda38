//! Catalog service.

use std::sync::Arc;

use async_trait::async_trait;
use bloom::{money::Amount, orders::BouquetUuid};
use mockall::automock;

use crate::{
    cache::{CachePolicy, CancellationSignal, ReferenceCache},
    domain::catalog::{
        errors::CatalogError,
        models::{Bouquet, Collection, CollectionUuid},
        source::CatalogSource,
    },
};

type BouquetListCache = ReferenceCache<Option<CollectionUuid>, Arc<Vec<Bouquet>>, CatalogError>;
type BouquetCache = ReferenceCache<BouquetUuid, Bouquet, CatalogError>;
type CollectionListCache = ReferenceCache<(), Arc<Vec<Collection>>, CatalogError>;

/// Catalog reads served from the reference cache.
#[derive(Clone)]
pub struct CachedCatalog {
    source: Arc<dyn CatalogSource>,
    bouquet_lists: BouquetListCache,
    bouquets: BouquetCache,
    collections: CollectionListCache,
}

impl std::fmt::Debug for CachedCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedCatalog")
            .field("bouquet_lists", &self.bouquet_lists)
            .field("bouquets", &self.bouquets)
            .field("collections", &self.collections)
            .finish_non_exhaustive()
    }
}

impl CachedCatalog {
    #[must_use]
    pub fn new(source: Arc<dyn CatalogSource>, policy: CachePolicy) -> Self {
        Self {
            source,
            bouquet_lists: ReferenceCache::new(policy),
            bouquets: ReferenceCache::new(policy),
            collections: ReferenceCache::new(policy),
        }
    }

    /// Like [`CatalogService::list_bouquets`], but gives up when `signal` fires.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Cancelled`] if `signal` fires first, otherwise any source error.
    pub async fn list_bouquets_until(
        &self,
        collection: Option<CollectionUuid>,
        signal: &CancellationSignal,
    ) -> Result<Arc<Vec<Bouquet>>, CatalogError> {
        self.bouquet_list(collection, Some(signal)).await
    }

    /// Like [`CatalogService::get_bouquet`], but gives up when `signal` fires.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Cancelled`] if `signal` fires first, otherwise any source error.
    pub async fn get_bouquet_until(
        &self,
        bouquet: BouquetUuid,
        signal: &CancellationSignal,
    ) -> Result<Bouquet, CatalogError> {
        self.bouquet(bouquet, Some(signal)).await
    }

    /// Drop every cached catalog read.
    pub fn clear(&self) {
        self.bouquet_lists.clear();
        self.bouquets.clear();
        self.collections.clear();
    }

    async fn bouquet_list(
        &self,
        collection: Option<CollectionUuid>,
        signal: Option<&CancellationSignal>,
    ) -> Result<Arc<Vec<Bouquet>>, CatalogError> {
        let source = Arc::clone(&self.source);

        let bouquets = self
            .bouquet_lists
            .get(
                collection,
                move || async move { source.list_bouquets(collection).await.map(Arc::new) },
                signal,
            )
            .await?;

        Ok(bouquets)
    }

    async fn bouquet(
        &self,
        bouquet: BouquetUuid,
        signal: Option<&CancellationSignal>,
    ) -> Result<Bouquet, CatalogError> {
        let source = Arc::clone(&self.source);

        let bouquet = self
            .bouquets
            .get(
                bouquet,
                move || async move { source.get_bouquet(bouquet).await },
                signal,
            )
            .await?;

        Ok(bouquet)
    }
}

#[async_trait]
impl CatalogService for CachedCatalog {
    async fn list_bouquets(
        &self,
        collection: Option<CollectionUuid>,
    ) -> Result<Arc<Vec<Bouquet>>, CatalogError> {
        self.bouquet_list(collection, None).await
    }

    async fn get_bouquet(&self, bouquet: BouquetUuid) -> Result<Bouquet, CatalogError> {
        self.bouquet(bouquet, None).await
    }

    async fn list_collections(&self) -> Result<Arc<Vec<Collection>>, CatalogError> {
        let source = Arc::clone(&self.source);

        let collections = self
            .collections
            .get(
                (),
                move || async move { source.list_collections().await.map(Arc::new) },
                None,
            )
            .await?;

        Ok(collections)
    }

    async fn upsert_bouquet(&self, bouquet: Bouquet) -> Result<Bouquet, CatalogError> {
        let result = self.source.upsert_bouquet(bouquet).await;

        self.clear();

        result
    }

    async fn update_bouquet_price(
        &self,
        bouquet: BouquetUuid,
        price: Amount,
    ) -> Result<Bouquet, CatalogError> {
        let result = self.source.update_bouquet_price(bouquet, price).await;

        self.clear();

        result
    }

    async fn delete_bouquet(&self, bouquet: BouquetUuid) -> Result<(), CatalogError> {
        let result = self.source.delete_bouquet(bouquet).await;

        self.clear();

        result
    }

    async fn upsert_collection(&self, collection: Collection) -> Result<Collection, CatalogError> {
        let result = self.source.upsert_collection(collection).await;

        self.clear();

        result
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Bouquets, optionally restricted to one collection.
    async fn list_bouquets(
        &self,
        collection: Option<CollectionUuid>,
    ) -> Result<Arc<Vec<Bouquet>>, CatalogError>;

    /// A single bouquet at its current price.
    async fn get_bouquet(&self, bouquet: BouquetUuid) -> Result<Bouquet, CatalogError>;

    /// All collections.
    async fn list_collections(&self) -> Result<Arc<Vec<Collection>>, CatalogError>;

    /// Creates or replaces a bouquet.
    async fn upsert_bouquet(&self, bouquet: Bouquet) -> Result<Bouquet, CatalogError>;

    /// Changes the listed price of a bouquet. Existing orders keep their snapshot.
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

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use testresult::TestResult;

    use crate::{
        cache::Canceller,
        domain::catalog::{InMemoryCatalog, MockCatalogSource},
        test::helpers::bouquet,
    };

    use super::*;

    fn cached(source: impl CatalogSource + 'static) -> CachedCatalog {
        CachedCatalog::new(Arc::new(source), CachePolicy::default())
    }

    #[tokio::test]
    async fn repeated_reads_hit_source_once() -> TestResult {
        let listed = bouquet("Red Romance", 250_000, None);
        let returned = listed.clone();

        let mut source = MockCatalogSource::new();
        source
            .expect_get_bouquet()
            .with(eq(listed.uuid))
            .times(1)
            .returning(move |_| Ok(returned.clone()));

        let catalog = cached(source);

        assert_eq!(catalog.get_bouquet(listed.uuid).await?, listed);
        assert_eq!(catalog.get_bouquet(listed.uuid).await?, listed);

        Ok(())
    }

    #[tokio::test]
    async fn price_update_is_visible_on_next_read() -> TestResult {
        let listed = bouquet("Red Romance", 250_000, None);
        let catalog = cached(InMemoryCatalog::with_data([], [listed.clone()]));

        assert_eq!(catalog.get_bouquet(listed.uuid).await?.price, Amount::new(250_000));
        assert_eq!(catalog.list_bouquets(None).await?.len(), 1);

        catalog
            .update_bouquet_price(listed.uuid, Amount::new(300_000))
            .await?;

        assert_eq!(catalog.get_bouquet(listed.uuid).await?.price, Amount::new(300_000));
        assert_eq!(
            catalog.list_bouquets(None).await?.first().map(|b| b.price),
            Some(Amount::new(300_000))
        );

        Ok(())
    }

    #[tokio::test]
    async fn failed_mutation_still_clears_cache() -> TestResult {
        let listed = bouquet("Red Romance", 250_000, None);
        let returned = listed.clone();

        let mut source = MockCatalogSource::new();
        source
            .expect_get_bouquet()
            .times(2)
            .returning(move |_| Ok(returned.clone()));
        source
            .expect_update_bouquet_price()
            .times(1)
            .returning(|_, _| Err(CatalogError::Unavailable("timeout".to_string())));

        let catalog = cached(source);

        catalog.get_bouquet(listed.uuid).await?;

        let result = catalog
            .update_bouquet_price(listed.uuid, Amount::new(1))
            .await;

        assert!(
            matches!(result, Err(CatalogError::Unavailable(_))),
            "expected Unavailable, got {result:?}"
        );

        catalog.get_bouquet(listed.uuid).await?;

        Ok(())
    }

    #[tokio::test]
    async fn source_failure_returns_source_error() {
        let mut source = MockCatalogSource::new();
        source
            .expect_list_collections()
            .returning(|| Err(CatalogError::Unavailable("offline".to_string())));

        let catalog = cached(source);

        let result = catalog.list_collections().await;

        assert_eq!(
            result,
            Err(CatalogError::Unavailable("offline".to_string()))
        );
    }

    #[tokio::test]
    async fn cancelled_read_returns_cancelled() {
        let listed = bouquet("Red Romance", 250_000, None);
        let catalog = cached(InMemoryCatalog::with_data([], [listed.clone()]));
        let canceller = Canceller::new();
        let signal = canceller.signal();

        canceller.cancel();

        let result = catalog.get_bouquet_until(listed.uuid, &signal).await;

        assert_eq!(result, Err(CatalogError::Cancelled));
    }
}
