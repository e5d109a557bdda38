//! App Context

use std::sync::Arc;

use crate::{
    config::AppConfig,
    domain::{
        catalog::{CachedCatalog, CatalogService, CatalogSource, InMemoryCatalog},
        customers::{CustomersService, InMemoryCustomersService},
        orders::{InMemoryOrdersStore, OrdersService, OrdersStore, StoreOrdersService},
    },
};

/// The services a host application works with.
#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub customers: Arc<dyn CustomersService>,
    pub orders: Arc<dyn OrdersService>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Wire services over the given catalog source and order store.
    ///
    /// Catalog reads are cached according to `config.cache`; delivery is priced from
    /// `config.store`.
    #[must_use]
    pub fn new(
        config: &AppConfig,
        source: Arc<dyn CatalogSource>,
        store: Arc<dyn OrdersStore>,
        customers: Arc<dyn CustomersService>,
    ) -> Self {
        let catalog: Arc<dyn CatalogService> =
            Arc::new(CachedCatalog::new(source, config.cache.policy()));

        let orders = Arc::new(StoreOrdersService::new(
            store,
            Arc::clone(&catalog),
            Arc::clone(&customers),
            config.store.origin(),
        ));

        Self {
            catalog,
            customers,
            orders,
        }
    }

    /// Wire services entirely in process memory.
    #[must_use]
    pub fn in_memory(config: &AppConfig) -> Self {
        Self::new(
            config,
            Arc::new(InMemoryCatalog::new()),
            Arc::new(InMemoryOrdersStore::new()),
            Arc::new(InMemoryCustomersService::new()),
        )
    }
}
