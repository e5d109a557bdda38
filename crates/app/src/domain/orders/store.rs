//! Order store.

use async_trait::async_trait;
use bloom::orders::{Order, OrderUuid};
use mockall::automock;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;

use crate::domain::orders::errors::OrdersStoreError;

/// Where orders are persisted.
#[automock]
#[async_trait]
pub trait OrdersStore: Send + Sync {
    /// Stores a new order.
    async fn insert_order(&self, order: Order) -> Result<(), OrdersStoreError>;

    /// Retrieve a single order.
    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersStoreError>;

    /// Every stored order, newest first.
    async fn list_orders(&self) -> Result<Vec<Order>, OrdersStoreError>;

    /// Replaces a stored order.
    async fn update_order(&self, order: Order) -> Result<(), OrdersStoreError>;

    /// Removes an order permanently.
    async fn delete_order(&self, order: OrderUuid) -> Result<(), OrdersStoreError>;
}

/// Order store held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryOrdersStore {
    orders: RwLock<FxHashMap<OrderUuid, Order>>,
}

impl InMemoryOrdersStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrdersStore for InMemoryOrdersStore {
    async fn insert_order(&self, order: Order) -> Result<(), OrdersStoreError> {
        let mut orders = self.orders.write().await;

        if orders.contains_key(&order.uuid()) {
            return Err(OrdersStoreError::AlreadyExists);
        }

        orders.insert(order.uuid(), order);

        Ok(())
    }

    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersStoreError> {
        self.orders
            .read()
            .await
            .get(&order)
            .cloned()
            .ok_or(OrdersStoreError::NotFound)
    }

    async fn list_orders(&self) -> Result<Vec<Order>, OrdersStoreError> {
        let mut orders: Vec<Order> = self.orders.read().await.values().cloned().collect();

        orders.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.uuid().cmp(&a.uuid()))
        });

        Ok(orders)
    }

    async fn update_order(&self, order: Order) -> Result<(), OrdersStoreError> {
        let mut orders = self.orders.write().await;

        let stored = orders
            .get_mut(&order.uuid())
            .ok_or(OrdersStoreError::NotFound)?;

        *stored = order;

        Ok(())
    }

    async fn delete_order(&self, order: OrderUuid) -> Result<(), OrdersStoreError> {
        self.orders
            .write()
            .await
            .remove(&order)
            .map(|_| ())
            .ok_or(OrdersStoreError::NotFound)
    }
}
