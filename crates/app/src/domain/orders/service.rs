//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use bloom::{
    customers::Buyer,
    delivery::{DeliveryQuote, quote_between},
    geo::Coordinates,
    orders::{Delivery, DeliveryCharge, NewOrder, Order, OrderPatch, OrderUuid},
    status::OrderStatus,
};
use jiff::Timestamp;
use mockall::automock;
use tracing::{debug, info, warn};

use crate::domain::{
    catalog::CatalogService,
    customers::CustomersService,
    orders::{
        data::{CreateOrder, OrderFilter, Page},
        errors::OrdersServiceError,
        guard::{SubmitGuard, SubmitPermit},
        store::OrdersStore,
    },
};

/// Orders persisted through an [`OrdersStore`], priced against the cached catalog.
#[derive(Clone)]
pub struct StoreOrdersService {
    store: Arc<dyn OrdersStore>,
    catalog: Arc<dyn CatalogService>,
    customers: Arc<dyn CustomersService>,
    origin: Coordinates,
    guard: SubmitGuard,
}

impl std::fmt::Debug for StoreOrdersService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreOrdersService")
            .field("origin", &self.origin)
            .field("guard", &self.guard)
            .finish_non_exhaustive()
    }
}

impl StoreOrdersService {
    /// Delivery distances are measured from `origin`, the shop.
    #[must_use]
    pub fn new(
        store: Arc<dyn OrdersStore>,
        catalog: Arc<dyn CatalogService>,
        customers: Arc<dyn CustomersService>,
        origin: Coordinates,
    ) -> Self {
        Self {
            store,
            catalog,
            customers,
            origin,
            guard: SubmitGuard::new(),
        }
    }

    fn claim(&self, order: OrderUuid) -> Result<SubmitPermit, OrdersServiceError> {
        self.guard.try_acquire(order).ok_or_else(|| {
            warn!(%order, "overlapping submit rejected");

            OrdersServiceError::SubmitInProgress
        })
    }

    fn quote(&self, destination: Coordinates) -> Result<DeliveryCharge, OrdersServiceError> {
        match quote_between(self.origin, destination) {
            DeliveryQuote::Priced(result) => Ok(DeliveryCharge::from_quote(&result)),
            DeliveryQuote::Undeliverable => Err(OrdersServiceError::Undeliverable),
        }
    }

    async fn buyer(&self, create: &CreateOrder) -> Result<Buyer, OrdersServiceError> {
        match create.customer {
            Some(customer) => {
                let customer = self.customers.get_customer(customer).await?;

                Ok(Buyer::linked(&customer))
            }
            None => Ok(Buyer::inline(create.buyer.clone())),
        }
    }

    async fn modify(
        &self,
        order: OrderUuid,
        change: impl FnOnce(&mut Order, Timestamp) + Send,
    ) -> Result<Order, OrdersServiceError> {
        let _permit = self.claim(order)?;

        let mut stored = self.store.get_order(order).await?;

        change(&mut stored, Timestamp::now());

        self.store.update_order(stored.clone()).await?;

        Ok(stored)
    }
}

#[async_trait]
impl OrdersService for StoreOrdersService {
    async fn create_order(&self, create: CreateOrder) -> Result<Order, OrdersServiceError> {
        if create.quantity == 0 {
            return Err(OrdersServiceError::InvalidQuantity);
        }

        let uuid = create.uuid.unwrap_or_default();
        let _permit = self.claim(uuid)?;

        let charge = match (create.manual_delivery_price, create.destination) {
            (Some(price), _) => DeliveryCharge::manual(price),
            (None, Some(destination)) => self.quote(destination)?,
            (None, None) => return Err(OrdersServiceError::Undeliverable),
        };

        let bouquet = self.catalog.get_bouquet(create.bouquet).await?;
        let buyer = self.buyer(&create).await?;

        let order = Order::create(
            NewOrder {
                uuid,
                buyer,
                bouquet: bouquet.reference(),
                unit_price: bouquet.price,
                quantity: create.quantity,
                delivery: Delivery {
                    address: create.delivery_address,
                    scheduled_at: create.scheduled_at,
                    destination: create.destination,
                    charge,
                },
                payments: create.payments,
                status: create.status,
                notes: create.notes,
            },
            Timestamp::now(),
        );

        self.store.insert_order(order.clone()).await?;

        info!(
            order = %uuid,
            bouquet = %bouquet.uuid,
            unit_price = %order.unit_price(),
            quantity = order.quantity(),
            "order created"
        );

        Ok(order)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError> {
        self.store.get_order(order).await.map_err(Into::into)
    }

    async fn list_orders(&self, filter: OrderFilter) -> Result<Page<Order>, OrdersServiceError> {
        let matching: Vec<Order> = self
            .store
            .list_orders()
            .await?
            .into_iter()
            .filter(|order| filter.matches(order))
            .collect();

        let total = matching.len();
        let items = matching
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit)
            .collect();

        Ok(Page { items, total })
    }

    async fn patch_order(
        &self,
        order: OrderUuid,
        mut patch: OrderPatch,
    ) -> Result<Order, OrdersServiceError> {
        if patch.delivery_charge.is_none()
            && let Some(destination) = patch.destination
        {
            patch.delivery_charge = Some(self.quote(destination)?);
        }

        self.modify(order, |stored, now| {
            let recorded = stored.apply_patch(patch, now);

            debug!(order = %stored.uuid(), ?recorded, "order patched");
        })
        .await
    }

    async fn advance_status(&self, order: OrderUuid) -> Result<Order, OrdersServiceError> {
        self.modify(order, |stored, now| {
            match stored.advance_status(now) {
                Some(change) => info!(
                    order = %stored.uuid(),
                    from = %change.previous(),
                    to = %change.current(),
                    "order status advanced"
                ),
                None => debug!(order = %stored.uuid(), "order already delivered"),
            }
        })
        .await
    }

    async fn force_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        self.modify(order, |stored, now| {
            let change = stored.force_status(status, now);

            info!(
                order = %stored.uuid(),
                from = %change.previous(),
                to = %change.current(),
                "order status forced"
            );
        })
        .await
    }

    async fn delete_order(&self, order: OrderUuid) -> Result<(), OrdersServiceError> {
        let _permit = self.claim(order)?;

        self.store.delete_order(order).await?;

        info!(%order, "order deleted");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Creates an order, freezing the bouquet's current catalog price as its snapshot.
    async fn create_order(&self, create: CreateOrder) -> Result<Order, OrdersServiceError>;

    /// Retrieve a single order.
    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError>;

    /// Orders matching `filter`, newest first.
    async fn list_orders(&self, filter: OrderFilter) -> Result<Page<Order>, OrdersServiceError>;

    /// Applies a partial update. A new destination without an explicit charge is re-quoted.
    async fn patch_order(
        &self,
        order: OrderUuid,
        patch: OrderPatch,
    ) -> Result<Order, OrdersServiceError>;

    /// Moves the order one step along the guided status sequence.
    async fn advance_status(&self, order: OrderUuid) -> Result<Order, OrdersServiceError>;

    /// Sets the status directly, recorded as a manual override.
    async fn force_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError>;

    /// Deletes the order permanently.
    async fn delete_order(&self, order: OrderUuid) -> Result<(), OrdersServiceError>;
}
