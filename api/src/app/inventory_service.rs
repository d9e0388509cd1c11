//! Inventory Service
//!
//! Orchestrates the order lifecycle across the two ports:
//! - Order creation, lookup and cancellation (storage)
//! - Placement and status checks (supplier)
//!
//! Storage is the source of truth for local status. A failed supplier call
//! never changes what is stored. Placements of one order are serialised so
//! the supplier sees each order at most once per successful placement.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::app::RetryConfig;
use crate::domain::entities::{NewOrder, Order, OrderId, OrderStatus, SupplierStatus};
use crate::domain::ports::{Inventory, OrderStorage, SupplierService};
use crate::error::{AppError, DomainError};

/// Service implementing the inventory capability set
pub struct InventoryService<S, P>
where
    S: OrderStorage,
    P: SupplierService,
{
    storage: Arc<S>,
    supplier: Arc<P>,
    retry: RetryConfig,
    /// One lock per order, held for the whole placement
    placements: Mutex<HashMap<OrderId, Arc<Mutex<()>>>>,
}

impl<S, P> InventoryService<S, P>
where
    S: OrderStorage,
    P: SupplierService,
{
    pub fn new(storage: Arc<S>, supplier: Arc<P>, retry: RetryConfig) -> Self {
        Self {
            storage,
            supplier,
            retry,
            placements: Mutex::new(HashMap::new()),
        }
    }

    async fn placement_lock(&self, id: OrderId) -> Arc<Mutex<()>> {
        let mut placements = self.placements.lock().await;
        placements.entry(id).or_default().clone()
    }
}

#[async_trait]
impl<S, P> Inventory for InventoryService<S, P>
where
    S: OrderStorage,
    P: SupplierService,
{
    async fn get(&self, id: OrderId) -> Result<Order, AppError> {
        Ok(self.storage.get(id).await?)
    }

    async fn create(&self, order: NewOrder) -> Result<Order, AppError> {
        let created = self.storage.create(order).await?;
        tracing::info!(order_id = %created.id, item = %created.item, "Order created");
        Ok(created)
    }

    async fn cancel(&self, id: OrderId) -> Result<Order, AppError> {
        let order = self.storage.get(id).await?;
        self.storage.cancel(&order).await?;
        tracing::info!(order_id = %id, from = %order.status, "Order cancelled");

        Ok(self.storage.get(id).await?)
    }

    async fn list(&self) -> Result<Vec<Order>, AppError> {
        Ok(self.storage.list().await?)
    }

    async fn place_order(&self, id: OrderId) -> Result<Order, AppError> {
        // A second placement waits here and then finds the order Placed
        let lock = self.placement_lock(id).await;
        let _placing = lock.lock().await;

        let order = self.storage.get(id).await?;
        if order.status != OrderStatus::Created {
            return Err(DomainError::InvalidState(format!(
                "Order {} is {}, only Created orders can be placed",
                id, order.status
            ))
            .into());
        }

        // Same key for every attempt of this placement
        let key = Uuid::new_v4().to_string();
        let supplier = &self.supplier;
        let (order_ref, key_ref) = (&order, key.as_str());

        if let Err(e) = self
            .retry
            .run("place_order", move || supplier.place_order(order_ref, key_ref))
            .await
        {
            tracing::warn!(order_id = %id, error = %e, "Supplier did not accept order");
            return Err(e.into());
        }

        match self
            .storage
            .transition(id, OrderStatus::Created, OrderStatus::Placed)
            .await
        {
            Ok(placed) => {
                tracing::info!(order_id = %id, idempotency_key = %key, "Order placed with supplier");
                Ok(placed)
            }
            Err(e) => {
                // Cancelled while the supplier call was in flight
                tracing::warn!(order_id = %id, error = %e, "Order changed during placement");
                Err(e.into())
            }
        }
    }

    async fn get_status(&self, id: OrderId) -> Result<SupplierStatus, AppError> {
        let order = self.storage.get(id).await?;
        if order.placed_at.is_none() {
            return Err(DomainError::InvalidState(format!(
                "Order {} has not been placed with the supplier",
                id
            ))
            .into());
        }

        let supplier = &self.supplier;
        let order_ref = &order;
        let status = self
            .retry
            .run("get_status", move || supplier.get_status(order_ref))
            .await?;

        tracing::debug!(order_id = %id, %status, "Supplier status");
        Ok(status)
    }

    async fn confirm(&self, id: OrderId) -> Result<Order, AppError> {
        let order = self.storage.get(id).await?;
        if order.status != OrderStatus::Placed {
            return Err(DomainError::InvalidState(format!(
                "Order {} is {}, only Placed orders can be confirmed",
                id, order.status
            ))
            .into());
        }

        let supplier = &self.supplier;
        let order_ref = &order;
        let status = self
            .retry
            .run("get_status", move || supplier.get_status(order_ref))
            .await?;

        if !status.is_committed() {
            return Err(DomainError::InvalidState(format!(
                "Supplier reports order {} as {}",
                id, status
            ))
            .into());
        }

        let confirmed = self
            .storage
            .transition(id, OrderStatus::Placed, OrderStatus::Confirmed)
            .await?;
        tracing::info!(order_id = %id, supplier_status = %status, "Order confirmed");
        Ok(confirmed)
    }
}
