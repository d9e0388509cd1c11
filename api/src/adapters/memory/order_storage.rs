//! In-memory adapter for OrderStorage
//!
//! The map of orders sits behind a `RwLock`; each order has its own `Mutex`
//! so that cancelling or transitioning one order never blocks another.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::entities::{NewOrder, Order, OrderId, OrderStatus};
use crate::domain::ports::OrderStorage;
use crate::error::DomainError;

struct Inner {
    orders: HashMap<OrderId, Arc<Mutex<Order>>>,
    next_id: i64,
}

/// In-memory implementation of OrderStorage
pub struct InMemoryOrderStorage {
    inner: RwLock<Inner>,
}

impl Default for InMemoryOrderStorage {
    fn default() -> Self {
        Self {
            inner: RwLock::new(Inner {
                orders: HashMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl InMemoryOrderStorage {
    pub fn new() -> Self {
        Self::default()
    }

    async fn entry(&self, id: OrderId) -> Result<Arc<Mutex<Order>>, DomainError> {
        let inner = self.inner.read().await;
        inner
            .orders
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("Order {} not found", id)))
    }
}

fn next_after(id: i64) -> Result<i64, DomainError> {
    id.checked_add(1)
        .ok_or_else(|| DomainError::Validation("Order id space exhausted".to_string()))
}

#[async_trait]
impl OrderStorage for InMemoryOrderStorage {
    async fn get(&self, id: OrderId) -> Result<Order, DomainError> {
        let entry = self.entry(id).await?;
        let order = entry.lock().await;
        Ok(order.clone())
    }

    async fn create(&self, new_order: NewOrder) -> Result<Order, DomainError> {
        new_order.validate().map_err(DomainError::Validation)?;

        let mut inner = self.inner.write().await;

        let id = match new_order.id {
            Some(id) => {
                if inner.orders.contains_key(&id) {
                    return Err(DomainError::AlreadyExists(format!("Order {} already exists", id)));
                }
                // i64::MAX is storable but leaves nothing to assign after it
                inner.next_id = inner.next_id.max(id.0.saturating_add(1));
                id
            }
            None => {
                // Caller-supplied ids can sit ahead of the counter
                while inner.orders.contains_key(&OrderId(inner.next_id)) {
                    inner.next_id = next_after(inner.next_id)?;
                }
                let id = OrderId(inner.next_id);
                inner.next_id = inner.next_id.saturating_add(1);
                id
            }
        };

        let now = Utc::now();
        let order = Order {
            id,
            item: new_order.item.trim().to_string(),
            quantity: new_order.quantity,
            status: OrderStatus::Created,
            created_at: now,
            updated_at: now,
            placed_at: None,
        };

        inner
            .orders
            .insert(id, Arc::new(Mutex::new(order.clone())));

        tracing::debug!(order_id = %id, item = %order.item, quantity = order.quantity, "Order created");
        Ok(order)
    }

    async fn cancel(&self, order: &Order) -> Result<(), DomainError> {
        let entry = self.entry(order.id).await?;
        let mut current = entry.lock().await;

        if current.status.is_terminal() {
            return Err(DomainError::InvalidState(format!(
                "Order {} is already {}",
                current.id, current.status
            )));
        }

        let previous = current.status;
        current.status = OrderStatus::Cancelled;
        current.updated_at = Utc::now();

        tracing::debug!(order_id = %current.id, from = %previous, "Order cancelled");
        Ok(())
    }

    async fn transition(
        &self,
        id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Order, DomainError> {
        let entry = self.entry(id).await?;
        let mut current = entry.lock().await;

        if current.status != from {
            return Err(DomainError::InvalidState(format!(
                "Order {} is {}, expected {}",
                id, current.status, from
            )));
        }
        if !from.can_transition_to(to) {
            return Err(DomainError::InvalidState(format!(
                "Order {} cannot move from {} to {}",
                id, from, to
            )));
        }

        let now = Utc::now();
        current.status = to;
        current.updated_at = now;
        if to == OrderStatus::Placed {
            current.placed_at = Some(now);
        }

        tracing::debug!(order_id = %id, %from, %to, "Order status changed");
        Ok(current.clone())
    }

    async fn list(&self) -> Result<Vec<Order>, DomainError> {
        let entries: Vec<_> = {
            let inner = self.inner.read().await;
            inner.orders.values().cloned().collect()
        };

        let mut orders = Vec::with_capacity(entries.len());
        for entry in entries {
            orders.push(entry.lock().await.clone());
        }
        orders.sort_by_key(|o| o.id);
        Ok(orders)
    }
}
