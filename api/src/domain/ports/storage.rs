//! Order storage port trait
//!
//! Persists and retrieves orders by identifier.
//! Implementations must serialise mutations of a single order while letting
//! operations on different orders run concurrently.

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::{NewOrder, Order, OrderId, OrderStatus};
use crate::error::DomainError;

/// Storage for Order entities
#[cfg_attr(test, automock)]
#[async_trait]
pub trait OrderStorage: Send + Sync {
    /// Get an order by ID. Fails with `NotFound` when unknown.
    async fn get(&self, id: OrderId) -> Result<Order, DomainError>;

    /// Create a new order in the `Created` state.
    ///
    /// Assigns the next identifier when `order.id` is absent.
    async fn create(&self, order: NewOrder) -> Result<Order, DomainError>;

    /// Move an existing order to `Cancelled`.
    ///
    /// Fails with `NotFound` if unknown and `InvalidState` if the order is
    /// already terminal.
    async fn cancel(&self, order: &Order) -> Result<(), DomainError>;

    /// Compare-and-set the status of an order
    ///
    /// Fails with `InvalidState` when the current status is not `from` or the
    /// lifecycle does not allow `from -> to`.
    async fn transition(
        &self,
        id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Order, DomainError>;

    /// List all orders ordered by ID
    async fn list(&self) -> Result<Vec<Order>, DomainError>;
}
