//! Inventory capability set
//!
//! The combined behaviours of order storage and supplier integration,
//! addressed by order ID. This is what a transport exposes over the network.

use async_trait::async_trait;

use crate::domain::entities::{NewOrder, Order, OrderId, SupplierStatus};
use crate::error::AppError;

#[async_trait]
pub trait Inventory: Send + Sync {
    /// Get an order by ID
    async fn get(&self, id: OrderId) -> Result<Order, AppError>;

    /// Create a new order
    async fn create(&self, order: NewOrder) -> Result<Order, AppError>;

    /// Cancel an order, returning it in its cancelled state
    async fn cancel(&self, id: OrderId) -> Result<Order, AppError>;

    /// List all orders
    async fn list(&self) -> Result<Vec<Order>, AppError>;

    /// Forward a created order to the supplier and mark it placed
    async fn place_order(&self, id: OrderId) -> Result<Order, AppError>;

    /// Ask the supplier for the status of a placed order (read-only)
    async fn get_status(&self, id: OrderId) -> Result<SupplierStatus, AppError>;

    /// Mark a placed order confirmed once the supplier has committed to it
    async fn confirm(&self, id: OrderId) -> Result<Order, AppError>;
}
