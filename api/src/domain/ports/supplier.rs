//! Supplier port trait
//!
//! Forwards orders to the external supplier and reports their status there.

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::{Order, SupplierStatus};
use crate::error::SupplierError;

/// External supplier integration
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SupplierService: Send + Sync {
    /// Transmit an order to the supplier
    ///
    /// `idempotency_key` is stable across retries of the same placement so the
    /// supplier can discard duplicates.
    async fn place_order(&self, order: &Order, idempotency_key: &str)
        -> Result<(), SupplierError>;

    /// Query supplier-side status for a previously placed order
    async fn get_status(&self, order: &Order) -> Result<SupplierStatus, SupplierError>;
}
