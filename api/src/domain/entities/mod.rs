//! Domain entities
//!
//! Pure domain models representing core business concepts.

pub mod order;

pub use order::{NewOrder, Order, OrderId, OrderStatus, SupplierStatus};
