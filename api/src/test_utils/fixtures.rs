//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use chrono::Utc;

use crate::domain::entities::{NewOrder, Order, OrderId, OrderStatus};

/// The canonical create request: three widgets
pub fn widget() -> NewOrder {
    NewOrder::new("widget", 3)
}

/// A created order for three widgets with the given ID
pub fn test_order(id: i64) -> Order {
    let now = Utc::now();
    Order {
        id: OrderId(id),
        item: "widget".to_string(),
        quantity: 3,
        status: OrderStatus::Created,
        created_at: now,
        updated_at: now,
        placed_at: None,
    }
}
