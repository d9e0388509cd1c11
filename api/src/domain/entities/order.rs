//! Order domain entity
//!
//! The single entity of the inventory service. An order is created locally,
//! placed with the external supplier, and ends either confirmed or cancelled.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest item name accepted on create
pub const MAX_ITEM_LEN: usize = 256;

/// Unique identifier for an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub i64);

impl From<i64> for OrderId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order lifecycle status
///
/// `Created -> Placed -> {Confirmed, Cancelled}`; a `Created` order may also
/// be cancelled directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Created,
    Placed,
    Confirmed,
    Cancelled,
}

impl OrderStatus {
    /// Terminal states accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Confirmed | OrderStatus::Cancelled)
    }

    /// Whether the state machine allows moving from `self` to `next`
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Created, OrderStatus::Placed)
                | (OrderStatus::Created, OrderStatus::Cancelled)
                | (OrderStatus::Placed, OrderStatus::Confirmed)
                | (OrderStatus::Placed, OrderStatus::Cancelled)
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Created => write!(f, "Created"),
            OrderStatus::Placed => write!(f, "Placed"),
            OrderStatus::Confirmed => write!(f, "Confirmed"),
            OrderStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "created" => Ok(OrderStatus::Created),
            "placed" => Ok(OrderStatus::Placed),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "cancelled" | "canceled" => Ok(OrderStatus::Cancelled),
            _ => Err(format!("Unknown order status: {}", s)),
        }
    }
}

/// Supplier-side view of a placed order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupplierStatus {
    Pending,
    Accepted,
    Shipped,
    Rejected,
}

impl SupplierStatus {
    /// The supplier has committed to fulfilling the order
    pub fn is_committed(&self) -> bool {
        matches!(self, SupplierStatus::Accepted | SupplierStatus::Shipped)
    }
}

impl std::fmt::Display for SupplierStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SupplierStatus::Pending => write!(f, "pending"),
            SupplierStatus::Accepted => write!(f, "accepted"),
            SupplierStatus::Shipped => write!(f, "shipped"),
            SupplierStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// A stocked order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub item: String,
    pub quantity: u32,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set once the supplier has accepted the order; survives cancellation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placed_at: Option<DateTime<Utc>>,
}

/// Input for creating an order
///
/// `id` is optional; storage assigns the next free identifier when absent.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NewOrder {
    #[serde(default)]
    pub id: Option<OrderId>,
    pub item: String,
    pub quantity: u32,
}

impl NewOrder {
    pub fn new(item: impl Into<String>, quantity: u32) -> Self {
        Self {
            id: None,
            item: item.into(),
            quantity,
        }
    }

    pub fn with_id(mut self, id: OrderId) -> Self {
        self.id = Some(id);
        self
    }

    /// Check the order content, returning a human-readable reason on failure
    pub fn validate(&self) -> Result<(), String> {
        let item = self.item.trim();
        if item.is_empty() {
            return Err("item must not be empty".to_string());
        }
        if item.chars().count() > MAX_ITEM_LEN {
            return Err(format!("item must be at most {} characters", MAX_ITEM_LEN));
        }
        if self.quantity == 0 {
            return Err("quantity must be greater than zero".to_string());
        }
        if let Some(id) = self.id {
            if id.0 <= 0 {
                return Err(format!("order id must be positive, got {}", id));
            }
        }
        Ok(())
    }
}
