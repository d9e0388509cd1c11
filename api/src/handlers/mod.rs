//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod orders;

pub use orders::{
    cancel_order, confirm_order, create_order, get_order, get_order_status, list_orders,
    place_order,
};
