//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and external systems.

pub mod inventory_service;
pub mod retry;

pub use inventory_service::InventoryService;
pub use retry::RetryConfig;
