//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod acme;
pub mod memory;

pub use acme::AcmeSupplierClient;
pub use memory::InMemoryOrderStorage;
