//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod inventory;
pub mod storage;
pub mod supplier;

pub use inventory::Inventory;
#[cfg(test)]
pub use storage::MockOrderStorage;
pub use storage::OrderStorage;
#[cfg(test)]
pub use supplier::MockSupplierService;
pub use supplier::SupplierService;
