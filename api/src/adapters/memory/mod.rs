//! In-memory adapters
//!
//! Orders live for the lifetime of the process; each storage instance owns
//! its own state.

pub mod order_storage;

pub use order_storage::InMemoryOrderStorage;
