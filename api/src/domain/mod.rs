//! Domain layer
//!
//! Order lifecycle rules with no external dependencies.
//! - `entities`: The order entity and its status types
//! - `ports`: Storage, supplier and inventory traits implemented by adapters

pub mod entities;
pub mod ports;
