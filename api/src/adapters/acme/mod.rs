//! Acme supplier adapter
//!
//! Implementation of SupplierService over the supplier's HTTP API.

pub mod client;

pub use client::AcmeSupplierClient;
