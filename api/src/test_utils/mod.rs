//! Test utilities
//!
//! Hand-written test doubles and fixtures for unit testing.
//!
//! Two styles of double are used side by side:
//! - `StubSupplier` here: scripted behaviour plus a call log, good for
//!   asserting on what the service sent
//! - `MockSupplierService` generated by mockall on the port trait, good for
//!   strict expectations (`times`, `never`, argument matchers)

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
