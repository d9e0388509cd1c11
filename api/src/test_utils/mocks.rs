//! Hand-written implementations of port traits
//!
//! These can be configured for testing and record every call so tests can
//! verify behavior.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::domain::entities::{Order, OrderId, SupplierStatus};
use crate::domain::ports::SupplierService;
use crate::error::SupplierError;

// ============================================================================
// Stub Supplier
// ============================================================================

enum PlaceBehavior {
    Accept,
    /// Transport failure for the first `n` attempts, then accept
    FailTimes(usize),
    Unreachable,
    Reject(String),
}

/// Supplier double with scripted behaviour and a call log
pub struct StubSupplier {
    behavior: PlaceBehavior,
    status: SupplierStatus,
    delay: Option<Duration>,
    /// (order id, idempotency key) for every place attempt
    attempts: Arc<RwLock<Vec<(OrderId, String)>>>,
    /// Orders the supplier actually accepted
    placed: Arc<RwLock<Vec<(OrderId, String)>>>,
}

impl Default for StubSupplier {
    fn default() -> Self {
        Self {
            behavior: PlaceBehavior::Accept,
            status: SupplierStatus::Accepted,
            delay: None,
            attempts: Arc::new(RwLock::new(Vec::new())),
            placed: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl StubSupplier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with a transport error
    pub fn unreachable(mut self) -> Self {
        self.behavior = PlaceBehavior::Unreachable;
        self
    }

    /// The first `n` placements fail with a transport error
    pub fn failing_times(mut self, n: usize) -> Self {
        self.behavior = PlaceBehavior::FailTimes(n);
        self
    }

    /// Every placement is rejected with `reason`
    pub fn rejecting(mut self, reason: &str) -> Self {
        self.behavior = PlaceBehavior::Reject(reason.to_string());
        self
    }

    /// Status reported for placed orders
    pub fn with_status(mut self, status: SupplierStatus) -> Self {
        self.status = status;
        self
    }

    /// Sleep before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn placed_orders(&self) -> Vec<(OrderId, String)> {
        self.placed.read().unwrap().clone()
    }

    pub fn place_attempts(&self) -> usize {
        self.attempts.read().unwrap().len()
    }

    pub fn attempt_keys(&self) -> Vec<String> {
        self.attempts
            .read()
            .unwrap()
            .iter()
            .map(|(_, key)| key.clone())
            .collect()
    }
}

#[async_trait]
impl SupplierService for StubSupplier {
    async fn place_order(
        &self,
        order: &Order,
        idempotency_key: &str,
    ) -> Result<(), SupplierError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let attempt = {
            let mut attempts = self.attempts.write().unwrap();
            attempts.push((order.id, idempotency_key.to_string()));
            attempts.len()
        };

        match &self.behavior {
            PlaceBehavior::Unreachable => {
                return Err(SupplierError::Transport("connection refused".to_string()))
            }
            PlaceBehavior::FailTimes(n) if attempt <= *n => {
                return Err(SupplierError::Transport("connection reset".to_string()))
            }
            PlaceBehavior::Reject(reason) => return Err(SupplierError::Rejected(reason.clone())),
            _ => {}
        }

        self.placed
            .write()
            .unwrap()
            .push((order.id, idempotency_key.to_string()));
        Ok(())
    }

    async fn get_status(&self, order: &Order) -> Result<SupplierStatus, SupplierError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if matches!(self.behavior, PlaceBehavior::Unreachable) {
            return Err(SupplierError::Transport("connection refused".to_string()));
        }

        let known = self
            .placed
            .read()
            .unwrap()
            .iter()
            .any(|(id, _)| *id == order.id);
        if known {
            Ok(self.status)
        } else {
            Err(SupplierError::NotFound(order.id.to_string()))
        }
    }
}
