//! Network exposure of the inventory
//!
//! `InventoryTransporter` is the inventory capability set plus the ability to
//! serve it on an already-bound listener. `HttpTransporter` serves JSON over
//! HTTP with axum.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domain::entities::{NewOrder, Order, OrderId, SupplierStatus};
use crate::domain::ports::Inventory;
use crate::error::{AppError, TransportError};
use crate::handlers;
use crate::AppState;

/// An inventory that can be served over a listener
#[async_trait]
pub trait InventoryTransporter: Inventory {
    /// Serve requests on `listener` until shutdown or a fatal I/O error.
    ///
    /// The listener and all connection tasks are released before returning.
    async fn serve(&self, listener: TcpListener) -> Result<(), TransportError>;
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the HTTP router for an inventory
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/orders",
            get(handlers::list_orders).post(handlers::create_order),
        )
        .route("/orders/:id", get(handlers::get_order))
        .route("/orders/:id/cancel", post(handlers::cancel_order))
        .route("/orders/:id/place", post(handlers::place_order))
        .route("/orders/:id/status", get(handlers::get_order_status))
        .route("/orders/:id/confirm", post(handlers::confirm_order))
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state)
}

/// Requests a running `serve` to stop accepting and drain connections
#[derive(Clone)]
pub struct ShutdownHandle(Arc<watch::Sender<bool>>);

impl ShutdownHandle {
    pub fn shutdown(&self) {
        self.0.send_replace(true);
    }
}

/// HTTP transport for an inventory
pub struct HttpTransporter {
    inventory: Arc<dyn Inventory>,
    shutdown: Arc<watch::Sender<bool>>,
}

impl HttpTransporter {
    pub fn new(inventory: Arc<dyn Inventory>) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            inventory,
            shutdown: Arc::new(shutdown),
        }
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle(self.shutdown.clone())
    }
}

#[async_trait]
impl Inventory for HttpTransporter {
    async fn get(&self, id: OrderId) -> Result<Order, AppError> {
        self.inventory.get(id).await
    }

    async fn create(&self, order: NewOrder) -> Result<Order, AppError> {
        self.inventory.create(order).await
    }

    async fn cancel(&self, id: OrderId) -> Result<Order, AppError> {
        self.inventory.cancel(id).await
    }

    async fn list(&self) -> Result<Vec<Order>, AppError> {
        self.inventory.list().await
    }

    async fn place_order(&self, id: OrderId) -> Result<Order, AppError> {
        self.inventory.place_order(id).await
    }

    async fn get_status(&self, id: OrderId) -> Result<SupplierStatus, AppError> {
        self.inventory.get_status(id).await
    }

    async fn confirm(&self, id: OrderId) -> Result<Order, AppError> {
        self.inventory.confirm(id).await
    }
}

#[async_trait]
impl InventoryTransporter for HttpTransporter {
    async fn serve(&self, listener: TcpListener) -> Result<(), TransportError> {
        let addr = listener.local_addr()?;
        let app = router(AppState {
            inventory: self.inventory.clone(),
        });

        let mut shutdown = self.shutdown.subscribe();
        let signal = async move {
            loop {
                let stop = *shutdown.borrow_and_update();
                // A dropped sender also ends the wait
                if stop || shutdown.changed().await.is_err() {
                    break;
                }
            }
        };

        tracing::info!("Listening on {}", addr);
        let result = axum::serve(listener, app)
            .with_graceful_shutdown(signal)
            .await;

        match &result {
            Ok(()) => tracing::info!(%addr, "Listener closed"),
            Err(e) => tracing::error!(%addr, error = %e, "Listener failed"),
        }
        Ok(result?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::adapters::InMemoryOrderStorage;
    use crate::app::{InventoryService, RetryConfig};
    use crate::domain::entities::OrderStatus;
    use crate::test_utils::{widget, StubSupplier};

    fn test_inventory() -> Arc<dyn Inventory> {
        Arc::new(InventoryService::new(
            Arc::new(InMemoryOrderStorage::new()),
            Arc::new(StubSupplier::new()),
            RetryConfig::no_retry(),
        ))
    }

    async fn create_through<T: InventoryTransporter>(transporter: &T) -> Order {
        transporter.create(widget()).await.unwrap()
    }

    #[tokio::test]
    async fn transporter_exposes_inventory_operations() {
        let transporter = HttpTransporter::new(test_inventory());

        let order = create_through(&transporter).await;
        assert_eq!(order.id, OrderId(1));

        let placed = transporter.place_order(order.id).await.unwrap();
        assert_eq!(placed.status, OrderStatus::Placed);
        assert_eq!(
            transporter.get_status(order.id).await.unwrap(),
            SupplierStatus::Accepted
        );
    }

    #[tokio::test]
    async fn health_endpoint() {
        let app = router(AppState {
            inventory: test_inventory(),
        });

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn serve_handles_requests_until_shutdown() {
        let transporter = Arc::new(HttpTransporter::new(test_inventory()));
        let shutdown = transporter.shutdown_handle();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = {
            let transporter = transporter.clone();
            tokio::spawn(async move { transporter.serve(listener).await })
        };

        {
            let client = reqwest::Client::new();
            let created: Order = client
                .post(format!("http://{}/orders", addr))
                .json(&serde_json::json!({ "item": "widget", "quantity": 3 }))
                .send()
                .await
                .unwrap()
                .json()
                .await
                .unwrap();
            assert_eq!(created.id, OrderId(1));

            let response = client
                .get(format!("http://{}/orders/999", addr))
                .send()
                .await
                .unwrap();
            assert_eq!(response.status().as_u16(), 404);
        }

        shutdown.shutdown();
        let result = tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .expect("serve did not stop after shutdown")
            .unwrap();
        assert!(result.is_ok());

        // The port is free again once serve has returned
        let rebound = TcpListener::bind(addr).await;
        assert!(rebound.is_ok());

        // State outlives the listener
        assert_eq!(
            transporter.get(OrderId(1)).await.unwrap().status,
            OrderStatus::Created
        );
    }

    #[tokio::test]
    async fn shutdown_before_serve_returns_immediately() {
        let transporter = HttpTransporter::new(test_inventory());
        transporter.shutdown_handle().shutdown();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let result = tokio::time::timeout(Duration::from_secs(5), transporter.serve(listener))
            .await
            .expect("serve should stop immediately");
        assert!(result.is_ok());
    }
}
