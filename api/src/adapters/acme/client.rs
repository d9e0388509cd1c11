//! Acme supplier API client implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Order, SupplierStatus};
use crate::domain::ports::SupplierService;
use crate::error::SupplierError;

/// Header carrying the placement key so the supplier can drop duplicates
pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

/// Implementation of the supplier client over Acme's JSON API
pub struct AcmeSupplierClient {
    http: Client,
    base_url: String,
}

impl AcmeSupplierClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        order: &Order,
        response: reqwest::Response,
    ) -> Result<T, SupplierError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| SupplierError::Deserialization(e.to_string()))
        } else {
            Err(Self::error_for(order, status.as_u16(), response).await)
        }
    }

    async fn handle_empty_response(
        &self,
        order: &Order,
        response: reqwest::Response,
    ) -> Result<(), SupplierError> {
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            Err(Self::error_for(order, status.as_u16(), response).await)
        }
    }

    async fn error_for(order: &Order, status: u16, response: reqwest::Response) -> SupplierError {
        let message = response.text().await.unwrap_or_default();
        match status {
            400 | 422 => SupplierError::Rejected(message),
            404 => SupplierError::NotFound(order.id.to_string()),
            429 => SupplierError::RateLimited,
            _ => SupplierError::Api { status, message },
        }
    }
}

/// Request types for the supplier API
#[derive(Serialize)]
struct PlaceOrderRequest<'a> {
    order_id: i64,
    item: &'a str,
    quantity: u32,
}

#[derive(Deserialize)]
struct StatusResponse {
    status: SupplierStatus,
}

#[async_trait]
impl SupplierService for AcmeSupplierClient {
    async fn place_order(
        &self,
        order: &Order,
        idempotency_key: &str,
    ) -> Result<(), SupplierError> {
        tracing::debug!(order_id = %order.id, url = %self.base_url, "Placing order with supplier");

        let resp = self
            .http
            .post(self.api_url("/orders"))
            .header(IDEMPOTENCY_HEADER, idempotency_key)
            .json(&PlaceOrderRequest {
                order_id: order.id.0,
                item: &order.item,
                quantity: order.quantity,
            })
            .send()
            .await?;

        self.handle_empty_response(order, resp).await
    }

    async fn get_status(&self, order: &Order) -> Result<SupplierStatus, SupplierError> {
        let resp = self
            .http
            .get(self.api_url(&format!("/orders/{}/status", order.id)))
            .send()
            .await?;

        let body: StatusResponse = self.handle_response(order, resp).await?;
        Ok(body.status)
    }
}
