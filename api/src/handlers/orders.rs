//! Order handlers
//!
//! JSON endpoints for the order lifecycle: create, read, cancel, place with
//! the supplier, supplier status and confirmation.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::domain::entities::{NewOrder, Order, OrderId, SupplierStatus};
use crate::error::{AppError, DomainError};
use crate::AppState;

/// Response body for supplier status queries
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub order_id: OrderId,
    pub supplier_status: SupplierStatus,
}

/// GET /orders
pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>, AppError> {
    let orders = state.inventory.list().await?;
    Ok(Json(orders))
}

/// POST /orders
///
/// Create an order. `id` is optional and assigned when absent.
/// A body that does not parse as an order is a validation error.
pub async fn create_order(
    State(state): State<AppState>,
    request: Result<Json<NewOrder>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let Json(request) = request.map_err(|e| DomainError::Validation(e.body_text()))?;
    let order = state.inventory.create(request).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /orders/:id
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Order>, AppError> {
    let order = state.inventory.get(OrderId(id)).await?;
    Ok(Json(order))
}

/// POST /orders/:id/cancel
pub async fn cancel_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Order>, AppError> {
    let order = state.inventory.cancel(OrderId(id)).await?;
    Ok(Json(order))
}

/// POST /orders/:id/place
///
/// Forward a created order to the supplier.
pub async fn place_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Order>, AppError> {
    let order = state.inventory.place_order(OrderId(id)).await?;
    Ok(Json(order))
}

/// GET /orders/:id/status
pub async fn get_order_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<StatusResponse>, AppError> {
    let order_id = OrderId(id);
    let supplier_status = state.inventory.get_status(order_id).await?;
    Ok(Json(StatusResponse {
        order_id,
        supplier_status,
    }))
}

/// POST /orders/:id/confirm
pub async fn confirm_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Order>, AppError> {
    let order = state.inventory.confirm(OrderId(id)).await?;
    Ok(Json(order))
}
