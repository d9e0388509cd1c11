//! Unified error types for the inventory API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Order lifecycle and storage errors
//! - `SupplierError`: External supplier client errors
//! - `TransportError`: Failures serving the listener
//! - `AppError`: Application layer errors (wraps the above for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Entity already exists: {0}")]
    AlreadyExists(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Supplier API client errors
#[derive(Debug, Error)]
pub enum SupplierError {
    #[error("Supplier unreachable: {0}")]
    Transport(String),

    #[error("Supplier timed out after {0}ms")]
    Timeout(u64),

    #[error("Order rejected by supplier: {0}")]
    Rejected(String),

    #[error("Supplier has no record of order {0}")]
    NotFound(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl SupplierError {
    /// Whether the failure is a communication problem worth retrying
    pub fn is_transport(&self) -> bool {
        matches!(self, SupplierError::Transport(_) | SupplierError::Timeout(_))
    }
}

impl From<reqwest::Error> for SupplierError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            SupplierError::Deserialization(e.to_string())
        } else {
            SupplierError::Transport(e.to_string())
        }
    }
}

/// Errors from serving the inventory over a listener
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Listener I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Supplier error: {0}")]
    Supplier(#[from] SupplierError),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Domain(DomainError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "Not found", Some(msg.clone()))
            }
            AppError::Domain(DomainError::AlreadyExists(msg)) => {
                (StatusCode::CONFLICT, "Already exists", Some(msg.clone()))
            }
            AppError::Domain(DomainError::Validation(msg)) => (
                StatusCode::BAD_REQUEST,
                "Validation error",
                Some(msg.clone()),
            ),
            AppError::Domain(DomainError::InvalidState(msg)) => {
                (StatusCode::CONFLICT, "Invalid state", Some(msg.clone()))
            }
            AppError::Supplier(e) => {
                tracing::error!("Supplier error: {}", e);
                match e {
                    SupplierError::Rejected(msg) => (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        "Rejected by supplier",
                        Some(msg.clone()),
                    ),
                    SupplierError::NotFound(msg) => (
                        StatusCode::NOT_FOUND,
                        "Unknown to supplier",
                        Some(msg.clone()),
                    ),
                    SupplierError::RateLimited => {
                        (StatusCode::TOO_MANY_REQUESTS, "Rate limited", None)
                    }
                    SupplierError::Transport(_) | SupplierError::Timeout(_) => {
                        (StatusCode::BAD_GATEWAY, "Supplier unreachable", None)
                    }
                    SupplierError::Api { message, .. } => {
                        (StatusCode::BAD_GATEWAY, "Supplier error", Some(message.clone()))
                    }
                    SupplierError::Deserialization(_) => {
                        (StatusCode::BAD_GATEWAY, "Supplier error", None)
                    }
                }
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
