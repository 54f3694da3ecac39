// Centralized error handling

use crate::models::api::ErrorResponse;
use crate::models::user::UserStatus;
use crate::utils::time::iso_timestamp;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

/// Errors produced while validating or applying a user registry action
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("{0}")]
    Validation(String),

    #[error("User with ID {0} not found")]
    NotFound(u32),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),
}

impl RegistryError {
    /// Status code this error maps to when kinds are reported separately
    pub fn status_code(&self) -> StatusCode {
        match self {
            RegistryError::Validation(_) => StatusCode::BAD_REQUEST,
            RegistryError::NotFound(_) => StatusCode::NOT_FOUND,
            RegistryError::UnknownAction(_) => StatusCode::BAD_REQUEST,
            RegistryError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RegistryError::Validation(_) => "Validation error",
            RegistryError::NotFound(_) => "User not found",
            RegistryError::UnknownAction(_) => "Unknown action",
            RegistryError::MalformedRequest(_) => "Malformed request",
        }
    }
}

/// Registry failure as surfaced over HTTP
///
/// Unless `distinct_status` is set every kind is reported as a 500
/// "Internal server error", which is what device firmware in the field
/// already expects.
#[derive(Debug)]
pub struct UserApiError {
    pub error: RegistryError,
    pub distinct_status: bool,
}

impl UserApiError {
    pub fn new(error: RegistryError, distinct_status: bool) -> Self {
        Self {
            error,
            distinct_status,
        }
    }
}

impl IntoResponse for UserApiError {
    fn into_response(self) -> Response {
        let (status, label) = if self.distinct_status {
            (self.error.status_code(), self.error.label())
        } else {
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        };

        (
            status,
            Json(ErrorResponse {
                success: false,
                error: label.to_string(),
                message: self.error.to_string(),
                timestamp: Some(iso_timestamp()),
            }),
        )
            .into_response()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    #[error("Username, productId, and status are required")]
    MissingFields,

    #[error("Status must be one of: {}", UserStatus::accepted_values())]
    InvalidStatus,

    #[error("Database connection error. Please try again later.")]
    StoreUnavailable,

    #[error("Malformed request: {0}")]
    MalformedRequest(String),
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let (status, label) = match &self {
            ProductError::MissingFields => (StatusCode::BAD_REQUEST, "Missing required fields"),
            ProductError::InvalidStatus => (StatusCode::BAD_REQUEST, "Invalid status"),
            ProductError::StoreUnavailable => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to update product status",
            ),
            ProductError::MalformedRequest(_) => (StatusCode::BAD_REQUEST, "Malformed request"),
        };

        (
            status,
            Json(ErrorResponse {
                success: false,
                error: label.to_string(),
                message: self.to_string(),
                timestamp: None,
            }),
        )
            .into_response()
    }
}
