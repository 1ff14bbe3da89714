//! The HTTP error envelope.
//!
//! Every handler returns [`ApiError`]; [`ApiError::status_code`] is the single place
//! domain failures become status codes.

use crate::address_actor::AddressError;
use crate::material_actor::MaterialError;
use crate::order_actor::OrderError;
use crate::party_actor::PartyError;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    InvalidTransition {
        message: String,
        available: Vec<&'static str>,
    },

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_actions: Option<Vec<&'static str>>,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::InvalidTransition { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Internal details stay in the logs.
    pub fn response_message(&self) -> String {
        match self {
            ApiError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let ApiError::Internal(detail) = &self {
            error!(error = %detail, "Request failed");
        }

        let envelope = ErrorEnvelope {
            status: status.as_u16(),
            message: self.response_message(),
            available_actions: match self {
                ApiError::InvalidTransition { available, .. } => Some(available),
                _ => None,
            },
        };
        (status, Json(envelope)).into_response()
    }
}

impl From<OrderError> for ApiError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::NotFound(_) => ApiError::NotFound(e.to_string()),
            OrderError::Forbidden(_) => ApiError::Forbidden(e.to_string()),
            OrderError::InvalidTransition { ref available, .. } => ApiError::InvalidTransition {
                available: available.labels(),
                message: e.to_string(),
            },
            OrderError::ValidationError(_) => ApiError::BadRequest(e.to_string()),
            OrderError::InsufficientStock(_) => ApiError::Conflict(e.to_string()),
            OrderError::ActorCommunicationError(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<MaterialError> for ApiError {
    fn from(e: MaterialError) -> Self {
        match e {
            MaterialError::NotFound(_) => ApiError::NotFound(e.to_string()),
            MaterialError::InsufficientStock { .. } => ApiError::Conflict(e.to_string()),
            MaterialError::InvalidQuantity(_) | MaterialError::ValidationError(_) => {
                ApiError::BadRequest(e.to_string())
            }
            MaterialError::ActorCommunicationError(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<PartyError> for ApiError {
    fn from(e: PartyError) -> Self {
        match e {
            PartyError::NotFound(_) => ApiError::NotFound(e.to_string()),
            PartyError::ValidationError(_) => ApiError::BadRequest(e.to_string()),
            PartyError::ActorCommunicationError(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<AddressError> for ApiError {
    fn from(e: AddressError) -> Self {
        match e {
            AddressError::NotFound(_) => ApiError::NotFound(e.to_string()),
            AddressError::ValidationError(_) => ApiError::BadRequest(e.to_string()),
            AddressError::ActorCommunicationError(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::BadRequest(format!("Invalid request body: {e}"))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}
