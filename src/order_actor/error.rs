//! Error types for the Order actor.

use crate::address_actor::AddressError;
use crate::material_actor::MaterialError;
use crate::model::{AvailableActions, OrderStatus};
use crate::party_actor::PartyError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The order, or something it references, does not exist or is not visible
    /// to the caller.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The caller may not perform this operation on the order.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The transition table does not allow `current -> requested`.
    #[error("Cannot change order status from {current} to {requested}. Available actions: {available}")]
    InvalidTransition {
        current: OrderStatus,
        requested: OrderStatus,
        available: AvailableActions,
    },

    /// The order data provided is invalid.
    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// There is insufficient stock to fulfill the order.
    #[error("{0}")]
    InsufficientStock(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}

impl From<PartyError> for OrderError {
    fn from(e: PartyError) -> Self {
        match e {
            PartyError::NotFound(_) => OrderError::NotFound(e.to_string()),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<MaterialError> for OrderError {
    fn from(e: MaterialError) -> Self {
        match e {
            MaterialError::NotFound(_) => OrderError::NotFound(e.to_string()),
            MaterialError::InsufficientStock { .. } => OrderError::InsufficientStock(e.to_string()),
            MaterialError::InvalidQuantity(_) | MaterialError::ValidationError(_) => {
                OrderError::ValidationError(e.to_string())
            }
            MaterialError::ActorCommunicationError(_) => {
                OrderError::ActorCommunicationError(e.to_string())
            }
        }
    }
}

impl From<AddressError> for OrderError {
    fn from(e: AddressError) -> Self {
        match e {
            AddressError::NotFound(_) => OrderError::NotFound(e.to_string()),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
