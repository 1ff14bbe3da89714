//! Error types for the Material actor.

use thiserror::Error;

/// Errors that can occur during material operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MaterialError {
    /// The requested material was not found.
    #[error("Material not found: {0}")]
    NotFound(String),

    /// The requested quantity exceeds the available stock.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// The provided quantity is invalid (zero).
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// The material data provided is invalid.
    #[error("Material validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for MaterialError {
    fn from(msg: String) -> Self {
        MaterialError::ActorCommunicationError(msg)
    }
}
