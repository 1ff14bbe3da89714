//! Error types for the Party actor.

use thiserror::Error;

/// Errors that can occur during party operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PartyError {
    /// The requested party was not found.
    #[error("Party not found: {0}")]
    NotFound(String),

    /// The party data provided is invalid.
    #[error("Party validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for PartyError {
    fn from(msg: String) -> Self {
        PartyError::ActorCommunicationError(msg)
    }
}
