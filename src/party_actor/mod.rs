//! # Party Actor
//!
//! Owns vendor and supplier accounts. No dependencies (`Context = ()`) and no custom
//! actions; the order actor reads parties to check roles, and discovery lists
//! suppliers by their profile coordinate.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Party;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Party actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Party>, ResourceClient<Party>) {
    ResourceActor::new(buffer_size)
}
