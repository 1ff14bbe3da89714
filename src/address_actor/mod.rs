//! # Address Actor
//!
//! Delivery and pickup addresses. Orders reference them by id; the order actor checks
//! ownership at placement and discovery reads their coordinates.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Address;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Address actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Address>, ResourceClient<Address>) {
    ResourceActor::new(buffer_size)
}
