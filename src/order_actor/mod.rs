//! # Order Actor
//!
//! Orders and their status workflow. The actor owns every order, so a transition
//! re-reads the stored status, validates it against the table and commits in a single
//! message: two suppliers' clicks can never interleave.
//!
//! - [`workflow`]: the state machine as pure functions.
//! - [`stats`]: dashboard aggregates.
//! - [`entity`]: placement checks, stock reservation, stock release.

pub mod actions;
pub mod entity;
pub mod error;
pub mod stats;
pub mod workflow;

pub use actions::*;
pub use entity::OrderContext;
pub use error::*;
pub use stats::{compute_order_stats, MonthlyStats, OrderStats};

use crate::model::Order;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Order actor and its client. Run it with an [`OrderContext`].
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size)
}
