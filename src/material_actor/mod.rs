//! # Material Actor
//!
//! The supplier catalog and its stock levels. Stock moves only through
//! [`MaterialAction`]s: the order actor reserves on placement and releases on
//! cancellation or rejection, each as one message, so concurrent orders for the same
//! material can never oversell.
//!
//! ```rust,ignore
//! let left = material_client.reserve_stock(material_id, 10).await?;
//! material_client.release_stock(material_id, 10).await?;
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Material;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Material actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Material>, ResourceClient<Material>) {
    ResourceActor::new(buffer_size)
}
