//! Type-safe wrappers around [`ResourceClient`](actor_framework::ResourceClient).
//!
//! Every client implements [`ActorClient`](actor_framework::ActorClient) for the shared
//! read surface and adds the operations specific to its resource. Framework errors are
//! turned back into the resource's own error enum by [`map_error`](actor_framework::ActorClient::map_error).

pub mod address_client;
pub mod material_client;
pub mod order_client;
pub mod party_client;

pub use address_client::*;
pub use material_client::*;
pub use order_client::*;
pub use party_client::*;
