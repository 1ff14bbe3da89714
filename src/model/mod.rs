//! Marketplace records. Each top-level record is owned by one resource actor.

pub mod address;
pub mod ids;
pub mod material;
pub mod order;
pub mod party;
pub mod status;

pub use address::*;
pub use ids::*;
pub use material::*;
pub use order::*;
pub use party::*;
pub use status::*;
