//! # Actor Framework
//!
//! Building blocks for the marketplace's in-memory resource services. Every resource
//! type (parties, materials, delivery addresses, orders) is owned by exactly one
//! [`ResourceActor`] running in its own Tokio task; everything else talks to it through
//! a cloneable [`ResourceClient`].
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]): the domain type plus its create/update/action
//!    payloads and lifecycle hooks.
//! 2. **Runtime** ([`ResourceActor`]): sequential message loop over a private store.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]): typed async requests.
//!
//! ## Coordination between resources
//!
//! Actors never share memory. When an order is placed it reserves stock by sending an
//! `Action` to the material actor, using a client it received as its `Context`.
//! Contexts are handed over in `run()`, so all actors can be constructed before any of
//! them is wired:
//!
//! ```rust
//! use actor_framework::{ActorEntity, ResourceActor, ResourceClient};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Material { id: u32, stock: u32 }
//! #[derive(Debug)] struct MaterialCreate { stock: u32 }
//! #[derive(Debug)] struct MaterialUpdate;
//! #[derive(Debug)] enum MaterialAction { Reserve(u32) }
//! #[derive(Debug, thiserror::Error)] #[error("insufficient stock")] struct StockError;
//!
//! #[async_trait]
//! impl ActorEntity for Material {
//!     type Id = u32; type Create = MaterialCreate; type Update = MaterialUpdate;
//!     type Action = MaterialAction; type ActionResult = u32; type Context = ();
//!     type Error = StockError;
//!     fn from_create_params(id: u32, p: MaterialCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, stock: p.stock })
//!     }
//!     async fn on_update(&mut self, _: MaterialUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, a: MaterialAction, _: &()) -> Result<u32, Self::Error> {
//!         let MaterialAction::Reserve(n) = a;
//!         self.stock = self.stock.checked_sub(n).ok_or(StockError)?;
//!         Ok(self.stock)
//!     }
//! }
//!
//! #[derive(Clone, Debug)] struct Order { id: u32, material: u32, quantity: u32 }
//! #[derive(Debug)] struct OrderCreate { material: u32, quantity: u32 }
//! #[derive(Debug)] struct OrderUpdate;
//! #[derive(Debug)] enum OrderAction {}
//! #[derive(Debug, thiserror::Error)] #[error("order rejected: {0}")] struct OrderError(String);
//!
//! #[async_trait]
//! impl ActorEntity for Order {
//!     type Id = u32; type Create = OrderCreate; type Update = OrderUpdate;
//!     type Action = OrderAction; type ActionResult = ();
//!     type Context = ResourceClient<Material>;
//!     type Error = OrderError;
//!     fn from_create_params(id: u32, p: OrderCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, material: p.material, quantity: p.quantity })
//!     }
//!     async fn on_create(&mut self, materials: &ResourceClient<Material>) -> Result<(), Self::Error> {
//!         materials
//!             .perform_action(self.material, MaterialAction::Reserve(self.quantity))
//!             .await
//!             .map(|_| ())
//!             .map_err(|e| OrderError(e.to_string()))
//!     }
//!     async fn on_update(&mut self, _: OrderUpdate, _: &ResourceClient<Material>) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: OrderAction, _: &ResourceClient<Material>) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (material_actor, materials) = ResourceActor::<Material>::new(10);
//!     let (order_actor, orders) = ResourceActor::<Order>::new(10);
//!
//!     tokio::spawn(material_actor.run(()));
//!     tokio::spawn(order_actor.run(materials.clone()));
//!
//!     let cement = materials.create(MaterialCreate { stock: 10 }).await.unwrap();
//!     assert!(orders.create(OrderCreate { material: cement, quantity: 4 }).await.is_ok());
//!     assert!(orders.create(OrderCreate { material: cement, quantity: 7 }).await.is_err());
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - One task per actor, one message at a time inside it.
//! - Different actors run in parallel.
//! - Hooks that call other actors are awaited inside the loop, so a dependency graph
//!   between actors must stay acyclic.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real `ResourceClient` from scripted expectations, so an
//! actor can be tested against fake dependencies.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, ResourceRequest, Response};
