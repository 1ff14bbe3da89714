//! # Material Market
//!
//! The core of a raw-material marketplace: vendors order from suppliers, suppliers
//! walk each order through a fixed status workflow, and both sides discover each
//! other by distance.
//!
//! ## Architecture
//!
//! Every resource lives in its own actor built on [`actor_framework`]: one Tokio task
//! owns the records and handles one message at a time. That single writer is what
//! makes an order transition atomic. The status is re-read, checked against the
//! table and committed without anything else touching the order in between.
//!
//! - [`model`]: records, typed ids, the status table.
//! - [`geo`]: coordinates and great-circle distance.
//! - [`party_actor`], [`material_actor`], [`address_actor`], [`order_actor`]: the
//!   resource actors. The order actor calls the other three and never the reverse.
//! - [`clients`]: typed wrappers that hide the message passing.
//! - [`discovery`]: distance annotation, bucketing and ordering of candidates.
//! - [`location`]: where the observer is (cache, profile, device), behind ports.
//! - [`lifecycle`]: starting and stopping the actor system, tracing set-up.
//! - [`config`]: layered configuration.
//! - [`api`]: the HTTP surface and its error envelope.
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run
//! curl -H 'Authorization: Bearer demo-party_4' localhost:8080/discovery/suppliers
//! ```

pub mod address_actor;
pub mod api;
pub mod clients;
pub mod config;
pub mod discovery;
pub mod geo;
pub mod lifecycle;
pub mod location;
pub mod material_actor;
pub mod model;
pub mod order_actor;
pub mod party_actor;
pub mod seed;
