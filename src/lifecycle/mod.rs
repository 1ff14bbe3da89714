//! # System Lifecycle & Orchestration
//!
//! [`MarketSystem`] creates the actors first and wires them afterwards: dependencies
//! reach an actor through `run(context)`, never through its constructor. Shutdown
//! drops the clients, which closes each actor's channel; every actor drains what is
//! queued, logs its final size and exits.
//!
//! [`setup_tracing`] lives here too since the binary calls both at start-up.

pub mod market_system;
pub mod tracing;

pub use market_system::*;
pub use tracing::*;
