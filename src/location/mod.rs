//! # Location resolution
//!
//! Finds the observer coordinate used by discovery. Storage and the platform's
//! geolocation capability are ports ([`LocationStore`], [`GeolocationProvider`]) so
//! the service carries no globals and runs the same in tests.
//!
//! Precedence is fixed in [`LocationService::resolve`]: cached storage, then the
//! profile coordinate, then a fresh device read. A failed read yields no observer;
//! it is never an error for discovery.

pub mod provider;
pub mod service;
pub mod store;

pub use provider::*;
pub use service::*;
pub use store::*;
