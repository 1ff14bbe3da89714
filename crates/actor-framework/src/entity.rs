//! # ActorEntity Trait
//!
//! The contract every marketplace resource (party, material, address, order) implements
//! to be owned by a [`ResourceActor`](crate::ResourceActor). Associated types pin the
//! payload of every operation, so a `MaterialCreate` can never be sent to the order actor.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`] runs after construction, before the entity is stored.
//! - [`ActorEntity::on_delete`] runs before removal.
//!
//! Both default to `Ok(())`.
//!
//! # Staged mutation
//! [`ActorEntity::on_update`] and [`ActorEntity::handle_action`] are invoked on a *copy*
//! of the stored entity. The actor swaps the copy in only when the hook returns `Ok`,
//! so a hook may mutate several fields and then fail without leaving a half-applied
//! change behind.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// Hooks are async so they can call other actors. The `Context` associated type is
/// handed to every hook; it is supplied to `run()` rather than `new()`, which lets
/// actors that depend on each other be created first and wired afterwards.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations (e.g. `ReserveStock`, `Transition`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// One error enum per actor. It travels boxed through [`FrameworkError::EntityError`]
    /// and is recovered by the typed client with
    /// [`FrameworkError::into_entity_error`](crate::FrameworkError::into_entity_error).
    ///
    /// [`FrameworkError::EntityError`]: crate::FrameworkError::EntityError
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full entity from the generated ID and the payload.
    /// Called synchronously before `on_create`; put pure input validation here.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after construction and before the entity is stored.
    /// Use this hook for validation that needs other actors.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the system.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
