//! # ActorClient Trait
//!
//! Shared read/delete surface for the resource-specific clients. Each implementor only
//! supplies `inner()` and `map_error()`; `get`, `list` and `delete` come for free.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard read operations.
///
/// # Example
///
/// ```rust
/// use actor_framework::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)]
/// struct Party { id: u32, is_supplier: bool }
/// #[derive(Debug)] struct PartyCreate { is_supplier: bool }
/// #[derive(Debug)] struct PartyUpdate;
/// #[derive(Debug)] enum PartyAction {}
///
/// #[derive(Debug, thiserror::Error)]
/// enum PartyError {
///     #[error("{0}")]
///     Communication(String),
/// }
///
/// impl From<String> for PartyError {
///     fn from(s: String) -> Self { PartyError::Communication(s) }
/// }
///
/// #[async_trait]
/// impl ActorEntity for Party {
///     type Id = u32;
///     type Create = PartyCreate;
///     type Update = PartyUpdate;
///     type Action = PartyAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = PartyError;
///
///     fn from_create_params(id: u32, p: PartyCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, is_supplier: p.is_supplier })
///     }
///     async fn on_update(&mut self, _: PartyUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: PartyAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// struct PartyClient {
///     inner: ResourceClient<Party>,
/// }
///
/// #[async_trait]
/// impl ActorClient<Party> for PartyClient {
///     type Error = PartyError;
///
///     fn inner(&self) -> &ResourceClient<Party> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         PartyError::Communication(e.to_string())
///     }
/// }
///
/// async fn suppliers(client: &PartyClient) -> Result<Vec<Party>, PartyError> {
///     client.list(|p: &Party| p.is_supplier).await
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every entity accepted by `predicate`.
    #[tracing::instrument(skip(self, predicate))]
    async fn list<F>(&self, predicate: F) -> Result<Vec<T>, Self::Error>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        tracing::debug!("Sending request");
        self.inner().list(predicate).await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
