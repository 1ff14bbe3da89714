use crate::model::{Party, PartyCreate, PartyId, PartyUpdate, Role};
use crate::party_actor::PartyError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Party actor.
#[derive(Clone)]
pub struct PartyClient {
    inner: ResourceClient<Party>,
}

impl PartyClient {
    pub fn new(inner: ResourceClient<Party>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_party(&self, params: PartyCreate) -> Result<PartyId, PartyError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_party(&self, id: PartyId, update: PartyUpdate) -> Result<Party, PartyError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Every party holding `role`.
    pub async fn list_by_role(&self, role: Role) -> Result<Vec<Party>, PartyError> {
        self.list(move |p: &Party| p.is(role)).await
    }
}

#[async_trait]
impl ActorClient<Party> for PartyClient {
    type Error = PartyError;

    fn inner(&self) -> &ResourceClient<Party> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => PartyError::NotFound(id),
            other => other
                .into_entity_error::<PartyError>()
                .unwrap_or_else(|e| PartyError::ActorCommunicationError(e.to_string())),
        }
    }
}
