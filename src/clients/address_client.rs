use crate::address_actor::AddressError;
use crate::model::{Address, AddressCreate, AddressId, PartyId};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Address actor.
#[derive(Clone)]
pub struct AddressClient {
    inner: ResourceClient<Address>,
}

impl AddressClient {
    pub fn new(inner: ResourceClient<Address>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_address(&self, params: AddressCreate) -> Result<AddressId, AddressError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    pub async fn list_for_owner(&self, owner: PartyId) -> Result<Vec<Address>, AddressError> {
        self.list(move |a: &Address| a.owner_id == owner).await
    }
}

#[async_trait]
impl ActorClient<Address> for AddressClient {
    type Error = AddressError;

    fn inner(&self) -> &ResourceClient<Address> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => AddressError::NotFound(id),
            other => other
                .into_entity_error::<AddressError>()
                .unwrap_or_else(|e| AddressError::ActorCommunicationError(e.to_string())),
        }
    }
}
