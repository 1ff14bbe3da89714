use crate::material_actor::{MaterialAction, MaterialActionResult, MaterialError};
use crate::model::{Material, MaterialCreate, MaterialId, MaterialUpdate, PartyId};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Material actor.
///
/// The stock helpers return the level left after the action.
#[derive(Clone)]
pub struct MaterialClient {
    inner: ResourceClient<Material>,
}

impl MaterialClient {
    pub fn new(inner: ResourceClient<Material>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_material(&self, params: MaterialCreate) -> Result<MaterialId, MaterialError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_material(
        &self,
        id: MaterialId,
        update: MaterialUpdate,
    ) -> Result<Material, MaterialError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Catalog of one supplier.
    pub async fn list_for_supplier(&self, supplier: PartyId) -> Result<Vec<Material>, MaterialError> {
        self.list(move |m: &Material| m.supplier_id == supplier).await
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: MaterialId) -> Result<u32, MaterialError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, MaterialAction::CheckStock)
            .await
            .map_err(Self::map_error)?
        {
            MaterialActionResult::CheckStock(level) => Ok(level),
            _ => unreachable!("CheckStock action must return CheckStock result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn reserve_stock(&self, id: MaterialId, quantity: u32) -> Result<u32, MaterialError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, MaterialAction::ReserveStock(quantity))
            .await
            .map_err(Self::map_error)?
        {
            MaterialActionResult::ReserveStock(level) => Ok(level),
            _ => unreachable!("ReserveStock action must return ReserveStock result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn release_stock(&self, id: MaterialId, quantity: u32) -> Result<u32, MaterialError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, MaterialAction::ReleaseStock(quantity))
            .await
            .map_err(Self::map_error)?
        {
            MaterialActionResult::ReleaseStock(level) => Ok(level),
            _ => unreachable!("ReleaseStock action must return ReleaseStock result"),
        }
    }
}

#[async_trait]
impl ActorClient<Material> for MaterialClient {
    type Error = MaterialError;

    fn inner(&self) -> &ResourceClient<Material> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => MaterialError::NotFound(id),
            other => other
                .into_entity_error::<MaterialError>()
                .unwrap_or_else(|e| MaterialError::ActorCommunicationError(e.to_string())),
        }
    }
}
