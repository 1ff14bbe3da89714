use crate::model::{sort_newest_first, Order, OrderCreate, OrderId, OrderStatus, OrderStep, PartyId, Role};
use crate::order_actor::{OrderAction, OrderError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
///
/// Placement checks and stock reservation happen in the Order actor's `on_create`
/// hook; this client only shapes requests.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(vendor_id = %params.vendor_id))]
    pub async fn place_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!(?params, "place_order called");
        info!("Sending place_order to actor");
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        self.get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    /// Moves the order to `target`. For `Rejected` the note is the required reason.
    #[instrument(skip(self, note))]
    pub async fn transition(
        &self,
        id: OrderId,
        target: OrderStatus,
        actor: PartyId,
        note: Option<String>,
    ) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(
                id,
                OrderAction::Transition {
                    target,
                    actor,
                    note,
                },
            )
            .await
            .map_err(Self::map_error)
    }

    /// Runs one of the named supplier operations.
    pub async fn apply_step(
        &self,
        id: OrderId,
        step: OrderStep,
        actor: PartyId,
        note: Option<String>,
    ) -> Result<Order, OrderError> {
        self.transition(id, step.target(), actor, note).await
    }

    pub async fn reject(
        &self,
        id: OrderId,
        actor: PartyId,
        reason: Option<String>,
    ) -> Result<Order, OrderError> {
        self.transition(id, OrderStatus::Rejected, actor, reason).await
    }

    /// Orders where `party` is on the `role` side, newest first, ties by id ascending.
    #[instrument(skip(self))]
    pub async fn orders_for(&self, party: PartyId, role: Role) -> Result<Vec<Order>, OrderError> {
        let mut orders = self
            .list(move |o: &Order| match role {
                Role::Vendor => o.vendor_id == party,
                Role::Supplier => o.supplier_id == party,
            })
            .await?;
        sort_newest_first(&mut orders);
        Ok(orders)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => other
                .into_entity_error::<OrderError>()
                .unwrap_or_else(|e| OrderError::ActorCommunicationError(e.to_string())),
        }
    }
}
