//! [`ActorEntity`] implementation for [`Order`].
//!
//! Placement checks every reference and reserves stock in `on_create`; status changes
//! go through [`workflow`](super::workflow) and release stock again when an order ends
//! cancelled or rejected.

use super::actions::OrderAction;
use super::error::OrderError;
use super::workflow;
use crate::clients::{AddressClient, MaterialClient, PartyClient};
use crate::model::{AddressId, Order, OrderCreate, OrderId, OrderNote, OrderStatus, PartyId, Role};
use actor_framework::{ActorClient, ActorEntity};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;

/// Clients the order actor calls into, injected at `run()` time.
#[derive(Clone)]
pub struct OrderContext {
    pub parties: PartyClient,
    pub materials: MaterialClient,
    pub addresses: AddressClient,
}

async fn check_address(
    addresses: &AddressClient,
    address_id: AddressId,
    owner: PartyId,
) -> Result<(), OrderError> {
    match addresses.get(address_id).await? {
        Some(address) if address.owner_id == owner => Ok(()),
        _ => Err(OrderError::NotFound(format!(
            "address {address_id} does not belong to {owner}"
        ))),
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = OrderContext;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        if params.quantity == 0 {
            return Err(OrderError::ValidationError(
                "quantity must be at least 1".to_string(),
            ));
        }
        Ok(Order::new(id, params, Utc::now()))
    }

    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), Self::Error> {
        let vendor = ctx
            .parties
            .get(self.vendor_id)
            .await?
            .ok_or_else(|| OrderError::NotFound(format!("vendor {}", self.vendor_id)))?;
        if !vendor.is(Role::Vendor) {
            return Err(OrderError::Forbidden(format!(
                "{} is not a vendor",
                vendor.id
            )));
        }

        ctx.parties
            .get(self.supplier_id)
            .await?
            .filter(|p| p.is(Role::Supplier))
            .ok_or_else(|| OrderError::NotFound(format!("supplier {}", self.supplier_id)))?;

        let material = ctx
            .materials
            .get(self.material_id)
            .await?
            .filter(|m| m.supplier_id == self.supplier_id)
            .ok_or_else(|| {
                OrderError::NotFound(format!(
                    "material {} from supplier {}",
                    self.material_id, self.supplier_id
                ))
            })?;

        if let Some(address_id) = self.vendor_address_id {
            check_address(&ctx.addresses, address_id, self.vendor_id).await?;
        }
        if let Some(address_id) = self.supplier_address_id {
            check_address(&ctx.addresses, address_id, self.supplier_id).await?;
        }

        self.total_amount = material
            .price_per_unit
            .checked_mul(Decimal::from(self.quantity))
            .ok_or_else(|| {
                OrderError::ValidationError(format!(
                    "order total for {} x {} is out of range",
                    self.quantity, material.price_per_unit
                ))
            })?;
        let left = ctx
            .materials
            .reserve_stock(self.material_id, self.quantity)
            .await?;
        debug!(material_id = %self.material_id, left, "Stock reserved");

        self.notes.push(OrderNote {
            message: workflow::default_note(OrderStatus::Pending).to_string(),
            timestamp: self.created_at,
            author_id: self.vendor_id,
        });
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &OrderContext) -> Result<(), Self::Error> {
        Err(OrderError::ValidationError(
            "orders change only through status transitions".to_string(),
        ))
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &OrderContext,
    ) -> Result<Order, Self::Error> {
        match action {
            OrderAction::Transition {
                target,
                actor,
                note,
            } => {
                let now = Utc::now();
                if target == OrderStatus::Rejected {
                    workflow::reject_order(self, actor, note.as_deref(), now)?;
                } else {
                    workflow::apply_transition(self, target, actor, note.as_deref(), now)?;
                }
            }
        }

        if matches!(self.status, OrderStatus::Cancelled | OrderStatus::Rejected) {
            ctx.materials
                .release_stock(self.material_id, self.quantity)
                .await?;
        }
        Ok(self.clone())
    }
}
