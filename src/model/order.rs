//! Purchase orders placed by a vendor with a supplier.
//!
//! # Actor Framework
//! `Order` implements [`ActorEntity`](actor_framework::ActorEntity) in
//! [`order_actor::entity`](crate::order_actor::entity). Status changes only through
//! [`OrderAction`](crate::order_actor::OrderAction)s; the total is fixed at creation.

use crate::model::{AddressId, MaterialId, OrderId, OrderStatus, PartyId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// One entry of the append-only audit trail.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderNote {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub author_id: PartyId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub vendor_id: PartyId,
    pub supplier_id: PartyId,
    pub material_id: MaterialId,
    pub vendor_address_id: Option<AddressId>,
    pub supplier_address_id: Option<AddressId>,
    pub quantity: u32,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub notes: Vec<OrderNote>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// A fresh `pending` order with no notes and a zero total; the actor fills both in
    /// once the material has been looked up.
    pub fn new(id: OrderId, params: OrderCreate, now: DateTime<Utc>) -> Self {
        Self {
            id,
            vendor_id: params.vendor_id,
            supplier_id: params.supplier_id,
            material_id: params.material_id,
            vendor_address_id: params.vendor_address_id,
            supplier_address_id: params.supplier_address_id,
            quantity: params.quantity,
            total_amount: Decimal::ZERO,
            status: OrderStatus::Pending,
            notes: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// True for the order's vendor or supplier.
    pub fn involves(&self, party: PartyId) -> bool {
        self.vendor_id == party || self.supplier_id == party
    }
}

/// Newest first; orders placed at the same instant keep ascending id order.
pub fn sort_newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
}

/// Payload for placing an order. The vendor comes from the authenticated caller.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub vendor_id: PartyId,
    pub supplier_id: PartyId,
    pub material_id: MaterialId,
    pub quantity: u32,
    pub vendor_address_id: Option<AddressId>,
    pub supplier_address_id: Option<AddressId>,
}
