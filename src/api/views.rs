//! Response shapes that join an order with the records it references.

use super::error::ApiError;
use super::AppState;
use crate::discovery::Discoverable;
use crate::geo::RawCoordinate;
use crate::model::{
    Address, AddressId, AvailableActions, Material, MaterialId, Order, OrderId, OrderStatus,
    Party, PartyId, Role,
};
use actor_framework::ActorClient;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartySummary {
    pub id: PartyId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl From<&Party> for PartySummary {
    fn from(p: &Party) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            business_name: p.business_name.clone(),
            phone: p.phone.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialSummary {
    pub id: MaterialId,
    pub name: String,
    pub unit: String,
    pub price_per_unit: Decimal,
}

impl From<&Material> for MaterialSummary {
    fn from(m: &Material) -> Self {
        Self {
            id: m.id,
            name: m.name.clone(),
            unit: m.unit.clone(),
            price_per_unit: m.price_per_unit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressSummary {
    pub id: AddressId,
    pub label: String,
    pub line1: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
}

impl From<&Address> for AddressSummary {
    fn from(a: &Address) -> Self {
        Self {
            id: a.id,
            label: a.label.clone(),
            line1: a.line1.clone(),
            city: a.city.clone(),
            pincode: a.pincode.clone(),
        }
    }
}

/// An order with its parties, material and addresses filled in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    pub vendor: Option<PartySummary>,
    pub supplier: Option<PartySummary>,
    pub material: Option<MaterialSummary>,
    pub vendor_address: Option<AddressSummary>,
    pub supplier_address: Option<AddressSummary>,
    pub available_actions: Vec<&'static str>,
}

/// Answer to "what state is my order in".
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusProbe {
    pub order_id: OrderId,
    pub current_status: OrderStatus,
    pub vendor: Option<PartySummary>,
    pub supplier_id: PartyId,
    pub created_at: DateTime<Utc>,
}

/// Records referenced by a batch of orders, fetched with one list call per actor.
struct Lookup {
    parties: HashMap<PartyId, Party>,
    materials: HashMap<MaterialId, Material>,
    addresses: HashMap<AddressId, Address>,
}

impl Lookup {
    async fn for_orders(state: &AppState, orders: &[Order]) -> Result<Self, ApiError> {
        let party_ids: HashSet<PartyId> = orders
            .iter()
            .flat_map(|o| [o.vendor_id, o.supplier_id])
            .collect();
        let material_ids: HashSet<MaterialId> = orders.iter().map(|o| o.material_id).collect();
        let address_ids: HashSet<AddressId> = orders
            .iter()
            .flat_map(|o| [o.vendor_address_id, o.supplier_address_id])
            .flatten()
            .collect();

        let parties = state
            .parties
            .list(move |p: &Party| party_ids.contains(&p.id))
            .await?;
        let materials = state
            .materials
            .list(move |m: &Material| material_ids.contains(&m.id))
            .await?;
        let addresses = state
            .addresses
            .list(move |a: &Address| address_ids.contains(&a.id))
            .await?;

        Ok(Self {
            parties: parties.into_iter().map(|p| (p.id, p)).collect(),
            materials: materials.into_iter().map(|m| (m.id, m)).collect(),
            addresses: addresses.into_iter().map(|a| (a.id, a)).collect(),
        })
    }

    fn party(&self, id: PartyId) -> Option<&Party> {
        self.parties.get(&id)
    }

    fn address(&self, id: Option<AddressId>) -> Option<&Address> {
        id.and_then(|id| self.addresses.get(&id))
    }

    fn view(&self, order: Order) -> OrderView {
        OrderView {
            vendor: self.party(order.vendor_id).map(PartySummary::from),
            supplier: self.party(order.supplier_id).map(PartySummary::from),
            material: self.materials.get(&order.material_id).map(MaterialSummary::from),
            vendor_address: self.address(order.vendor_address_id).map(AddressSummary::from),
            supplier_address: self
                .address(order.supplier_address_id)
                .map(AddressSummary::from),
            available_actions: AvailableActions::for_status(order.status).labels(),
            order,
        }
    }

    /// The other side's address coordinate when it has one, else their profile's.
    fn counterpart_location(&self, order: &Order, viewer: Role) -> RawCoordinate {
        let (party, address) = match viewer {
            Role::Vendor => (order.supplier_id, order.supplier_address_id),
            Role::Supplier => (order.vendor_id, order.vendor_address_id),
        };
        self.address(address)
            .map(Address::raw_coordinate)
            .filter(|raw| !raw.is_absent())
            .or_else(|| self.party(party).map(Party::raw_coordinate))
            .unwrap_or_default()
    }
}

/// Joins `orders` with their references, keeping order.
pub async fn populate(state: &AppState, orders: Vec<Order>) -> Result<Vec<OrderView>, ApiError> {
    let lookup = Lookup::for_orders(state, &orders).await?;
    Ok(orders.into_iter().map(|o| lookup.view(o)).collect())
}

/// An order placed on the map at the counterpart's location.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLead {
    #[serde(flatten)]
    pub view: OrderView,
    #[serde(skip)]
    pub location: RawCoordinate,
}

impl Discoverable for OrderLead {
    type Key = OrderId;

    fn key(&self) -> OrderId {
        self.view.order.id
    }

    fn raw_coordinate(&self) -> RawCoordinate {
        self.location
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.view.order.created_at
    }

    fn status(&self) -> Option<OrderStatus> {
        Some(self.view.order.status)
    }
}

/// Builds discovery candidates from `viewer`'s perspective.
pub async fn leads(
    state: &AppState,
    orders: Vec<Order>,
    viewer: Role,
) -> Result<Vec<OrderLead>, ApiError> {
    let lookup = Lookup::for_orders(state, &orders).await?;
    Ok(orders
        .into_iter()
        .map(|order| OrderLead {
            location: lookup.counterpart_location(&order, viewer),
            view: lookup.view(order),
        })
        .collect())
}
