//! Catalog items offered by suppliers.

use crate::model::{MaterialId, PartyId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: MaterialId,
    pub supplier_id: PartyId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub unit: String,
    pub price_per_unit: Decimal,
    pub available_quantity: u32,
    pub created_at: DateTime<Utc>,
}

impl Material {
    /// Highest accepted unit price. Keeps `price * quantity` within `Decimal` for any `u32` quantity.
    pub const MAX_PRICE_PER_UNIT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);
}

#[derive(Debug, Clone)]
pub struct MaterialCreate {
    pub supplier_id: PartyId,
    pub name: String,
    pub category: Option<String>,
    pub unit: String,
    pub price_per_unit: Decimal,
    pub available_quantity: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialUpdate {
    pub name: Option<String>,
    pub price_per_unit: Option<Decimal>,
    pub available_quantity: Option<u32>,
}
