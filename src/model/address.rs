//! Delivery and pickup addresses, owned by a party.

use crate::geo::RawCoordinate;
use crate::model::{AddressId, PartyId};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: AddressId,
    pub owner_id: PartyId,
    pub label: String,
    pub line1: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl Address {
    pub fn raw_coordinate(&self) -> RawCoordinate {
        RawCoordinate::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone)]
pub struct AddressCreate {
    pub owner_id: PartyId,
    pub label: String,
    pub line1: String,
    pub city: String,
    pub pincode: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct AddressUpdate {
    pub label: Option<String>,
    pub line1: Option<String>,
    pub city: Option<String>,
    pub pincode: Option<String>,
}
