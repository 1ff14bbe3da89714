//! Marketplace accounts: vendors buy, suppliers sell.
//!
//! # Actor Framework
//! `Party` implements [`ActorEntity`](actor_framework::ActorEntity) in
//! [`party_actor::entity`](crate::party_actor::entity).

use crate::geo::RawCoordinate;
use crate::model::PartyId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Vendor,
    Supplier,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Vendor => f.write_str("vendor"),
            Role::Supplier => f.write_str("supplier"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub id: PartyId,
    pub role: Role,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl Party {
    pub fn is(&self, role: Role) -> bool {
        self.role == role
    }

    /// Profile coordinate exactly as stored; may be partial or the `(0,0)` placeholder.
    pub fn raw_coordinate(&self) -> RawCoordinate {
        RawCoordinate::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone)]
pub struct PartyCreate {
    pub role: Role,
    pub name: String,
    pub business_name: Option<String>,
    pub phone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl PartyCreate {
    pub fn new(role: Role, name: impl Into<String>) -> Self {
        Self {
            role,
            name: name.into(),
            business_name: None,
            phone: None,
            latitude: None,
            longitude: None,
        }
    }

    pub fn located_at(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn business(mut self, business_name: impl Into<String>) -> Self {
        self.business_name = Some(business_name.into());
        self
    }
}

/// Profile changes. `latitude` and `longitude` must be given together.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyUpdate {
    pub name: Option<String>,
    pub business_name: Option<String>,
    pub phone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
