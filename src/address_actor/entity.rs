//! [`ActorEntity`] implementation for [`Address`].

use super::error::AddressError;
use crate::geo::Coordinate;
use crate::model::{Address, AddressCreate, AddressId, AddressUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;

fn required(field: &str, value: String) -> Result<String, AddressError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AddressError::ValidationError(format!(
            "{field} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

#[async_trait]
impl ActorEntity for Address {
    type Id = AddressId;
    type Create = AddressCreate;
    type Update = AddressUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = AddressError;

    fn from_create_params(id: AddressId, params: AddressCreate) -> Result<Self, Self::Error> {
        match (params.latitude, params.longitude) {
            (None, None) => {}
            (Some(lat), Some(lon)) => {
                Coordinate::new(lat, lon)
                    .map_err(|e| AddressError::ValidationError(e.to_string()))?;
            }
            _ => {
                return Err(AddressError::ValidationError(
                    "latitude and longitude must be provided together".to_string(),
                ))
            }
        }
        Ok(Self {
            id,
            owner_id: params.owner_id,
            label: required("label", params.label)?,
            line1: required("line1", params.line1)?,
            city: required("city", params.city)?,
            pincode: params.pincode,
            latitude: params.latitude,
            longitude: params.longitude,
            created_at: Utc::now(),
        })
    }

    async fn on_update(
        &mut self,
        update: AddressUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(label) = update.label {
            self.label = required("label", label)?;
        }
        if let Some(line1) = update.line1 {
            self.line1 = required("line1", line1)?;
        }
        if let Some(city) = update.city {
            self.city = required("city", city)?;
        }
        if let Some(pincode) = update.pincode {
            self.pincode = Some(pincode);
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
