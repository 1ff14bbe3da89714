//! [`ActorEntity`] implementation for [`Party`].

use super::error::PartyError;
use crate::geo::Coordinate;
use crate::model::{Party, PartyCreate, PartyId, PartyUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;

fn required(field: &str, value: String) -> Result<String, PartyError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PartyError::ValidationError(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Profile coordinates are all-or-nothing and must be on the globe when present.
fn profile_location(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<(Option<f64>, Option<f64>), PartyError> {
    match (latitude, longitude) {
        (None, None) => Ok((None, None)),
        (Some(lat), Some(lon)) => {
            Coordinate::new(lat, lon).map_err(|e| PartyError::ValidationError(e.to_string()))?;
            Ok((Some(lat), Some(lon)))
        }
        _ => Err(PartyError::ValidationError(
            "latitude and longitude must be provided together".to_string(),
        )),
    }
}

#[async_trait]
impl ActorEntity for Party {
    type Id = PartyId;
    type Create = PartyCreate;
    type Update = PartyUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = PartyError;

    fn from_create_params(id: PartyId, params: PartyCreate) -> Result<Self, Self::Error> {
        let (latitude, longitude) = profile_location(params.latitude, params.longitude)?;
        Ok(Self {
            id,
            role: params.role,
            name: required("name", params.name)?,
            business_name: params.business_name,
            phone: params.phone,
            latitude,
            longitude,
            created_at: Utc::now(),
        })
    }

    async fn on_update(
        &mut self,
        update: PartyUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = required("name", name)?;
        }
        if let Some(business_name) = update.business_name {
            self.business_name = Some(business_name);
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if update.latitude.is_some() || update.longitude.is_some() {
            let (latitude, longitude) = profile_location(update.latitude, update.longitude)?;
            self.latitude = latitude;
            self.longitude = longitude;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;

    #[test]
    fn blank_name_is_rejected() {
        let result = Party::from_create_params(PartyId(1), PartyCreate::new(Role::Vendor, "  "));
        assert!(matches!(result, Err(PartyError::ValidationError(_))));
    }

    #[test]
    fn half_a_location_is_rejected() {
        let mut params = PartyCreate::new(Role::Supplier, "Shree Cement");
        params.latitude = Some(19.0);
        let result = Party::from_create_params(PartyId(1), params);
        assert!(matches!(result, Err(PartyError::ValidationError(_))));
    }

    #[tokio::test]
    async fn update_moves_both_coordinates() {
        let mut party = Party::from_create_params(
            PartyId(1),
            PartyCreate::new(Role::Supplier, "Shree Cement").located_at(19.0, 72.8),
        )
        .unwrap();

        let half = PartyUpdate {
            longitude: Some(73.0),
            ..Default::default()
        };
        assert!(party.on_update(half, &()).await.is_err());

        let full = PartyUpdate {
            latitude: Some(18.5),
            longitude: Some(73.8),
            ..Default::default()
        };
        party.on_update(full, &()).await.unwrap();
        assert_eq!((party.latitude, party.longitude), (Some(18.5), Some(73.8)));
    }
}
