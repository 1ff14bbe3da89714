//! [`ActorEntity`] implementation for [`Material`], including stock reservation.

use super::actions::{MaterialAction, MaterialActionResult};
use super::error::MaterialError;
use crate::model::{Material, MaterialCreate, MaterialId, MaterialUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

fn required(field: &str, value: String) -> Result<String, MaterialError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(MaterialError::ValidationError(format!(
            "{field} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

fn price(value: Decimal) -> Result<Decimal, MaterialError> {
    if value.is_sign_negative() {
        return Err(MaterialError::ValidationError(
            "pricePerUnit must not be negative".to_string(),
        ));
    }
    if value > Material::MAX_PRICE_PER_UNIT {
        return Err(MaterialError::ValidationError(format!(
            "pricePerUnit must not exceed {}",
            Material::MAX_PRICE_PER_UNIT
        )));
    }
    Ok(value)
}

#[async_trait]
impl ActorEntity for Material {
    type Id = MaterialId;
    type Create = MaterialCreate;
    type Update = MaterialUpdate;
    type Action = MaterialAction;
    type ActionResult = MaterialActionResult;
    type Context = ();
    type Error = MaterialError;

    fn from_create_params(id: MaterialId, params: MaterialCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            supplier_id: params.supplier_id,
            name: required("name", params.name)?,
            category: params.category,
            unit: required("unit", params.unit)?,
            price_per_unit: price(params.price_per_unit)?,
            available_quantity: params.available_quantity,
            created_at: Utc::now(),
        })
    }

    async fn on_update(
        &mut self,
        update: MaterialUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = required("name", name)?;
        }
        if let Some(p) = update.price_per_unit {
            self.price_per_unit = price(p)?;
        }
        if let Some(quantity) = update.available_quantity {
            self.available_quantity = quantity;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: MaterialAction,
        _ctx: &Self::Context,
    ) -> Result<MaterialActionResult, Self::Error> {
        match action {
            MaterialAction::CheckStock => {
                Ok(MaterialActionResult::CheckStock(self.available_quantity))
            }
            MaterialAction::ReserveStock(0) | MaterialAction::ReleaseStock(0) => {
                Err(MaterialError::InvalidQuantity(0))
            }
            MaterialAction::ReserveStock(quantity) => {
                if quantity > self.available_quantity {
                    return Err(MaterialError::InsufficientStock {
                        requested: quantity,
                        available: self.available_quantity,
                    });
                }
                self.available_quantity -= quantity;
                Ok(MaterialActionResult::ReserveStock(self.available_quantity))
            }
            MaterialAction::ReleaseStock(quantity) => {
                self.available_quantity = self.available_quantity.saturating_add(quantity);
                Ok(MaterialActionResult::ReleaseStock(self.available_quantity))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PartyId;
    use rust_decimal_macros::dec;

    fn create(price_per_unit: Decimal) -> MaterialCreate {
        MaterialCreate {
            supplier_id: PartyId(1),
            name: "River sand".to_string(),
            category: None,
            unit: "ton".to_string(),
            price_per_unit,
            available_quantity: 10,
        }
    }

    #[test]
    fn price_must_be_within_bounds() {
        assert!(Material::from_create_params(MaterialId(1), create(dec!(1200.00))).is_ok());
        assert!(
            Material::from_create_params(MaterialId(1), create(Material::MAX_PRICE_PER_UNIT))
                .is_ok()
        );
        assert!(matches!(
            Material::from_create_params(MaterialId(1), create(dec!(-1))),
            Err(MaterialError::ValidationError(_))
        ));
        assert!(matches!(
            Material::from_create_params(MaterialId(1), create(Decimal::MAX)),
            Err(MaterialError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn update_rejects_out_of_range_price() {
        let mut material = Material::from_create_params(MaterialId(1), create(dec!(50))).unwrap();
        let result = material
            .on_update(
                MaterialUpdate {
                    price_per_unit: Some(Material::MAX_PRICE_PER_UNIT + dec!(0.01)),
                    ..Default::default()
                },
                &(),
            )
            .await;
        assert!(matches!(result, Err(MaterialError::ValidationError(_))));
    }
}
