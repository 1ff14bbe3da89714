//! `/material` handlers.

use super::auth::AuthParty;
use super::error::ApiError;
use super::{json_body, AppState};
use crate::model::{Material, MaterialCreate, MaterialId, MaterialUpdate, PartyId, Role};
use actor_framework::ActorClient;
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaterialBody {
    pub name: String,
    pub category: Option<String>,
    pub unit: String,
    pub price_per_unit: Decimal,
    pub available_quantity: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialQuery {
    pub supplier_id: Option<PartyId>,
}

pub async fn create_material(
    State(state): State<AppState>,
    auth: AuthParty,
    body: Bytes,
) -> Result<(StatusCode, Json<Material>), ApiError> {
    let supplier = auth.require(Role::Supplier)?;
    let body: CreateMaterialBody = json_body(&body)?;
    let id = state
        .materials
        .create_material(MaterialCreate {
            supplier_id: supplier.id,
            name: body.name,
            category: body.category,
            unit: body.unit,
            price_per_unit: body.price_per_unit,
            available_quantity: body.available_quantity,
        })
        .await?;
    let material = state
        .materials
        .get(id)
        .await?
        .ok_or_else(|| ApiError::Internal(format!("{id} vanished after create")))?;
    Ok((StatusCode::CREATED, Json(material)))
}

/// `PATCH /material/:id`. Suppliers edit only their own catalog; anything else is a 404.
pub async fn update_material(
    State(state): State<AppState>,
    auth: AuthParty,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Material>, ApiError> {
    let supplier = auth.require(Role::Supplier)?;
    let not_found = || ApiError::NotFound(format!("Material {id} not found"));
    let material_id: MaterialId = id.parse().map_err(|_| not_found())?;
    let update: MaterialUpdate = json_body(&body)?;

    state
        .materials
        .get(material_id)
        .await?
        .filter(|m| m.supplier_id == supplier.id)
        .ok_or_else(not_found)?;
    Ok(Json(
        state.materials.update_material(material_id, update).await?,
    ))
}

/// `GET /material[?supplierId=]`, ordered by id.
pub async fn list_materials(
    State(state): State<AppState>,
    _auth: AuthParty,
    query: Result<Query<MaterialQuery>, QueryRejection>,
) -> Result<Json<Vec<Material>>, ApiError> {
    let Query(query) = query?;
    let mut materials = match query.supplier_id {
        Some(supplier) => state.materials.list_for_supplier(supplier).await?,
        None => state.materials.list(|_: &Material| true).await?,
    };
    materials.sort_by_key(|m| m.id);
    Ok(Json(materials))
}
