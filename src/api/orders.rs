//! `/order/...` handlers.

use super::auth::AuthParty;
use super::error::ApiError;
use super::views::{self, OrderView, PartySummary, StatusProbe};
use super::{json_body, optional_json_body, AppState};
use crate::model::{
    AddressId, MaterialId, Order, OrderCreate, OrderId, OrderStatus, OrderStep, PartyId, Role,
};
use crate::order_actor::{compute_order_stats, OrderStats};
use actor_framework::ActorClient;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use tracing::{info, instrument};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderBody {
    pub material_id: MaterialId,
    pub quantity: u32,
    pub supplier_id: PartyId,
    pub vendor_address_id: Option<AddressId>,
    pub supplier_address_id: Option<AddressId>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StepBody {
    pub note: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: String,
    pub note: Option<String>,
}

fn order_id(raw: &str) -> Result<OrderId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(format!("Order {raw} not found")))
}

#[instrument(skip_all, fields(party = %auth.0.id))]
pub async fn place_order(
    State(state): State<AppState>,
    auth: AuthParty,
    body: Bytes,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let vendor = auth.require(Role::Vendor)?;
    let body: PlaceOrderBody = json_body(&body)?;
    let order = state
        .orders
        .place_order(OrderCreate {
            vendor_id: vendor.id,
            supplier_id: body.supplier_id,
            material_id: body.material_id,
            quantity: body.quantity,
            vendor_address_id: body.vendor_address_id,
            supplier_address_id: body.supplier_address_id,
        })
        .await?;
    info!(order_id = %order.id, total = %order.total_amount, "Order placed");
    Ok((StatusCode::CREATED, Json(order)))
}

/// `POST /order/supplier/:id/:action`
#[instrument(skip_all, fields(party = %auth.0.id))]
pub async fn apply_step(
    State(state): State<AppState>,
    auth: AuthParty,
    Path((id, action)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<Order>, ApiError> {
    let id = order_id(&id)?;
    let step = OrderStep::from_path(&action)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown order action: {action}")))?;
    let body: StepBody = optional_json_body(&body)?;

    let order = match step {
        OrderStep::Reject => state.orders.reject(id, auth.0.id, body.reason).await?,
        step => {
            state
                .orders
                .apply_step(id, step, auth.0.id, body.note)
                .await?
        }
    };
    Ok(Json(order))
}

/// `PATCH /order/supplier/:id/status`. A `rejected` target takes the note as the reason.
#[instrument(skip_all, fields(party = %auth.0.id))]
pub async fn set_status(
    State(state): State<AppState>,
    auth: AuthParty,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Order>, ApiError> {
    let id = order_id(&id)?;
    let body: StatusBody = json_body(&body)?;
    let target: OrderStatus = body
        .status
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Unknown status: {}", body.status)))?;

    let order = state
        .orders
        .transition(id, target, auth.0.id, body.note)
        .await?;
    Ok(Json(order))
}

async fn orders_of(state: &AppState, auth: &AuthParty, role: Role) -> Result<Vec<Order>, ApiError> {
    let party = auth.require(role)?;
    Ok(state.orders.orders_for(party.id, role).await?)
}

pub async fn vendor_orders(
    State(state): State<AppState>,
    auth: AuthParty,
) -> Result<Json<Vec<OrderView>>, ApiError> {
    let orders = orders_of(&state, &auth, Role::Vendor).await?;
    Ok(Json(views::populate(&state, orders).await?))
}

pub async fn supplier_orders(
    State(state): State<AppState>,
    auth: AuthParty,
) -> Result<Json<Vec<OrderView>>, ApiError> {
    let orders = orders_of(&state, &auth, Role::Supplier).await?;
    Ok(Json(views::populate(&state, orders).await?))
}

pub async fn vendor_stats(
    State(state): State<AppState>,
    auth: AuthParty,
) -> Result<Json<OrderStats>, ApiError> {
    let orders = orders_of(&state, &auth, Role::Vendor).await?;
    Ok(Json(compute_order_stats(&orders, Utc::now())))
}

pub async fn supplier_stats(
    State(state): State<AppState>,
    auth: AuthParty,
) -> Result<Json<OrderStats>, ApiError> {
    let orders = orders_of(&state, &auth, Role::Supplier).await?;
    Ok(Json(compute_order_stats(&orders, Utc::now())))
}

/// `GET /order/:id/status`. Anyone but the order's two parties gets a 404.
pub async fn status_probe(
    State(state): State<AppState>,
    auth: AuthParty,
    Path(id): Path<String>,
) -> Result<Json<StatusProbe>, ApiError> {
    let id = order_id(&id)?;
    let order = state
        .orders
        .get(id)
        .await?
        .filter(|o| o.involves(auth.0.id))
        .ok_or_else(|| ApiError::NotFound(format!("Order {id} not found")))?;

    let vendor = state.parties.get(order.vendor_id).await?;
    Ok(Json(StatusProbe {
        order_id: order.id,
        current_status: order.status,
        vendor: vendor.as_ref().map(PartySummary::from),
        supplier_id: order.supplier_id,
        created_at: order.created_at,
    }))
}
