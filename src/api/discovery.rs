//! `/discovery/...` handlers.
//!
//! The observer is the query's `lat`/`lon` when given, else the caller's profile
//! coordinate, else nobody (every located candidate then reads `unknown`).

use super::auth::AuthParty;
use super::error::ApiError;
use super::views::{self, OrderLead};
use super::AppState;
use crate::discovery::{annotate_and_filter, DiscoveryOptions, DiscoveryView, SortOrder, StatusFilter};
use crate::geo::Coordinate;
use crate::model::{Party, Role};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub radius_km: Option<f64>,
    pub sort: Option<SortOrder>,
    pub status: Option<String>,
}

impl DiscoveryQuery {
    fn observer(&self, state: &AppState, caller: &Party) -> Result<Option<Coordinate>, ApiError> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Coordinate::new(lat, lon)
                .map(Some)
                .map_err(|e| ApiError::BadRequest(format!("Invalid observer: {e}"))),
            (None, None) => Ok(caller.raw_coordinate().classify(state.discovery.sentinel)),
            _ => Err(ApiError::BadRequest(
                "lat and lon must be given together".to_string(),
            )),
        }
    }

    fn options(&self, state: &AppState) -> Result<DiscoveryOptions, ApiError> {
        let status: StatusFilter = match &self.status {
            Some(raw) => raw
                .parse()
                .map_err(|_| ApiError::BadRequest(format!("Unknown status: {raw}")))?,
            None => StatusFilter::All,
        };
        let radius_km = self.radius_km.or(state.discovery.default_radius_km);
        if radius_km.is_some_and(|r| !r.is_finite() || r <= 0.0) {
            return Err(ApiError::BadRequest(
                "radiusKm must be a positive number".to_string(),
            ));
        }
        Ok(DiscoveryOptions {
            status,
            sort: self.sort.unwrap_or_default(),
            radius_km,
            sentinel: state.discovery.sentinel,
        })
    }
}

/// Suppliers around the observer.
pub async fn suppliers(
    State(state): State<AppState>,
    auth: AuthParty,
    query: Result<Query<DiscoveryQuery>, QueryRejection>,
) -> Result<Json<DiscoveryView<Party>>, ApiError> {
    let Query(query) = query?;
    let observer = query.observer(&state, &auth.0)?;
    let options = query.options(&state)?;

    let mut candidates = state.parties.list_by_role(Role::Supplier).await?;
    candidates.sort_by_key(|p| p.id);
    Ok(Json(annotate_and_filter(observer, candidates, &options)))
}

/// The caller's orders, placed at the counterpart's location.
pub async fn orders(
    State(state): State<AppState>,
    auth: AuthParty,
    query: Result<Query<DiscoveryQuery>, QueryRejection>,
) -> Result<Json<DiscoveryView<OrderLead>>, ApiError> {
    let Query(query) = query?;
    let observer = query.observer(&state, &auth.0)?;
    let options = query.options(&state)?;

    let role = auth.0.role;
    let orders = state.orders.orders_for(auth.0.id, role).await?;
    let leads = views::leads(&state, orders, role).await?;
    Ok(Json(annotate_and_filter(observer, leads, &options)))
}
