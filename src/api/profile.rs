//! The caller's own profile and address book.

use super::auth::AuthParty;
use super::error::ApiError;
use super::{json_body, AppState};
use crate::model::{Address, Party, PartyUpdate};
use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use tracing::{info, instrument};

pub async fn me(auth: AuthParty) -> Json<Party> {
    Json(auth.0)
}

/// `PATCH /profile`. Setting a location needs both coordinates.
#[instrument(skip_all, fields(party = %auth.0.id))]
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthParty,
    body: Bytes,
) -> Result<Json<Party>, ApiError> {
    let update: PartyUpdate = json_body(&body)?;
    let party = state.parties.update_party(auth.0.id, update).await?;
    info!("Profile updated");
    Ok(Json(party))
}

/// `GET /address`: delivery and pickup addresses owned by the caller, by id.
pub async fn my_addresses(
    State(state): State<AppState>,
    auth: AuthParty,
) -> Result<Json<Vec<Address>>, ApiError> {
    let mut addresses = state.addresses.list_for_owner(auth.0.id).await?;
    addresses.sort_by_key(|a| a.id);
    Ok(Json(addresses))
}
