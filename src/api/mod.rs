//! # HTTP surface
//!
//! An axum router over the actor clients. Every route is bearer-authenticated through
//! [`AuthParty`](auth::AuthParty); every failure leaves as the JSON envelope built by
//! [`ApiError`](error::ApiError).
//!
//! | Route | Handler |
//! |---|---|
//! | `POST /order/vendor`, `GET /order/vendor` | [`orders::place_order`], [`orders::vendor_orders`] |
//! | `GET /order/supplier` | [`orders::supplier_orders`] |
//! | `GET /order/{vendor,supplier}/stats` | [`orders::vendor_stats`], [`orders::supplier_stats`] |
//! | `POST /order/supplier/:id/:action` | [`orders::apply_step`] |
//! | `PATCH /order/supplier/:id/status` | [`orders::set_status`] |
//! | `GET /order/:id/status` | [`orders::status_probe`] |
//! | `POST /material`, `GET /material`, `PATCH /material/:id` | [`materials`] |
//! | `GET /profile`, `PATCH /profile`, `GET /address` | [`profile`] |
//! | `GET /discovery/suppliers`, `GET /discovery/orders` | [`discovery`] |

pub mod auth;
pub mod discovery;
pub mod error;
pub mod materials;
pub mod orders;
pub mod profile;
pub mod views;

pub use auth::{AuthParty, StaticTokenVerifier, TokenVerifier};
pub use error::{ApiError, ErrorEnvelope};

use crate::clients::{AddressClient, MaterialClient, OrderClient, PartyClient};
use crate::config::DiscoveryConfig;
use crate::geo::SentinelPolicy;
use crate::lifecycle::MarketSystem;
use axum::routing::{get, patch, post};
use axum::Router;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DiscoverySettings {
    pub sentinel: SentinelPolicy,
    pub default_radius_km: Option<f64>,
}

impl From<&DiscoveryConfig> for DiscoverySettings {
    fn from(config: &DiscoveryConfig) -> Self {
        Self {
            sentinel: SentinelPolicy::from_flag(config.null_island_is_unset),
            default_radius_km: config.default_radius_km,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub parties: PartyClient,
    pub materials: MaterialClient,
    pub addresses: AddressClient,
    pub orders: OrderClient,
    pub verifier: Arc<dyn TokenVerifier>,
    pub discovery: DiscoverySettings,
}

impl AppState {
    pub fn new(
        system: &MarketSystem,
        verifier: Arc<dyn TokenVerifier>,
        discovery: DiscoverySettings,
    ) -> Self {
        Self {
            parties: system.party_client.clone(),
            materials: system.material_client.clone(),
            addresses: system.address_client.clone(),
            orders: system.order_client.clone(),
            verifier,
            discovery,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/order/vendor",
            post(orders::place_order).get(orders::vendor_orders),
        )
        .route("/order/vendor/stats", get(orders::vendor_stats))
        .route("/order/supplier", get(orders::supplier_orders))
        .route("/order/supplier/stats", get(orders::supplier_stats))
        .route("/order/supplier/:id/status", patch(orders::set_status))
        .route("/order/supplier/:id/:action", post(orders::apply_step))
        .route("/order/:id/status", get(orders::status_probe))
        .route(
            "/material",
            post(materials::create_material).get(materials::list_materials),
        )
        .route("/material/:id", patch(materials::update_material))
        .route("/profile", get(profile::me).patch(profile::update_profile))
        .route("/address", get(profile::my_addresses))
        .route("/discovery/suppliers", get(discovery::suppliers))
        .route("/discovery/orders", get(discovery::orders))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves until Ctrl-C, then lets in-flight requests finish.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    info!(address = %listener.local_addr()?, "HTTP server listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "Cannot listen for Ctrl-C; serving until killed");
            std::future::pending::<()>().await;
        }
    }
}

/// Parses a required JSON body.
pub(crate) fn json_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::BadRequest("Request body is required".to_string()));
    }
    Ok(serde_json::from_slice(body)?)
}

/// Parses a JSON body that may be left out entirely.
pub(crate) fn optional_json_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    Ok(serde_json::from_slice(body)?)
}
