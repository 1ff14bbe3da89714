//! Bearer-token authentication.
//!
//! Token issuance lives outside this service; [`TokenVerifier`] only maps a presented
//! token to a party id.

use super::error::ApiError;
use super::AppState;
use crate::model::{Party, PartyId, Role};
use actor_framework::ActorClient;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use std::collections::HashMap;

#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Option<PartyId>;
}

/// A fixed token table.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenVerifier {
    tokens: HashMap<String, PartyId>,
}

impl StaticTokenVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: impl Into<String>, party: PartyId) -> Self {
        self.tokens.insert(token.into(), party);
        self
    }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Option<PartyId> {
        self.tokens.get(token).copied()
    }
}

/// The authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthParty(pub Party);

impl AuthParty {
    /// The caller if it holds `role`, else `Forbidden`.
    pub fn require(&self, role: Role) -> Result<&Party, ApiError> {
        if self.0.is(role) {
            Ok(&self.0)
        } else {
            Err(ApiError::Forbidden(format!("{role} role required")))
        }
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for AuthParty {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let token = bearer_token(parts)
            .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;
        let party_id = state
            .verifier
            .verify(token)
            .await
            .ok_or_else(|| ApiError::Unauthorized("Invalid token".to_string()))?;
        let party = state
            .parties
            .get(party_id)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Unknown party".to_string()))?;
        Ok(AuthParty(party))
    }
}
