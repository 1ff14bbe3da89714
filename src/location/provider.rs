//! The device-location port.

use crate::geo::Coordinate;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// What the platform lets us do with the device position.
///
/// Starts at `Prompt`. A request moves it to `Granted` or `Denied`; finding the
/// capability absent moves it to `Unsupported` for good.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    #[default]
    Prompt,
    Granted,
    Denied,
    Unsupported,
}

impl fmt::Display for PermissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PermissionState::Prompt => "prompt",
            PermissionState::Granted => "granted",
            PermissionState::Denied => "denied",
            PermissionState::Unsupported => "unsupported",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureReason {
    PermissionDenied,
    Unavailable,
    Timeout,
    Unknown,
}

impl FailureReason {
    pub fn code(self) -> &'static str {
        match self {
            FailureReason::PermissionDenied => "permission-denied",
            FailureReason::Unavailable => "unavailable",
            FailureReason::Timeout => "timeout",
            FailureReason::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A device read that produced no position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("location request failed: {reason}")]
pub struct LocationFailure {
    pub reason: FailureReason,
}

impl LocationFailure {
    pub fn new(reason: FailureReason) -> Self {
        Self { reason }
    }
}

/// The platform cannot say what the permission is without asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("permission introspection is unavailable")]
pub struct IntrospectionUnavailable;

#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    /// False when the platform has no location capability at all.
    fn is_supported(&self) -> bool;

    async fn query_permission(&self) -> Result<PermissionState, IntrospectionUnavailable>;

    /// One-shot position read. The caller bounds it with a timeout.
    async fn current_position(&self) -> Result<Coordinate, LocationFailure>;
}

/// A provider with a fixed answer, for embedding and tests.
#[derive(Debug, Clone)]
pub struct StaticGeolocation {
    position: Result<Coordinate, FailureReason>,
    permission: Option<PermissionState>,
    delay: Option<Duration>,
}

impl StaticGeolocation {
    /// Always reports `position` and a `granted` permission.
    pub fn at(position: Coordinate) -> Self {
        Self {
            position: Ok(position),
            permission: Some(PermissionState::Granted),
            delay: None,
        }
    }

    /// Every read fails with `reason`; the permission reads `denied`.
    pub fn failing(reason: FailureReason) -> Self {
        Self {
            position: Err(reason),
            permission: Some(PermissionState::Denied),
            delay: None,
        }
    }

    pub fn with_permission(mut self, permission: PermissionState) -> Self {
        self.permission = Some(permission);
        self
    }

    /// `query_permission` fails as if the platform had no permissions API.
    pub fn without_introspection(mut self) -> Self {
        self.permission = None;
        self
    }

    /// Each read sleeps `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl GeolocationProvider for StaticGeolocation {
    fn is_supported(&self) -> bool {
        true
    }

    async fn query_permission(&self) -> Result<PermissionState, IntrospectionUnavailable> {
        self.permission.ok_or(IntrospectionUnavailable)
    }

    async fn current_position(&self) -> Result<Coordinate, LocationFailure> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.position.map_err(LocationFailure::new)
    }
}

/// A platform without location support.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedGeolocation;

#[async_trait]
impl GeolocationProvider for UnsupportedGeolocation {
    fn is_supported(&self) -> bool {
        false
    }

    async fn query_permission(&self) -> Result<PermissionState, IntrospectionUnavailable> {
        Ok(PermissionState::Unsupported)
    }

    async fn current_position(&self) -> Result<Coordinate, LocationFailure> {
        Err(LocationFailure::new(FailureReason::Unavailable))
    }
}
