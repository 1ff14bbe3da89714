//! Resolves "where is the user" from storage, profile and device.

use super::provider::{FailureReason, GeolocationProvider, LocationFailure, PermissionState};
use super::store::{LocationStore, LocationStoreError, SavedLocation};
use crate::config::LocationConfig;
use crate::geo::Coordinate;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, instrument, warn};

/// Where a resolved coordinate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationSource {
    Cached,
    Profile,
    Device,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLocation {
    pub coordinate: Option<Coordinate>,
    pub source: LocationSource,
    pub permission: PermissionState,
    /// Set only when a device read was attempted and failed.
    pub failure: Option<LocationFailure>,
}

pub struct LocationService {
    store: Arc<dyn LocationStore>,
    provider: Arc<dyn GeolocationProvider>,
    request_timeout: Duration,
    permission: watch::Sender<PermissionState>,
}

impl LocationService {
    pub fn new(
        store: Arc<dyn LocationStore>,
        provider: Arc<dyn GeolocationProvider>,
        request_timeout: Duration,
    ) -> Self {
        let initial = if provider.is_supported() {
            PermissionState::Prompt
        } else {
            PermissionState::Unsupported
        };
        let (permission, _) = watch::channel(initial);
        Self {
            store,
            provider,
            request_timeout,
            permission,
        }
    }

    pub fn from_config(
        store: Arc<dyn LocationStore>,
        provider: Arc<dyn GeolocationProvider>,
        config: &LocationConfig,
    ) -> Self {
        Self::new(
            store,
            provider,
            Duration::from_millis(config.request_timeout_ms),
        )
    }

    /// Observes permission changes.
    pub fn subscribe(&self) -> watch::Receiver<PermissionState> {
        self.permission.subscribe()
    }

    /// Last published permission, without asking the platform.
    pub fn permission(&self) -> PermissionState {
        *self.permission.borrow()
    }

    fn publish(&self, next: PermissionState) {
        self.permission.send_if_modified(|current| {
            if *current == PermissionState::Unsupported || *current == next {
                return false;
            }
            *current = next;
            true
        });
    }

    /// The stored record, unmodified.
    pub async fn get_saved_location(&self) -> Result<Option<SavedLocation>, LocationStoreError> {
        self.store.get().await
    }

    pub async fn get_current_permission(&self) -> PermissionState {
        if !self.provider.is_supported() {
            self.publish(PermissionState::Unsupported);
            return PermissionState::Unsupported;
        }
        let state = match self.provider.query_permission().await {
            Ok(state) => state,
            Err(e) => {
                debug!(error = %e, "Falling back to prompt");
                PermissionState::Prompt
            }
        };
        self.publish(state);
        self.permission()
    }

    /// One device read bounded by the configured timeout.
    #[instrument(skip(self))]
    pub async fn request_location(&self) -> Result<Coordinate, LocationFailure> {
        if !self.provider.is_supported() {
            self.publish(PermissionState::Unsupported);
            return Err(LocationFailure::new(FailureReason::Unavailable));
        }

        let outcome = tokio::time::timeout(self.request_timeout, self.provider.current_position())
            .await
            .unwrap_or(Err(LocationFailure::new(FailureReason::Timeout)));

        match outcome {
            Ok(coordinate) => {
                self.publish(PermissionState::Granted);
                Ok(coordinate)
            }
            Err(failure) => {
                warn!(reason = %failure.reason, "Location request failed");
                self.publish(PermissionState::Denied);
                Err(failure)
            }
        }
    }

    pub async fn save_location(
        &self,
        coordinate: Coordinate,
        permission: PermissionState,
    ) -> Result<(), LocationStoreError> {
        self.store
            .set(SavedLocation::new(coordinate, permission))
            .await
    }

    pub async fn clear_location(&self) -> Result<(), LocationStoreError> {
        self.store.clear().await
    }

    /// Cached storage first, then the profile coordinate, then a fresh device read.
    ///
    /// The device is only asked when the permission is `granted` or `prompt`; a
    /// successful read is saved.
    #[instrument(skip(self))]
    pub async fn resolve(&self, profile: Option<Coordinate>) -> ResolvedLocation {
        match self.store.get().await {
            Ok(Some(saved)) => {
                if let Some(coordinate) = saved.coordinate() {
                    return ResolvedLocation {
                        coordinate: Some(coordinate),
                        source: LocationSource::Cached,
                        permission: saved.permission_status,
                        failure: None,
                    };
                }
                warn!(?saved, "Ignoring saved location out of range");
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Saved location unreadable"),
        }

        if let Some(coordinate) = profile {
            return ResolvedLocation {
                coordinate: Some(coordinate),
                source: LocationSource::Profile,
                permission: self.permission(),
                failure: None,
            };
        }

        let permission = self.get_current_permission().await;
        if !matches!(permission, PermissionState::Granted | PermissionState::Prompt) {
            return ResolvedLocation {
                coordinate: None,
                source: LocationSource::None,
                permission,
                failure: None,
            };
        }

        match self.request_location().await {
            Ok(coordinate) => {
                if let Err(e) = self
                    .save_location(coordinate, PermissionState::Granted)
                    .await
                {
                    warn!(error = %e, "Could not save device location");
                }
                ResolvedLocation {
                    coordinate: Some(coordinate),
                    source: LocationSource::Device,
                    permission: self.permission(),
                    failure: None,
                }
            }
            Err(failure) => ResolvedLocation {
                coordinate: None,
                source: LocationSource::None,
                permission: self.permission(),
                failure: Some(failure),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{MemoryLocationStore, StaticGeolocation, UnsupportedGeolocation};

    fn pune() -> Coordinate {
        Coordinate::new(18.5204, 73.8567).unwrap()
    }

    fn mumbai() -> Coordinate {
        Coordinate::new(19.076, 72.8777).unwrap()
    }

    fn service(provider: impl GeolocationProvider + 'static) -> (LocationService, Arc<MemoryLocationStore>) {
        let store = Arc::new(MemoryLocationStore::new());
        let service = LocationService::new(
            store.clone(),
            Arc::new(provider),
            Duration::from_millis(50),
        );
        (service, store)
    }

    #[tokio::test]
    async fn saved_location_reads_are_stable() {
        let (service, _) = service(StaticGeolocation::at(pune()));
        assert_eq!(service.get_saved_location().await.unwrap(), None);

        service
            .save_location(mumbai(), PermissionState::Granted)
            .await
            .unwrap();
        let first = service.get_saved_location().await.unwrap();
        let second = service.get_saved_location().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.unwrap().coordinate(), Some(mumbai()));

        service.clear_location().await.unwrap();
        service.clear_location().await.unwrap();
        assert_eq!(service.get_saved_location().await.unwrap(), None);
    }

    #[tokio::test]
    async fn successful_request_grants_permission() {
        let (service, _) = service(StaticGeolocation::at(pune()).with_permission(PermissionState::Prompt));
        let mut changes = service.subscribe();

        assert_eq!(service.request_location().await.unwrap(), pune());
        assert!(changes.has_changed().unwrap());
        assert_eq!(*changes.borrow_and_update(), PermissionState::Granted);
    }

    #[tokio::test]
    async fn failed_request_denies_permission() {
        let (service, _) = service(StaticGeolocation::failing(FailureReason::PermissionDenied));
        let failure = service.request_location().await.unwrap_err();
        assert_eq!(failure.reason, FailureReason::PermissionDenied);
        assert_eq!(service.permission(), PermissionState::Denied);
    }

    #[tokio::test]
    async fn slow_device_times_out() {
        let (service, _) = service(StaticGeolocation::at(pune()).with_delay(Duration::from_secs(5)));
        let failure = service.request_location().await.unwrap_err();
        assert_eq!(failure.reason, FailureReason::Timeout);
        assert_eq!(service.permission(), PermissionState::Denied);
    }

    #[tokio::test]
    async fn unsupported_is_sticky() {
        let (service, _) = service(UnsupportedGeolocation);
        assert_eq!(service.permission(), PermissionState::Unsupported);
        let failure = service.request_location().await.unwrap_err();
        assert_eq!(failure.reason, FailureReason::Unavailable);
        assert_eq!(service.get_current_permission().await, PermissionState::Unsupported);
        assert_eq!(service.permission(), PermissionState::Unsupported);
    }

    #[tokio::test]
    async fn introspection_failure_falls_back_to_prompt() {
        let (service, _) = service(StaticGeolocation::at(pune()).without_introspection());
        assert_eq!(service.get_current_permission().await, PermissionState::Prompt);
    }

    #[tokio::test]
    async fn resolve_prefers_cache_then_profile_then_device() {
        let (service, store) = service(StaticGeolocation::at(pune()));

        store
            .set(SavedLocation::new(mumbai(), PermissionState::Granted))
            .await
            .unwrap();
        let cached = service.resolve(Some(pune())).await;
        assert_eq!(cached.source, LocationSource::Cached);
        assert_eq!(cached.coordinate, Some(mumbai()));

        service.clear_location().await.unwrap();
        let profile = service.resolve(Some(mumbai())).await;
        assert_eq!(profile.source, LocationSource::Profile);
        assert_eq!(profile.coordinate, Some(mumbai()));

        let device = service.resolve(None).await;
        assert_eq!(device.source, LocationSource::Device);
        assert_eq!(device.coordinate, Some(pune()));
        assert_eq!(
            store.get().await.unwrap().and_then(|s| s.coordinate()),
            Some(pune())
        );
    }

    #[tokio::test]
    async fn resolve_skips_device_when_denied() {
        let (service, store) =
            service(StaticGeolocation::at(pune()).with_permission(PermissionState::Denied));
        let resolved = service.resolve(None).await;
        assert_eq!(resolved.source, LocationSource::None);
        assert_eq!(resolved.coordinate, None);
        assert_eq!(resolved.failure, None);
        assert_eq!(store.get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn resolve_reports_device_failure() {
        let (service, _) = service(
            StaticGeolocation::failing(FailureReason::Unavailable)
                .with_permission(PermissionState::Prompt),
        );
        let resolved = service.resolve(None).await;
        assert_eq!(resolved.coordinate, None);
        assert_eq!(
            resolved.failure,
            Some(LocationFailure::new(FailureReason::Unavailable))
        );
        assert_eq!(resolved.permission, PermissionState::Denied);
    }
}
