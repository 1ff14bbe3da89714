//! Persistence port for the last known location.

use super::provider::PermissionState;
use crate::geo::Coordinate;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// Well-known key the saved location lives under.
pub const LOCATION_STORAGE_KEY: &str = "userLocation";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub permission_status: PermissionState,
}

impl SavedLocation {
    pub fn new(coordinate: Coordinate, permission_status: PermissionState) -> Self {
        Self {
            latitude: coordinate.latitude(),
            longitude: coordinate.longitude(),
            permission_status,
        }
    }

    /// `None` when the record holds an out-of-range or non-finite pair.
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::new(self.latitude, self.longitude).ok()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LocationStoreError {
    #[error("location store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("saved location is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[async_trait]
pub trait LocationStore: Send + Sync {
    async fn get(&self) -> Result<Option<SavedLocation>, LocationStoreError>;
    async fn set(&self, location: SavedLocation) -> Result<(), LocationStoreError>;
    async fn clear(&self) -> Result<(), LocationStoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryLocationStore {
    slot: RwLock<Option<SavedLocation>>,
}

impl MemoryLocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(location: SavedLocation) -> Self {
        Self {
            slot: RwLock::new(Some(location)),
        }
    }
}

#[async_trait]
impl LocationStore for MemoryLocationStore {
    async fn get(&self) -> Result<Option<SavedLocation>, LocationStoreError> {
        Ok(*self.slot.read().await)
    }

    async fn set(&self, location: SavedLocation) -> Result<(), LocationStoreError> {
        *self.slot.write().await = Some(location);
        Ok(())
    }

    async fn clear(&self) -> Result<(), LocationStoreError> {
        *self.slot.write().await = None;
        Ok(())
    }
}

/// Stores the record as JSON in `<dir>/userLocation.json`.
#[derive(Debug, Clone)]
pub struct FileLocationStore {
    path: PathBuf,
}

impl FileLocationStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir
                .as_ref()
                .join(format!("{LOCATION_STORAGE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LocationStore for FileLocationStore {
    async fn get(&self) -> Result<Option<SavedLocation>, LocationStoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, location: SavedLocation) -> Result<(), LocationStoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, serde_json::to_vec_pretty(&location)?).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), LocationStoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
