//! Validated coordinates and the raw optional fields records carry.

use super::distance::distance_km;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum CoordinateError {
    #[error("latitude and longitude must both be present or both be absent")]
    Partial,
    #[error("coordinates must be finite numbers")]
    NonFinite,
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// A point known to be on the globe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CoordinateError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        distance_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }

    pub fn is_null_island(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }
}

/// How an exact `(0, 0)` found on a stored record is read.
///
/// Records created before a location was captured were written with `(0, 0)`.
/// `TreatAsUnset` keeps reading those as "no location"; it also hides anything
/// genuinely located in the Gulf of Guinea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SentinelPolicy {
    #[default]
    TreatAsUnset,
    TreatAsValid,
}

impl SentinelPolicy {
    pub fn from_flag(null_island_is_unset: bool) -> Self {
        if null_island_is_unset {
            SentinelPolicy::TreatAsUnset
        } else {
            SentinelPolicy::TreatAsValid
        }
    }
}

/// Latitude/longitude exactly as stored, before any validation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RawCoordinate {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl RawCoordinate {
    pub fn new(latitude: Option<f64>, longitude: Option<f64>) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_absent(&self) -> bool {
        self.latitude.is_none() && self.longitude.is_none()
    }

    /// The usable coordinate, or `None` when the record has no location: a missing
    /// field, a non-finite or out-of-range value, or the `(0, 0)` placeholder under
    /// [`SentinelPolicy::TreatAsUnset`].
    pub fn classify(&self, policy: SentinelPolicy) -> Option<Coordinate> {
        let coordinate = Coordinate::try_from(*self).ok()?;
        if policy == SentinelPolicy::TreatAsUnset && coordinate.is_null_island() {
            return None;
        }
        Some(coordinate)
    }
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = CoordinateError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        match (raw.latitude, raw.longitude) {
            (Some(latitude), Some(longitude)) => Coordinate::new(latitude, longitude),
            _ => Err(CoordinateError::Partial),
        }
    }
}

impl From<Coordinate> for RawCoordinate {
    fn from(c: Coordinate) -> Self {
        RawCoordinate::new(Some(c.latitude), Some(c.longitude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_and_non_finite() {
        assert_eq!(
            Coordinate::new(91.0, 0.0),
            Err(CoordinateError::LatitudeOutOfRange(91.0))
        );
        assert_eq!(
            Coordinate::new(0.0, -180.5),
            Err(CoordinateError::LongitudeOutOfRange(-180.5))
        );
        assert_eq!(
            Coordinate::new(f64::NAN, 10.0),
            Err(CoordinateError::NonFinite)
        );
        assert!(Coordinate::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn partial_location_is_no_location() {
        let raw = RawCoordinate::new(Some(19.0), None);
        assert_eq!(raw.classify(SentinelPolicy::TreatAsValid), None);
        assert_eq!(Coordinate::try_from(raw), Err(CoordinateError::Partial));
    }

    #[test]
    fn null_island_follows_policy() {
        let raw = RawCoordinate::new(Some(0.0), Some(0.0));
        assert_eq!(raw.classify(SentinelPolicy::TreatAsUnset), None);
        assert!(raw.classify(SentinelPolicy::TreatAsValid).is_some());
    }

    #[test]
    fn valid_record_classifies() {
        let raw = RawCoordinate::new(Some(19.0), Some(72.8));
        let c = raw.classify(SentinelPolicy::default()).unwrap();
        assert_eq!((c.latitude(), c.longitude()), (19.0, 72.8));
    }

    #[test]
    fn deserializing_validates() {
        let ok: Coordinate = serde_json::from_str(r#"{"latitude":18.5,"longitude":73.8}"#).unwrap();
        assert_eq!(ok.latitude(), 18.5);
        assert!(serde_json::from_str::<Coordinate>(r#"{"latitude":120,"longitude":0}"#).is_err());
        assert!(serde_json::from_str::<Coordinate>(r#"{"latitude":12}"#).is_err());
    }
}
