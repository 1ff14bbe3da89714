//! # Discovery
//!
//! Joins an observer coordinate with candidate records (suppliers, orders) and
//! annotates each with its distance. Candidates whose stored coordinate is missing,
//! malformed or the `(0,0)` placeholder land in a separate bucket instead of being
//! dropped. Everything here is synchronous and free of I/O.

pub mod feed;

pub use feed::DiscoveryFeed;

use crate::geo::{format_distance, Coordinate, RawCoordinate, SentinelPolicy};
use crate::model::{OrderStatus, Party, PartyId, UnknownStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// A record discovery can place on the map.
pub trait Discoverable {
    type Key: Ord + Copy;

    /// Stable identity, used as the final tiebreak.
    fn key(&self) -> Self::Key;
    fn raw_coordinate(&self) -> RawCoordinate;
    fn created_at(&self) -> DateTime<Utc>;

    /// Records without a status never match a specific status filter.
    fn status(&self) -> Option<OrderStatus> {
        None
    }
}

impl Discoverable for Party {
    type Key = PartyId;

    fn key(&self) -> PartyId {
        self.id
    }

    fn raw_coordinate(&self) -> RawCoordinate {
        Party::raw_coordinate(self)
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    pub fn admits(self, status: Option<OrderStatus>) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => status == Some(wanted),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(StatusFilter::All),
            other => other.parse().map(StatusFilter::Only),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Nearest,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DiscoveryOptions {
    pub status: StatusFilter,
    pub sort: SortOrder,
    /// Drops located candidates farther than this. Ignored without an observer.
    pub radius_km: Option<f64>,
    pub sentinel: SentinelPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Proximity {
    Distance { km: f64, display: String },
    Unknown,
}

impl Proximity {
    pub fn km(&self) -> Option<f64> {
        match self {
            Proximity::Distance { km, .. } => Some(*km),
            Proximity::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotated<T> {
    #[serde(flatten)]
    pub item: T,
    pub coordinate: Coordinate,
    pub proximity: Proximity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryView<T> {
    pub with_location: Vec<Annotated<T>>,
    pub without_location: Vec<T>,
}

impl<T> Default for DiscoveryView<T> {
    fn default() -> Self {
        Self {
            with_location: Vec::new(),
            without_location: Vec::new(),
        }
    }
}

fn newest_first<T: Discoverable>(a: &T, b: &T) -> Ordering {
    b.created_at()
        .cmp(&a.created_at())
        .then_with(|| a.key().cmp(&b.key()))
}

fn nearest_first<T: Discoverable>(a: &Annotated<T>, b: &Annotated<T>) -> Ordering {
    match (a.proximity.km(), b.proximity.km()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| newest_first(&a.item, &b.item))
}

/// Filters, classifies, annotates and orders `candidates` as seen from `observer`.
///
/// The located bucket is ordered by `options.sort`; the unlocated bucket keeps input
/// order.
pub fn annotate_and_filter<T, I>(
    observer: Option<Coordinate>,
    candidates: I,
    options: &DiscoveryOptions,
) -> DiscoveryView<T>
where
    T: Discoverable,
    I: IntoIterator<Item = T>,
{
    let mut view = DiscoveryView::default();

    for item in candidates {
        if !options.status.admits(item.status()) {
            continue;
        }
        let Some(coordinate) = item.raw_coordinate().classify(options.sentinel) else {
            view.without_location.push(item);
            continue;
        };
        let proximity = match observer {
            Some(from) => {
                let km = from.distance_to(&coordinate);
                if options.radius_km.is_some_and(|radius| km > radius) {
                    continue;
                }
                Proximity::Distance {
                    km,
                    display: format_distance(km),
                }
            }
            None => Proximity::Unknown,
        };
        view.with_location.push(Annotated {
            item,
            coordinate,
            proximity,
        });
    }

    match options.sort {
        SortOrder::Newest => view
            .with_location
            .sort_by(|a, b| newest_first(&a.item, &b.item)),
        SortOrder::Nearest => view.with_location.sort_by(nearest_first),
    }
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[derive(Debug, Clone, PartialEq)]
    struct Pin {
        id: u32,
        lat: Option<f64>,
        lon: Option<f64>,
        created_at: DateTime<Utc>,
        status: Option<OrderStatus>,
    }

    impl Discoverable for Pin {
        type Key = u32;
        fn key(&self) -> u32 {
            self.id
        }
        fn raw_coordinate(&self) -> RawCoordinate {
            RawCoordinate::new(self.lat, self.lon)
        }
        fn created_at(&self) -> DateTime<Utc> {
            self.created_at
        }
        fn status(&self) -> Option<OrderStatus> {
            self.status
        }
    }

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn pin(id: u32, lat: Option<f64>, lon: Option<f64>, age_days: i64) -> Pin {
        Pin {
            id,
            lat,
            lon,
            created_at: base() - Duration::days(age_days),
            status: None,
        }
    }

    fn observer() -> Option<Coordinate> {
        Some(Coordinate::new(19.0, 72.8).unwrap())
    }

    fn ids<T: Discoverable<Key = u32>>(view: &DiscoveryView<T>) -> Vec<u32> {
        view.with_location.iter().map(|a| a.item.key()).collect()
    }

    #[test]
    fn same_spot_is_zero_metres() {
        let view = annotate_and_filter(
            observer(),
            vec![pin(1, Some(19.0), Some(72.8), 0)],
            &DiscoveryOptions::default(),
        );
        assert_eq!(
            view.with_location[0].proximity,
            Proximity::Distance {
                km: 0.0,
                display: "0m".to_string()
            }
        );
    }

    #[test]
    fn unusable_coordinates_are_bucketed_in_input_order() {
        let candidates = vec![
            pin(1, Some(0.0), Some(0.0), 0),
            pin(2, None, None, 5),
            pin(3, Some(19.1), None, 1),
            pin(4, Some(95.0), Some(72.0), 2),
            pin(5, Some(f64::NAN), Some(72.0), 3),
            pin(6, Some(19.1), Some(72.9), 4),
        ];
        let view = annotate_and_filter(observer(), candidates, &DiscoveryOptions::default());
        assert_eq!(ids(&view), vec![6]);
        let without: Vec<u32> = view.without_location.iter().map(|p| p.id).collect();
        assert_eq!(without, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn null_island_kept_when_sentinel_disabled() {
        let options = DiscoveryOptions {
            sentinel: SentinelPolicy::TreatAsValid,
            ..Default::default()
        };
        let view = annotate_and_filter(observer(), vec![pin(1, Some(0.0), Some(0.0), 0)], &options);
        assert_eq!(ids(&view), vec![1]);
    }

    #[test]
    fn no_observer_means_unknown_proximity() {
        let view = annotate_and_filter(
            None,
            vec![pin(1, Some(19.0), Some(72.8), 0)],
            &DiscoveryOptions {
                radius_km: Some(0.001),
                ..Default::default()
            },
        );
        assert_eq!(view.with_location[0].proximity, Proximity::Unknown);
    }

    #[test]
    fn newest_first_then_id() {
        let candidates = vec![
            pin(3, Some(19.0), Some(72.8), 1),
            pin(2, Some(19.0), Some(72.8), 0),
            pin(1, Some(19.0), Some(72.8), 0),
        ];
        let view = annotate_and_filter(observer(), candidates, &DiscoveryOptions::default());
        assert_eq!(ids(&view), vec![1, 2, 3]);
    }

    #[test]
    fn nearest_sort_and_radius() {
        let candidates = vec![
            pin(1, Some(18.52), Some(73.86), 0),
            pin(2, Some(19.01), Some(72.81), 1),
            pin(3, Some(28.61), Some(77.21), 2),
        ];
        let options = DiscoveryOptions {
            sort: SortOrder::Nearest,
            radius_km: Some(500.0),
            ..Default::default()
        };
        let view = annotate_and_filter(observer(), candidates, &options);
        assert_eq!(ids(&view), vec![2, 1]);
    }

    #[test]
    fn status_filter_applies_before_bucketing() {
        let mut accepted = pin(1, Some(19.0), Some(72.8), 0);
        accepted.status = Some(OrderStatus::Accepted);
        let mut pending = pin(2, None, None, 0);
        pending.status = Some(OrderStatus::Pending);
        let unset = pin(3, Some(19.0), Some(72.8), 0);

        let options = DiscoveryOptions {
            status: "pending".parse().unwrap(),
            ..Default::default()
        };
        let view = annotate_and_filter(observer(), vec![accepted, pending, unset], &options);
        assert!(view.with_location.is_empty());
        assert_eq!(view.without_location.len(), 1);
        assert_eq!(view.without_location[0].id, 2);
    }

    #[test]
    fn status_filter_parsing() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "in_transit".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(OrderStatus::InTransit)
        );
        assert!("shipped".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn proximity_serializes_with_kind_tag() {
        let json = serde_json::to_value(Proximity::Distance {
            km: 1.5,
            display: "1.5km".into(),
        })
        .unwrap();
        assert_eq!(json["kind"], "distance");
        assert_eq!(json["display"], "1.5km");
        assert_eq!(serde_json::to_value(Proximity::Unknown).unwrap()["kind"], "unknown");
    }
}
