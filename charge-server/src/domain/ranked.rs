//! Stations annotated with their distance from the request origin.

use serde::{Deserialize, Serialize};

use super::StationRecord;

/// Where a station's distance figure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DistanceSource {
    /// Haversine distance from the origin.
    GreatCircle,
    /// Driving distance reported by the routing service.
    Route,
}

/// A candidate station in a recommendation result.
///
/// `distance_km` is the best known distance: the route distance once
/// enrichment has succeeded, otherwise the great-circle figure computed
/// during filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedStation {
    #[serde(flatten)]
    pub station: StationRecord,

    #[serde(rename = "distance")]
    pub distance_km: Option<f64>,

    pub distance_source: DistanceSource,
}

impl RankedStation {
    /// Wrap a station with its great-circle distance.
    pub fn great_circle(station: StationRecord, distance_km: f64) -> Self {
        Self {
            station,
            distance_km: Some(distance_km),
            distance_source: DistanceSource::GreatCircle,
        }
    }

    /// Whether a route distance has already replaced the approximation.
    pub fn has_route_distance(&self) -> bool {
        self.distance_source == DistanceSource::Route
    }

    /// Replace the current distance with a driving distance.
    pub fn set_route_distance(&mut self, distance_km: f64) {
        self.distance_km = Some(distance_km);
        self.distance_source = DistanceSource::Route;
    }
}
