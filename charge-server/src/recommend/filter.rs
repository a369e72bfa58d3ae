//! Exact radius cutoff and user criteria.

use crate::domain::{Coordinate, RankedStation, RecommendationRequest, StationRecord};
use crate::geo::haversine_km;

/// Applies the radius and the request's criteria to candidates.
///
/// A numeric criterion only excludes a station that reports the value
/// and falls short; stations that don't report it pass.
#[derive(Debug, Clone, Copy)]
pub struct CriteriaFilter<'a> {
    request: &'a RecommendationRequest,
}

impl<'a> CriteriaFilter<'a> {
    pub fn new(request: &'a RecommendationRequest) -> Self {
        Self { request }
    }

    /// Whether a station meets the power, connector and type criteria.
    ///
    /// Distance is not considered here.
    pub fn matches(&self, station: &StationRecord) -> bool {
        let req = self.request;

        if let (Some(min), Some(power)) = (req.min_power_kw, station.max_power_kw) {
            if power < min {
                return false;
            }
        }

        if let (Some(min), Some(available)) =
            (req.min_available_connectors, station.available_connectors)
        {
            if i64::from(available) < min {
                return false;
            }
        }

        match req.charging_type_filter() {
            Some(wanted) => station.charging_type.as_deref() == Some(wanted),
            None => true,
        }
    }

    /// Keep stations within range that meet every criterion, in input order.
    pub fn apply(&self, candidates: Vec<StationRecord>) -> Vec<RankedStation> {
        let origin: Coordinate = self.request.origin;
        let max_km = self.request.max_distance_km;

        candidates
            .into_iter()
            .filter_map(|station| {
                let rough = haversine_km(origin, station.location);
                (rough <= max_km && self.matches(&station))
                    .then(|| RankedStation::great_circle(station, rough))
            })
            .collect()
    }
}
