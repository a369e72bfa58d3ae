//! Bounding boxes for coarse spatial prefiltering.
//!
//! The box is a cheap range query for the station store. It is
//! deliberately larger than the search circle; exact distance filtering
//! happens afterwards with [`haversine_km`](super::haversine_km).

use crate::domain::Coordinate;

/// Kilometres per degree of latitude (rounded down so the box errs wide).
pub const KM_PER_DEGREE_LAT: f64 = 111.0;

/// Below this many km per degree of longitude the box spans all longitudes.
const MIN_KM_PER_DEGREE_LNG: f64 = 1e-6;

/// How to convert kilometres into degrees of longitude.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LongitudeScale {
    /// `111 * cos(latitude)`, evaluated at the most poleward edge of the
    /// box so the box always encloses the search circle.
    #[default]
    Cosine,

    /// A fixed calibration, valid only near the latitude band it was
    /// measured at (e.g. 85 km around Wuhan).
    Fixed(f64),
}

impl LongitudeScale {
    /// Kilometres per degree of longitude at the given latitude.
    pub fn km_per_degree(&self, lat_deg: f64) -> f64 {
        match self {
            LongitudeScale::Cosine => {
                KM_PER_DEGREE_LAT * lat_deg.abs().min(90.0).to_radians().cos()
            }
            LongitudeScale::Fixed(km) => *km,
        }
    }
}

/// An axis-aligned latitude/longitude rectangle, inclusive on all edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// The box enclosing a circle of `radius_km` around `center`.
    ///
    /// Edges are clamped to valid coordinate ranges. A box crossing the
    /// antimeridian is truncated at ±180 rather than wrapped.
    pub fn around(center: Coordinate, radius_km: f64, scale: LongitudeScale) -> Self {
        let radius_km = radius_km.max(0.0);
        let d_lat = radius_km / KM_PER_DEGREE_LAT;

        let poleward_lat = (center.lat().abs() + d_lat).min(90.0);
        let km_per_lng = scale.km_per_degree(poleward_lat);
        let d_lng = if km_per_lng > MIN_KM_PER_DEGREE_LNG {
            radius_km / km_per_lng
        } else {
            360.0
        };

        Self {
            min_lat: (center.lat() - d_lat).max(-90.0),
            max_lat: (center.lat() + d_lat).min(90.0),
            min_lng: (center.lng() - d_lng).max(-180.0),
            max_lng: (center.lng() + d_lng).min(180.0),
        }
    }

    /// Whether the coordinate lies inside the box (edges included).
    pub fn contains(&self, c: Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&c.lat())
            && (self.min_lng..=self.max_lng).contains(&c.lng())
    }
}
