//! Geospatial helpers: great-circle distance and bounding boxes.

mod bbox;
mod distance;

pub use bbox::{BoundingBox, KM_PER_DEGREE_LAT, LongitudeScale};
pub use distance::{EARTH_RADIUS_KM, haversine_km};
