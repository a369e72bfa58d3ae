//! Great-circle distance.

use crate::domain::Coordinate;

/// Mean Earth radius used for all distance calculations.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinates, in kilometres.
///
/// ```
/// use charge_server::domain::Coordinate;
/// use charge_server::geo::haversine_km;
///
/// let a = Coordinate::new(30.50, 114.30).unwrap();
/// let b = Coordinate::new(30.51, 114.31).unwrap();
/// let d = haversine_km(a, b);
/// assert!((d - 1.47).abs() < 0.01);
/// ```
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.lat().to_radians();
    let phi2 = b.lat().to_radians();
    let dphi = (b.lat() - a.lat()).to_radians();
    let dlambda = (b.lng() - a.lng()).to_radians();

    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}
