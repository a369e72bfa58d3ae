//! Station ranking for recommendation results.

use std::cmp::Ordering;

use crate::domain::{Priority, RankedStation};

/// Rank stations by the caller's priority.
///
/// - `Distance`: nearest first
/// - `Power`: highest `max_power_kw` first, then nearest
/// - `Available`: most free connectors first, then nearest
///
/// Missing values rank last. The sort is stable, so stations with equal
/// keys keep their input order.
pub fn rank_stations(mut stations: Vec<RankedStation>, priority: Priority) -> Vec<RankedStation> {
    match priority {
        Priority::Distance => stations.sort_by(by_distance),
        Priority::Power => stations.sort_by(|a, b| {
            desc_f64(a.station.max_power_kw, b.station.max_power_kw)
                .then_with(|| by_distance(a, b))
        }),
        Priority::Available => stations.sort_by(|a, b| {
            // None < Some, so reversing puts unknown counts last.
            b.station
                .available_connectors
                .cmp(&a.station.available_connectors)
                .then_with(|| by_distance(a, b))
        }),
    }

    stations
}

/// Ascending distance, unknown last.
fn by_distance(a: &RankedStation, b: &RankedStation) -> Ordering {
    match (a.distance_km, b.distance_km) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Descending value, unknown last.
fn desc_f64(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
