//! Driving-distance lookups.
//!
//! Great-circle distance is a poor proxy for how far a driver actually
//! has to go. This module asks an external routing service for the real
//! figure while respecting the service's quotas:
//!
//! - at most a few requests in flight at once
//! - a global minimum spacing between dispatches
//! - bounded retries with exponential backoff
//!
//! Any failure leaves the great-circle distance in place.

mod client;
mod enricher;
mod error;
mod gate;
mod mock;
mod types;

use std::future::Future;

pub use client::{RoutingClient, RoutingConfig};
pub use enricher::{EnricherConfig, RouteDistanceEnricher};
pub use error::{RetryClass, RoutingError};
pub use gate::{Admission, RequestGate};
pub use mock::{MockOutcome, MockRouteProvider};
pub use types::{
    DirectionResponse, DirectionResult, Route, STATUS_CONCURRENCY_LIMITED, STATUS_OK,
    STATUS_SERVICE_DISABLED,
};

use crate::domain::Coordinate;

/// Something that can measure driving distance between two points.
///
/// One call is one attempt; implementations must not retry internally.
pub trait RouteProvider: Send + Sync {
    /// Driving distance in kilometres from `origin` to `destination`.
    fn route_distance_km(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> impl Future<Output = Result<f64, RoutingError>> + Send;
}
