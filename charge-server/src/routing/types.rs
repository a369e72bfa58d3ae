//! Wire types for the driving-direction endpoint.
//!
//! Only the fields the enricher needs are modelled; everything else in
//! the response is ignored.

use serde::Deserialize;

use super::error::RoutingError;

/// Request succeeded.
pub const STATUS_OK: i64 = 0;

/// Too many concurrent requests for this credential; retryable.
pub const STATUS_CONCURRENCY_LIMITED: i64 = 401;

/// Direction service not enabled for this credential; not retryable.
pub const STATUS_SERVICE_DISABLED: i64 = 240;

/// Top-level direction response.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionResponse {
    pub status: i64,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub result: Option<DirectionResult>,
}

/// Route planning result.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionResult {
    #[serde(default)]
    pub routes: Vec<Route>,
}

/// One candidate route.
#[derive(Debug, Clone, Deserialize)]
pub struct Route {
    /// Route length in metres.
    pub distance: f64,

    /// Travel time in seconds.
    #[serde(default)]
    pub duration: Option<f64>,
}

impl DirectionResponse {
    /// Interpret the response, yielding the first route's length in km.
    pub fn into_distance_km(self) -> Result<f64, RoutingError> {
        match self.status {
            STATUS_OK => {}
            STATUS_CONCURRENCY_LIMITED => {
                return Err(RoutingError::ConcurrencyLimited(self.message));
            }
            STATUS_SERVICE_DISABLED => return Err(RoutingError::ServiceDisabled(self.message)),
            status => {
                return Err(RoutingError::Api {
                    status,
                    message: self.message,
                });
            }
        }

        let route = self
            .result
            .and_then(|r| r.routes.into_iter().next())
            .ok_or(RoutingError::NoRoute)?;

        if !route.distance.is_finite() || route.distance < 0.0 {
            return Err(RoutingError::InvalidDistance(route.distance));
        }

        Ok(route.distance / 1000.0)
    }
}
