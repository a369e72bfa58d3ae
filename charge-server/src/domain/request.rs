//! Recommendation requests and their validation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Coordinate, InvalidCoordinate};

/// Default search radius in kilometres.
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 10.0;

/// Default number of stations returned.
pub const DEFAULT_RESULT_LIMIT: usize = 20;

/// Ranking policy chosen by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Nearest first.
    #[default]
    Distance,
    /// Highest charging power first, then nearest.
    Power,
    /// Most free connectors first, then nearest.
    Available,
}

impl Priority {
    /// Parse a priority parameter.
    ///
    /// Unknown values fall back to [`Priority::Distance`] rather than
    /// failing the request.
    ///
    /// ```
    /// use charge_server::domain::Priority;
    ///
    /// assert_eq!(Priority::from_param("power"), Priority::Power);
    /// assert_eq!(Priority::from_param("cheapest"), Priority::Distance);
    /// ```
    pub fn from_param(s: &str) -> Self {
        match s {
            "power" => Priority::Power,
            "available" => Priority::Available,
            _ => Priority::Distance,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Distance => "distance",
            Priority::Power => "power",
            Priority::Available => "available",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a recommendation request is rejected before any lookup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was absent
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Origin is not a valid coordinate
    #[error(transparent)]
    InvalidOrigin(#[from] InvalidCoordinate),

    /// Search radius must be positive
    #[error("max distance must be a positive number of kilometres, got {0}")]
    InvalidMaxDistance(f64),

    /// Result limit must be positive
    #[error("result limit must be greater than zero")]
    InvalidLimit,

    /// Minimum power cannot be negative
    #[error("minimum power must be non-negative, got {0}")]
    InvalidMinPower(f64),

    /// Minimum available connectors cannot be negative
    #[error("minimum available connectors must be non-negative, got {0}")]
    InvalidMinAvailable(i64),
}

/// A request for nearby station recommendations.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationRequest {
    /// Where the user is.
    pub origin: Coordinate,

    /// Ranking policy.
    pub priority: Priority,

    /// Search radius, measured as great-circle distance.
    pub max_distance_km: f64,

    /// Maximum number of stations to return.
    pub result_limit: usize,

    /// Minimum charging power, if required.
    pub min_power_kw: Option<f64>,

    /// Minimum free connectors, if required.
    pub min_available_connectors: Option<i64>,

    /// Exact charging type to match, if required.
    pub charging_type: Option<String>,
}

impl RecommendationRequest {
    /// Create a request with default criteria.
    pub fn new(origin: Coordinate) -> Self {
        Self {
            origin,
            priority: Priority::default(),
            max_distance_km: DEFAULT_MAX_DISTANCE_KM,
            result_limit: DEFAULT_RESULT_LIMIT,
            min_power_kw: None,
            min_available_connectors: None,
            charging_type: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_max_distance_km(mut self, km: f64) -> Self {
        self.max_distance_km = km;
        self
    }

    pub fn with_result_limit(mut self, limit: usize) -> Self {
        self.result_limit = limit;
        self
    }

    pub fn with_min_power_kw(mut self, kw: f64) -> Self {
        self.min_power_kw = Some(kw);
        self
    }

    pub fn with_min_available_connectors(mut self, n: i64) -> Self {
        self.min_available_connectors = Some(n);
        self
    }

    pub fn with_charging_type(mut self, charging_type: impl Into<String>) -> Self {
        self.charging_type = Some(charging_type.into());
        self
    }

    /// The charging type filter, treating blank strings as absent.
    pub fn charging_type_filter(&self) -> Option<&str> {
        self.charging_type
            .as_deref()
            .filter(|t| !t.trim().is_empty())
    }

    /// Validate the request.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.max_distance_km.is_finite() || self.max_distance_km <= 0.0 {
            return Err(ValidationError::InvalidMaxDistance(self.max_distance_km));
        }

        if self.result_limit == 0 {
            return Err(ValidationError::InvalidLimit);
        }

        if let Some(kw) = self.min_power_kw {
            if !kw.is_finite() || kw < 0.0 {
                return Err(ValidationError::InvalidMinPower(kw));
            }
        }

        if let Some(n) = self.min_available_connectors {
            if n < 0 {
                return Err(ValidationError::InvalidMinAvailable(n));
            }
        }

        Ok(())
    }
}
