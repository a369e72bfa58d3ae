//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, Priority, RecommendationRequest, ValidationError};

/// Body of `POST /api/stations/recommend`.
///
/// Field names follow the web client. Everything except the origin is
/// optional and falls back to the request defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequestBody {
    pub lat: Option<f64>,
    pub lng: Option<f64>,

    /// `distance`, `power` or `available`
    pub priority: Option<String>,

    /// Search radius in km
    pub max_distance: Option<f64>,

    pub limit: Option<i64>,

    /// Minimum charging power in kW
    pub min_power: Option<f64>,

    pub min_available: Option<i64>,

    /// e.g. `fast`, `super_fast`
    pub charging_type: Option<String>,
}

impl TryFrom<RecommendRequestBody> for RecommendationRequest {
    type Error = ValidationError;

    fn try_from(body: RecommendRequestBody) -> Result<Self, Self::Error> {
        let lat = body.lat.ok_or(ValidationError::MissingField("lat"))?;
        let lng = body.lng.ok_or(ValidationError::MissingField("lng"))?;
        let mut request = RecommendationRequest::new(Coordinate::new(lat, lng)?);

        if let Some(priority) = body.priority {
            request.priority = Priority::from_param(&priority);
        }
        if let Some(km) = body.max_distance {
            request.max_distance_km = km;
        }
        if let Some(limit) = body.limit {
            request.result_limit =
                usize::try_from(limit).map_err(|_| ValidationError::InvalidLimit)?;
        }
        request.min_power_kw = body.min_power;
        request.min_available_connectors = body.min_available;
        request.charging_type = body.charging_type;

        request.validate()?;
        Ok(request)
    }
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: &str) -> RecommendRequestBody {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn minimal_body_uses_defaults() {
        let req = RecommendationRequest::try_from(body(r#"{"lat": 30.5, "lng": 114.3}"#)).unwrap();

        assert_eq!(req.origin, Coordinate::new(30.5, 114.3).unwrap());
        assert_eq!(req.priority, Priority::Distance);
        assert_eq!(req.max_distance_km, 10.0);
        assert_eq!(req.result_limit, 20);
        assert_eq!(req.min_power_kw, None);
    }

    #[test]
    fn full_body() {
        let req = RecommendationRequest::try_from(body(
            r#"{"lat": 30.5, "lng": 114.3, "priority": "power", "maxDistance": 5,
                "limit": 3, "minPower": 60, "minAvailable": 1, "chargingType": "fast"}"#,
        ))
        .unwrap();

        assert_eq!(req.priority, Priority::Power);
        assert_eq!(req.max_distance_km, 5.0);
        assert_eq!(req.result_limit, 3);
        assert_eq!(req.min_power_kw, Some(60.0));
        assert_eq!(req.min_available_connectors, Some(1));
        assert_eq!(req.charging_type_filter(), Some("fast"));
    }

    #[test]
    fn unknown_priority_falls_back_to_distance() {
        let req = RecommendationRequest::try_from(body(
            r#"{"lat": 30.5, "lng": 114.3, "priority": "cheapest"}"#,
        ))
        .unwrap();
        assert_eq!(req.priority, Priority::Distance);
    }

    #[test]
    fn missing_origin() {
        let err = RecommendationRequest::try_from(body(r#"{"lng": 114.3}"#)).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("lat"));

        let err = RecommendationRequest::try_from(body(r#"{"lat": 30.5}"#)).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("lng"));
    }

    #[test]
    fn invalid_values() {
        let err = RecommendationRequest::try_from(body(r#"{"lat": 95, "lng": 114.3}"#)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidOrigin(_)));

        let err = RecommendationRequest::try_from(body(r#"{"lat": 30.5, "lng": 114.3, "limit": -1}"#))
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidLimit);

        let err = RecommendationRequest::try_from(body(r#"{"lat": 30.5, "lng": 114.3, "limit": 0}"#))
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidLimit);

        let err = RecommendationRequest::try_from(body(
            r#"{"lat": 30.5, "lng": 114.3, "maxDistance": 0}"#,
        ))
        .unwrap_err();
        assert_eq!(err, ValidationError::InvalidMaxDistance(0.0));
    }
}
