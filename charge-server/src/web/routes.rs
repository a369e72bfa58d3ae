//! HTTP route handlers.

use axum::extract::rejection::JsonRejection;
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderValue, Method, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{RankedStation, RecommendationRequest, ValidationError};
use crate::recommend::RecommendError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations/recommend", post(recommend_stations))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy for the web client.
///
/// With no configured origin any origin is allowed.
pub fn cors_layer(allowed_origin: Option<HeaderValue>) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    match allowed_origin {
        Some(origin) => layer.allow_origin(origin),
        None => layer.allow_origin(Any),
    }
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Recommend charging stations near a point.
async fn recommend_stations(
    State(state): State<AppState>,
    payload: Result<Json<RecommendRequestBody>, JsonRejection>,
) -> Result<Json<Vec<RankedStation>>, AppError> {
    let Json(body) = payload.map_err(|e| AppError::BadRequest {
        message: e.body_text(),
    })?;

    let request = RecommendationRequest::try_from(body)?;
    let stations = state.recommender.recommend(&request).await?;

    Ok(Json(stations))
}

/// Body sent for server-side failures; the detail only goes to the log.
const INTERNAL_ERROR_MESSAGE: &str = "station lookup failed";

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<RecommendError> for AppError {
    fn from(e: RecommendError) -> Self {
        match e {
            RecommendError::Validation(e) => e.into(),
            RecommendError::Store(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => {
                warn!(%message, "rejected request");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Internal { message } => {
                error!(%message, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_owned(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, StationRecord};
    use crate::recommend::{RecommendConfig, Recommender};
    use crate::store::{CacheConfig, CachedStationStore, JsonStationStore, StoreError};
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    fn app() -> Router {
        let c = |lat, lng| Coordinate::new(lat, lng).unwrap();
        let store = JsonStationStore::from_records(vec![
            StationRecord::new("A", "Station A", c(30.51, 114.31))
                .with_max_power_kw(120.0)
                .with_available_connectors(2),
            StationRecord::new("B", "Station B", c(30.60, 114.40))
                .with_max_power_kw(60.0)
                .with_available_connectors(5),
            StationRecord::new("C", "Station C", c(31.50, 115.30)),
        ])
        .unwrap();
        let store = CachedStationStore::new(store, &CacheConfig::default());
        let state = AppState::new(Recommender::new(store, RecommendConfig::default()));

        create_router(state, cors_layer(None))
    }

    fn post_json(uri: &str, json: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_owned()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_check() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn recommend_returns_ranked_stations() {
        let response = app()
            .oneshot(post_json(
                "/api/stations/recommend",
                r#"{"lat": 30.50, "lng": 114.30, "maxDistance": 20, "priority": "available"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let stations = json.as_array().unwrap();
        let ids: Vec<_> = stations.iter().map(|s| s["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["B", "A"]);
        assert_eq!(stations[0]["availableConnectors"], 5);
        assert_eq!(stations[0]["distanceSource"], "greatCircle");
        assert!(stations[0]["distance"].as_f64().unwrap() > 10.0);
    }

    #[tokio::test]
    async fn missing_latitude_is_bad_request() {
        let response = app()
            .oneshot(post_json("/api/stations/recommend", r#"{"lng": 114.30}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "missing required field: lat");
    }

    #[tokio::test]
    async fn invalid_radius_is_bad_request() {
        let response = app()
            .oneshot(post_json(
                "/api/stations/recommend",
                r#"{"lat": 30.5, "lng": 114.3, "maxDistance": -3}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let response = app()
            .oneshot(post_json("/api/stations/recommend", "{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["error"].as_str().is_some_and(|e| !e.is_empty()));
    }

    #[tokio::test]
    async fn cors_allows_any_origin_by_default() {
        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "http://localhost:5173")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("*"))
        );
    }

    #[test]
    fn store_failure_maps_to_server_error() {
        let err = AppError::from(RecommendError::Store(StoreError::Unavailable("down".into())));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn store_failure_body_hides_catalog_path() {
        let err = AppError::from(RecommendError::Store(StoreError::Io {
            path: "/srv/charge/stations.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        }));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["error"], "station lookup failed");
        assert!(!json.to_string().contains("/srv/charge"));
    }

    #[test]
    fn validation_failure_maps_to_bad_request() {
        let err = AppError::from(RecommendError::Validation(ValidationError::InvalidLimit));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
