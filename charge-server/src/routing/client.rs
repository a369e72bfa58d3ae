//! Driving-direction HTTP client.
//!
//! Issues one GET per origin/destination pair and interprets the
//! response status. Rate limiting and retries live in the enricher;
//! this client makes exactly one attempt per call.

use std::time::Duration;

use tracing::debug;

use crate::domain::Coordinate;

use super::RouteProvider;
use super::error::RoutingError;
use super::types::DirectionResponse;

/// Default direction endpoint.
const DEFAULT_BASE_URL: &str = "https://api.map.baidu.com/direction/v2/driving";

/// Default name of the query parameter carrying the credential.
const DEFAULT_CREDENTIAL_PARAM: &str = "ak";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Longest response body kept in a JSON error.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Configuration for the routing client.
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    /// Credential for the routing service
    pub api_key: String,
    /// Endpoint URL (defaults to the production direction API)
    pub base_url: String,
    /// Query parameter name for the credential
    pub credential_param: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RoutingConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            credential_param: DEFAULT_CREDENTIAL_PARAM.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom endpoint URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the credential query parameter name.
    pub fn with_credential_param(mut self, name: impl Into<String>) -> Self {
        self.credential_param = name.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Routing service client.
#[derive(Debug, Clone)]
pub struct RoutingClient {
    http: reqwest::Client,
    base_url: String,
    credential_param: String,
    api_key: String,
}

impl RoutingClient {
    /// Create a new routing client with the given configuration.
    pub fn new(config: RoutingConfig) -> Result<Self, RoutingError> {
        if config.api_key.trim().is_empty() {
            return Err(RoutingError::NotConfigured(
                "routing API key is empty".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            credential_param: config.credential_param,
            api_key: config.api_key,
        })
    }

    /// URL for a route query, without the credential.
    ///
    /// Coordinates are written as `lat,lng` and left unencoded.
    pub fn request_url(&self, origin: Coordinate, destination: Coordinate) -> String {
        format!(
            "{}?origin={}&destination={}",
            self.base_url, origin, destination
        )
    }

    /// Fetch the driving distance in kilometres between two points.
    ///
    /// Uses the first route the service returns.
    pub async fn get_driving_distance(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<f64, RoutingError> {
        let url = self.request_url(origin, destination);
        debug!(%origin, %destination, "requesting driving route");

        let response = self
            .http
            .get(&url)
            .query(&[(self.credential_param.as_str(), self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RoutingError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: DirectionResponse =
            serde_json::from_str(&body).map_err(|e| RoutingError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(MAX_ERROR_BODY_CHARS).collect()),
            })?;

        parsed.into_distance_km()
    }
}

impl RouteProvider for RoutingClient {
    async fn route_distance_km(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<f64, RoutingError> {
        self.get_driving_distance(origin, destination).await
    }
}
