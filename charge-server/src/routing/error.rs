//! Routing client error types.

use std::fmt;

/// Errors from the routing service client.
#[derive(Debug)]
pub enum RoutingError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// Non-2xx HTTP response
    HttpStatus { status: u16, body: String },

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// Service reported too many concurrent requests for this credential
    ConcurrencyLimited(String),

    /// Service is disabled for this credential
    ServiceDisabled(String),

    /// Any other non-zero service status
    Api { status: i64, message: String },

    /// Successful response without any route
    NoRoute,

    /// Route distance was negative or not a number
    InvalidDistance(f64),

    /// Client cannot be used as configured
    NotConfigured(String),
}

/// How the enricher should react to a failed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryClass {
    /// Service is overloaded; retry after a long backoff.
    ConcurrencyLimited,
    /// Probably temporary; retry after a short backoff.
    Transient,
    /// Retrying cannot help.
    Fatal,
}

impl RoutingError {
    /// Classify the error for retry purposes.
    pub fn retry_class(&self) -> RetryClass {
        match self {
            RoutingError::ConcurrencyLimited(_) => RetryClass::ConcurrencyLimited,
            RoutingError::ServiceDisabled(_) | RoutingError::NotConfigured(_) => RetryClass::Fatal,
            RoutingError::Http(_)
            | RoutingError::HttpStatus { .. }
            | RoutingError::Json { .. }
            | RoutingError::Api { .. }
            | RoutingError::NoRoute
            | RoutingError::InvalidDistance(_) => RetryClass::Transient,
        }
    }

    /// Operator guidance for errors that need a configuration change.
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            RoutingError::ServiceDisabled(_) => Some(
                "enable the route planning service for this application in the map \
                 provider's developer console and check that the API key is correct",
            ),
            RoutingError::NotConfigured(_) => Some("set ROUTING_API_KEY to a valid credential"),
            _ => None,
        }
    }
}

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingError::Http(e) => write!(f, "HTTP error: {e}"),
            RoutingError::HttpStatus { status, body } => {
                write!(f, "HTTP status {status}")?;
                if !body.is_empty() {
                    write!(f, ": {body}")?;
                }
                Ok(())
            }
            RoutingError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            RoutingError::ConcurrencyLimited(msg) => {
                write!(f, "routing service concurrency limit reached: {msg}")
            }
            RoutingError::ServiceDisabled(msg) => {
                write!(f, "routing service disabled for this credential: {msg}")
            }
            RoutingError::Api { status, message } => {
                write!(f, "routing API error {status}: {message}")
            }
            RoutingError::NoRoute => write!(f, "routing service returned no route"),
            RoutingError::InvalidDistance(d) => write!(f, "invalid route distance: {d}"),
            RoutingError::NotConfigured(msg) => write!(f, "not configured: {msg}"),
        }
    }
}

impl std::error::Error for RoutingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RoutingError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RoutingError {
    fn from(err: reqwest::Error) -> Self {
        RoutingError::Http(err)
    }
}
