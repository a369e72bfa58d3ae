//! Server configuration from environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;

use crate::geo::LongitudeScale;
use crate::recommend::RecommendConfig;
use crate::routing::RoutingConfig;
use crate::store::CacheConfig;

const DEFAULT_CATALOG_PATH: &str = "data/stations.json";
const DEFAULT_CACHE_TTL_SECS: u64 = 60;

/// Error from reading configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but cannot be used
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Everything the server binary needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: SocketAddr,

    /// Station catalog file
    pub catalog_path: PathBuf,

    /// How often to reload the catalog from disk, if at all
    pub catalog_refresh: Option<Duration>,

    /// Allowed CORS origin; any origin when unset
    pub cors_origin: Option<HeaderValue>,

    /// Routing service settings; route enrichment is off when unset
    pub routing: Option<RoutingConfig>,

    /// Upper bound on route enrichment per request
    pub enrich_deadline: Option<Duration>,

    pub longitude_scale: LongitudeScale,

    /// TTL of cached store range queries
    pub cache_ttl: Duration,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = parse(&get, "CHARGE_BIND_ADDR")?
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000)));

        let catalog_path = get("CHARGE_STATION_CATALOG")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH));

        let catalog_refresh = parse::<u64>(&get, "CHARGE_CATALOG_REFRESH_SECS")?
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs);

        let cors_origin = match get("CHARGE_CORS_ORIGIN") {
            Some(origin) => Some(HeaderValue::from_str(&origin).map_err(|_| {
                ConfigError::Invalid {
                    key: "CHARGE_CORS_ORIGIN",
                    value: origin.clone(),
                }
            })?),
            None => None,
        };

        let routing = match get("ROUTING_API_KEY") {
            Some(key) => {
                let mut routing = RoutingConfig::new(key);
                if let Some(url) = get("ROUTING_BASE_URL") {
                    routing = routing.with_base_url(url);
                }
                if let Some(secs) = parse::<u64>(&get, "ROUTING_TIMEOUT_SECS")? {
                    routing = routing.with_timeout(secs);
                }
                Some(routing)
            }
            None => None,
        };

        let enrich_deadline =
            parse::<u64>(&get, "ENRICH_DEADLINE_SECS")?.map(Duration::from_secs);

        let longitude_scale = match parse::<f64>(&get, "LNG_KM_PER_DEGREE")? {
            Some(km) if km.is_finite() && km > 0.0 => LongitudeScale::Fixed(km),
            Some(km) => {
                return Err(ConfigError::Invalid {
                    key: "LNG_KM_PER_DEGREE",
                    value: km.to_string(),
                });
            }
            None => LongitudeScale::Cosine,
        };

        let cache_ttl = Duration::from_secs(
            parse(&get, "STORE_CACHE_TTL_SECS")?.unwrap_or(DEFAULT_CACHE_TTL_SECS),
        );

        Ok(Self {
            bind_addr,
            catalog_path,
            catalog_refresh,
            cors_origin,
            routing,
            enrich_deadline,
            longitude_scale,
            cache_ttl,
        })
    }

    /// Pipeline settings derived from this configuration.
    pub fn recommend_config(&self) -> RecommendConfig {
        RecommendConfig {
            longitude_scale: self.longitude_scale,
            enrich_deadline: self.enrich_deadline,
        }
    }

    /// Store cache settings derived from this configuration.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            ttl: self.cache_ttl,
            ..CacheConfig::default()
        }
    }
}

fn parse<T: FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    get(key)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { key, value })
        })
        .transpose()
}
