//! Station store error types.

use std::path::PathBuf;

/// Errors from loading or querying the station catalog.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Catalog file could not be read
    #[error("failed to read station catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog file is not a valid station list
    #[error("failed to parse station catalog {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A record violates a catalog invariant
    #[error("invalid station record {id:?}: {reason}")]
    InvalidRecord { id: String, reason: &'static str },

    /// Backend could not serve the query
    #[error("station store unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StoreError::Io {
            path: PathBuf::from("data/stations.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(
            err.to_string(),
            "failed to read station catalog data/stations.json: no such file"
        );

        let err = StoreError::InvalidRecord {
            id: "CS1".into(),
            reason: "duplicate id",
        };
        assert_eq!(err.to_string(), "invalid station record \"CS1\": duplicate id");

        let err = StoreError::Unavailable("connection refused".into());
        assert_eq!(err.to_string(), "station store unavailable: connection refused");
    }
}
