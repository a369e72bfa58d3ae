//! In-memory station catalog loaded from a JSON file.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::StationRecord;
use crate::geo::BoundingBox;

use super::StationStore;
use super::error::StoreError;

/// Station store that serves a JSON catalog held in memory.
///
/// The file is a JSON array of station records in the same camelCase
/// shape the API returns (`id`, `name`, `lat`, `lng`, `maxPowerKw`, ...).
/// Range queries are a linear scan, which is fine for city-sized
/// catalogs.
#[derive(Clone)]
pub struct JsonStationStore {
    stations: Arc<RwLock<Vec<StationRecord>>>,
}

impl JsonStationStore {
    /// Load the catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let records = read_catalog(path.as_ref())?;
        Self::from_records(records)
    }

    /// Build a store from records already in memory.
    ///
    /// Fails if any id is empty or appears more than once.
    pub fn from_records(records: Vec<StationRecord>) -> Result<Self, StoreError> {
        check_records(&records)?;
        Ok(Self {
            stations: Arc::new(RwLock::new(records)),
        })
    }

    /// Number of stations in the catalog.
    pub async fn len(&self) -> usize {
        self.stations.read().await.len()
    }

    /// Check if the catalog is empty.
    pub async fn is_empty(&self) -> bool {
        self.stations.read().await.is_empty()
    }

    /// Reload the catalog from disk.
    ///
    /// On failure the current catalog is kept and the error returned.
    pub async fn reload(&self, path: impl AsRef<Path>) -> Result<usize, StoreError> {
        let records = read_catalog(path.as_ref())?;
        check_records(&records)?;
        let count = records.len();

        let mut guard = self.stations.write().await;
        *guard = records;

        Ok(count)
    }
}

impl StationStore for JsonStationStore {
    async fn find_stations_in_range(
        &self,
        bbox: &BoundingBox,
    ) -> Result<Vec<StationRecord>, StoreError> {
        let stations = self.stations.read().await;
        Ok(stations
            .iter()
            .filter(|s| bbox.contains(s.location))
            .cloned()
            .collect())
    }
}

fn read_catalog(path: &Path) -> Result<Vec<StationRecord>, StoreError> {
    let json = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&json).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn check_records(records: &[StationRecord]) -> Result<(), StoreError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if record.id.trim().is_empty() {
            return Err(StoreError::InvalidRecord {
                id: record.id.clone(),
                reason: "empty id",
            });
        }
        if !seen.insert(record.id.as_str()) {
            return Err(StoreError::InvalidRecord {
                id: record.id.clone(),
                reason: "duplicate id",
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;
    use std::io::Write;

    fn c(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    fn bbox(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> BoundingBox {
        BoundingBox {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
    }

    fn write_catalog(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn range_query_is_inclusive() {
        let store = JsonStationStore::from_records(vec![
            StationRecord::new("A", "Inside", c(30.5, 114.3)),
            StationRecord::new("B", "Edge", c(31.0, 115.0)),
            StationRecord::new("C", "Outside", c(31.5, 115.3)),
        ])
        .unwrap();

        let found = store
            .find_stations_in_range(&bbox(30.0, 31.0, 114.0, 115.0))
            .await
            .unwrap();

        let ids: Vec<_> = found.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn loads_catalog_file() {
        let file = write_catalog(
            r#"[
                {"id": "CS1", "name": "One", "lat": 30.5, "lng": 114.3, "maxPowerKw": 60},
                {"id": "CS2", "name": "Two", "lat": 30.6, "lng": 114.4}
            ]"#,
        );

        let store = JsonStationStore::load(file.path()).unwrap();
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn bundled_catalog_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/stations.json");
        let store = JsonStationStore::load(path).unwrap();
        assert!(!store.is_empty().await);
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = JsonStationStore::load("/definitely/not/here.json");
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }

    #[test]
    fn malformed_file_is_json_error() {
        let file = write_catalog("{not json");
        let result = JsonStationStore::load(file.path());
        assert!(matches!(result, Err(StoreError::Json { .. })));
    }

    #[test]
    fn out_of_range_coordinates_rejected() {
        let file = write_catalog(r#"[{"id": "X", "name": "Bad", "lat": 95.0, "lng": 114.3}]"#);
        let result = JsonStationStore::load(file.path());
        assert!(matches!(result, Err(StoreError::Json { .. })));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let result = JsonStationStore::from_records(vec![
            StationRecord::new("A", "One", c(30.5, 114.3)),
            StationRecord::new("A", "Two", c(30.6, 114.4)),
        ]);
        assert!(matches!(
            result,
            Err(StoreError::InvalidRecord {
                reason: "duplicate id",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn failed_reload_keeps_catalog() {
        let store =
            JsonStationStore::from_records(vec![StationRecord::new("A", "One", c(30.5, 114.3))])
                .unwrap();

        let bad = write_catalog("[");
        assert!(store.reload(bad.path()).await.is_err());
        assert_eq!(store.len().await, 1);

        let good = write_catalog(
            r#"[{"id": "B", "name": "B", "lat": 1.0, "lng": 2.0},
                {"id": "C", "name": "C", "lat": 3.0, "lng": 4.0}]"#,
        );
        assert_eq!(store.reload(good.path()).await.unwrap(), 2);
        assert_eq!(store.len().await, 2);
    }
}
