//! Charging station records as read from the station catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Coordinate;

/// A charging station snapshot from the station store.
///
/// Everything except the identity and location is optional: catalog
/// entries are frequently incomplete, and the filter and ranker treat
/// missing values explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationRecord {
    pub id: String,

    pub name: String,

    pub address: Option<String>,

    /// Serialized as top-level `lat`/`lng` fields.
    #[serde(flatten)]
    pub location: Coordinate,

    /// Network operator (e.g. "State Grid")
    pub operator: Option<String>,

    /// Charging category such as `fast` or `super_fast`; matched exactly.
    pub charging_type: Option<String>,

    /// Free-text opening hours
    pub service_hours: Option<String>,

    #[serde(rename = "is24h")]
    pub is_24h: Option<bool>,

    pub total_connectors: Option<u32>,

    /// Connectors free at the time of the snapshot.
    pub available_connectors: Option<u32>,

    pub max_power_kw: Option<f64>,

    pub parking_spots: Option<u32>,

    /// When the catalog last refreshed this record.
    pub updated_at: Option<DateTime<Utc>>,
}

impl StationRecord {
    /// Create a record with only the required fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: Coordinate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: None,
            location,
            operator: None,
            charging_type: None,
            service_hours: None,
            is_24h: None,
            total_connectors: None,
            available_connectors: None,
            max_power_kw: None,
            parking_spots: None,
            updated_at: None,
        }
    }

    pub fn with_max_power_kw(mut self, kw: f64) -> Self {
        self.max_power_kw = Some(kw);
        self
    }

    pub fn with_available_connectors(mut self, n: u32) -> Self {
        self.available_connectors = Some(n);
        self
    }

    pub fn with_charging_type(mut self, charging_type: impl Into<String>) -> Self {
        self.charging_type = Some(charging_type.into());
        self
    }
}
