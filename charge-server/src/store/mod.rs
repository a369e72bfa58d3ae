//! Station catalog access.
//!
//! The recommendation pipeline needs exactly one capability from the
//! catalog: a range query over a latitude/longitude rectangle. Storage
//! and refresh are the implementation's business.

mod cache;
mod error;
mod json;

use std::future::Future;

pub use cache::{CacheConfig, CachedStationStore};
pub use error::StoreError;
pub use json::JsonStationStore;

use crate::domain::StationRecord;
use crate::geo::BoundingBox;

/// Read-only station lookup by bounding box.
///
/// This abstraction allows the recommender to be tested without a
/// catalog file on disk.
pub trait StationStore: Send + Sync {
    /// All stations whose location lies inside `bbox` (edges included).
    fn find_stations_in_range(
        &self,
        bbox: &BoundingBox,
    ) -> impl Future<Output = Result<Vec<StationRecord>, StoreError>> + Send;
}
