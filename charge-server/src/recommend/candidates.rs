//! Coarse spatial prefilter.

use tracing::debug;

use crate::domain::{Coordinate, StationRecord};
use crate::geo::{BoundingBox, LongitudeScale};
use crate::store::{StationStore, StoreError};

/// Finds stations inside the bounding box around a search circle.
///
/// The result is a superset of the stations within the radius; exact
/// distance filtering is left to [`CriteriaFilter`](super::CriteriaFilter).
#[derive(Debug, Clone, Copy, Default)]
pub struct SpatialCandidateFinder {
    scale: LongitudeScale,
}

impl SpatialCandidateFinder {
    pub fn new(scale: LongitudeScale) -> Self {
        Self { scale }
    }

    /// The box that would be queried for this circle.
    pub fn bounding_box(&self, center: Coordinate, radius_km: f64) -> BoundingBox {
        BoundingBox::around(center, radius_km, self.scale)
    }

    /// All stations in the box around `center`.
    pub async fn find_candidates<S: StationStore>(
        &self,
        store: &S,
        center: Coordinate,
        radius_km: f64,
    ) -> Result<Vec<StationRecord>, StoreError> {
        let bbox = self.bounding_box(center, radius_km);
        let candidates = store.find_stations_in_range(&bbox).await?;

        debug!(?bbox, candidates = candidates.len(), "queried station store");
        Ok(candidates)
    }
}
