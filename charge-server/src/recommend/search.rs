//! The recommendation pipeline.
//!
//! bounding box -> store -> radius and criteria -> optional route
//! refinement -> ranking -> truncation.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::domain::{Coordinate, RankedStation, RecommendationRequest, ValidationError};
use crate::routing::{RouteDistanceEnricher, RouteProvider};
use crate::store::{StationStore, StoreError};

use super::candidates::SpatialCandidateFinder;
use super::config::RecommendConfig;
use super::filter::CriteriaFilter;
use super::rank::rank_stations;

/// Error from a recommendation request.
///
/// Route enrichment never fails a request; it only degrades distances.
#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    /// Request rejected before any lookup
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// Station store failed
    #[error("station lookup failed: {0}")]
    Store(#[from] StoreError),
}

/// Recommends charging stations near an origin.
///
/// Shared across requests; when an enricher is attached, its rate limits
/// apply to all requests together.
pub struct Recommender<S, P> {
    store: S,
    config: RecommendConfig,
    finder: SpatialCandidateFinder,
    enricher: Option<RouteDistanceEnricher<P>>,
}

impl<S: StationStore, P: RouteProvider> Recommender<S, P> {
    /// Create a recommender that uses great-circle distances only.
    pub fn new(store: S, config: RecommendConfig) -> Self {
        let finder = SpatialCandidateFinder::new(config.longitude_scale);
        Self {
            store,
            config,
            finder,
            enricher: None,
        }
    }

    /// Refine distances with driving routes.
    pub fn with_enricher(mut self, enricher: RouteDistanceEnricher<P>) -> Self {
        self.enricher = Some(enricher);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &RecommendConfig {
        &self.config
    }

    pub fn enricher(&self) -> Option<&RouteDistanceEnricher<P>> {
        self.enricher.as_ref()
    }

    /// Recommend stations for a request.
    pub async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<RankedStation>, RecommendError> {
        self.recommend_with_cancel(request, &CancellationToken::new())
            .await
    }

    /// Recommend stations, abandoning route refinement once `cancel` fires.
    ///
    /// Cancellation never fails the request: stations not yet refined
    /// keep their great-circle distance.
    pub async fn recommend_with_cancel(
        &self,
        request: &RecommendationRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<RankedStation>, RecommendError> {
        request.validate()?;

        let candidates = self
            .finder
            .find_candidates(&self.store, request.origin, request.max_distance_km)
            .await?;
        let candidate_count = candidates.len();

        let mut stations = CriteriaFilter::new(request).apply(candidates);
        let passing = stations.len();
        debug!(candidates = candidate_count, passing, "filtered candidates");

        let refined = match &self.enricher {
            Some(enricher) if !stations.is_empty() => {
                self.refine_distances(enricher, &mut stations, request.origin, cancel)
                    .await
            }
            _ => 0,
        };

        let mut ranked = rank_stations(stations, request.priority);
        ranked.truncate(request.result_limit);

        info!(
            origin = %request.origin,
            priority = %request.priority,
            radius_km = request.max_distance_km,
            candidates = candidate_count,
            passing,
            refined,
            returned = ranked.len(),
            "recommendation complete"
        );

        Ok(ranked)
    }

    async fn refine_distances(
        &self,
        enricher: &RouteDistanceEnricher<P>,
        stations: &mut [RankedStation],
        origin: Coordinate,
        cancel: &CancellationToken,
    ) -> usize {
        let fill = enricher.fill_route_distances(stations, origin, cancel);

        let Some(deadline) = self.config.enrich_deadline else {
            return fill.await;
        };

        let outcome = tokio::time::timeout(deadline, fill).await;
        match outcome {
            Ok(refined) => refined,
            Err(_) => {
                let refined = stations.iter().filter(|s| s.has_route_distance()).count();
                warn!(
                    deadline_ms = deadline.as_millis() as u64,
                    refined,
                    total = stations.len(),
                    "route refinement deadline reached; remaining stations keep great-circle distance"
                );
                refined
            }
        }
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
