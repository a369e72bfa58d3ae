//! Application state for the web layer.

use std::sync::Arc;

use crate::recommend::Recommender;
use crate::routing::RoutingClient;
use crate::store::{CachedStationStore, JsonStationStore};

/// The recommender as the server wires it.
pub type StationRecommender = Recommender<CachedStationStore<JsonStationStore>, RoutingClient>;

/// Shared application state.
///
/// One recommender serves every request, so the routing rate limits
/// are enforced across the whole process.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<StationRecommender>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(recommender: StationRecommender) -> Self {
        Self {
            recommender: Arc::new(recommender),
        }
    }
}
