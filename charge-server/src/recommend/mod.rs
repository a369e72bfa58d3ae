//! Charging station recommendation.
//!
//! Answers "which stations near me fit my needs, best first?" in a
//! fixed pipeline:
//!
//! 1. query the store with a bounding box around the origin
//! 2. drop stations beyond the radius or failing the criteria
//! 3. optionally refine distances through the routing service
//! 4. rank by the requested priority and truncate

mod candidates;
mod config;
mod filter;
mod rank;
mod search;

pub use candidates::SpatialCandidateFinder;
pub use config::RecommendConfig;
pub use filter::CriteriaFilter;
pub use rank::rank_stations;
pub use search::{RecommendError, Recommender};
