//! Domain types for charging station recommendation.
//!
//! Types here enforce their invariants at construction time (coordinates
//! are always in range) or expose an explicit `validate` step (requests),
//! so the pipeline stages can trust what they receive.

mod coordinate;
mod ranked;
mod request;
mod station;

pub use coordinate::{Coordinate, InvalidCoordinate};
pub use ranked::{DistanceSource, RankedStation};
pub use request::{
    DEFAULT_MAX_DISTANCE_KM, DEFAULT_RESULT_LIMIT, Priority, RecommendationRequest,
    ValidationError,
};
pub use station::StationRecord;
