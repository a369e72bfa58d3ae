//! Web layer for the charging station recommender.
//!
//! Exposes the recommendation pipeline over a small JSON API.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, cors_layer, create_router};
pub use state::{AppState, StationRecommender};
