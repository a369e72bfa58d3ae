//! Charging station recommendation server.
//!
//! A web service that answers: "I'm here and need to charge; which
//! nearby stations suit me best?" Candidates come from a station
//! catalog, are filtered and ranked by the caller's priorities, and can
//! have their distances refined with real driving routes.

pub mod config;
pub mod domain;
pub mod geo;
pub mod recommend;
pub mod routing;
pub mod store;
pub mod web;
