//! Web layer for the running-time simulator.
//!
//! Provides HTTP endpoints for browsing the network, selecting routes and
//! simulating journeys.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
