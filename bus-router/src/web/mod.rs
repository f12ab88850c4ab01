//! Web layer for the bus route finder.
//!
//! Provides HTTP endpoints for stop lookup and route planning.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
