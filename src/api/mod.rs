//! HTTP API module for the event financials engine.
//!
//! This module provides the REST API endpoints for computing event
//! financials, previewing staffing profile matches and reading the active
//! money rules.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{FinancialsRequest, ProfileMatchRequest};
pub use response::{ApiError, FinancialsResponse, ProfileMatchResponse};
pub use state::AppState;
