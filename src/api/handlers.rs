//! HTTP request handlers for the event financials API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_event_financials, find_matching_profile};
use crate::config::MoneyRules;

use super::request::{FinancialsRequest, ProfileMatchRequest};
use super::response::{ApiError, ApiErrorResponse, FinancialsResponse, ProfileMatchResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/financials", post(financials_handler))
        .route("/profiles/match", post(profile_match_handler))
        .route("/rules", get(rules_handler))
        .with_state(state)
}

/// Turns a JSON body rejection into a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

/// Handler for POST /financials endpoint.
///
/// Computes the financial breakdown of an event with the server rules, or
/// with the rules snapshot carried by the request.
async fn financials_handler(
    State(state): State<AppState>,
    payload: Result<Json<FinancialsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing financials request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    if let Err(err) = request.event.validate() {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Invalid event"
        );
        return error_response(err.into());
    }

    let snapshot_rules: MoneyRules;
    let rules = match request.rules {
        Some(document) => match MoneyRules::from_partial(document) {
            Ok(parsed) => {
                snapshot_rules = parsed;
                &snapshot_rules
            }
            Err(err) => {
                warn!(
                    correlation_id = %correlation_id,
                    error = %err,
                    "Invalid rules snapshot"
                );
                return error_response(err.into());
            }
        },
        None => state.rules(),
    };

    let start_time = Instant::now();
    let financials = calculate_event_financials(&request.event, rules);
    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        correlation_id = %correlation_id,
        event_type = %financials.event_type,
        guest_count = financials.guest_count,
        total_charged = %financials.total_charged,
        gross_profit = %financials.gross_profit,
        warnings = financials.warnings.len(),
        duration_us,
        "Calculation completed successfully"
    );

    let snapshot = financials.to_snapshot();
    let response = FinancialsResponse {
        calculation_id: correlation_id,
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        duration_us,
        financials,
        snapshot,
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(response),
    )
        .into_response()
}

/// Handler for POST /profiles/match endpoint.
///
/// Previews which staffing profile a draft booking would use.
async fn profile_match_handler(
    State(state): State<AppState>,
    payload: Result<Json<ProfileMatchRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let profile = find_matching_profile(
        &state.rules().staffing.profiles,
        request.event_type,
        request.guest_count,
        request.staffing_profile_id.as_deref(),
    );
    info!(
        correlation_id = %correlation_id,
        guest_count = request.guest_count,
        profile = ?profile.map(|p| p.id.as_str()),
        "Matched staffing profile"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(ProfileMatchResponse {
            profile: profile.cloned(),
        }),
    )
        .into_response()
}

/// Handler for GET /rules endpoint.
async fn rules_handler(State(state): State<AppState>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(state.rules().clone()),
    )
        .into_response()
}
