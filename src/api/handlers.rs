//! HTTP request handlers for the Timecard Processing & Compliance Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::audit::TracingSink;
use crate::processing::{BatchInput, process_batch};

use super::request::ProcessRequest;
use super::response::{ApiError, ApiErrorResponse, BatchError, ProcessResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/process", post(process_handler))
        .with_state(state)
}

/// Handler for POST /process endpoint.
///
/// Accepts a batch of punches with collaborator data and returns the
/// produced timecards alongside per-employee processing errors.
async fn process_handler(
    State(state): State<AppState>,
    payload: Result<Json<ProcessRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing timecard batch request");

    // Handle JSON parsing errors
    let mut request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // Get the body text which contains the detailed error from serde
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    // Check if it's a missing field error
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
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
                JsonRejection::MissingJsonContentType(_) => ApiError::new(
                    "MISSING_CONTENT_TYPE",
                    "Content-Type must be application/json",
                ),
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    // Resolve rules and policy: request override or server defaults
    let config = state.config();
    let rules = request
        .client_rules
        .take()
        .unwrap_or_else(|| config.rules().clone());
    let policy = request
        .compliance_policy
        .take()
        .unwrap_or_else(|| config.policy().clone());

    // Misconfiguration is rejected here, before any unit computation
    if let Err(err) = rules.validate().and_then(|_| policy.validate()) {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Request configuration rejected"
        );
        let api_error: ApiErrorResponse = err.into();
        return (
            api_error.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(api_error.error),
        )
            .into_response();
    }

    let input: BatchInput = request.into();
    let punch_count = input.punches.len();

    let start_time = Instant::now();
    let outcome = process_batch(&input, &rules, &policy, &TracingSink);
    let duration = start_time.elapsed();

    info!(
        correlation_id = %correlation_id,
        punch_count = punch_count,
        timecard_count = outcome.timecards.len(),
        error_count = outcome.errors.len(),
        duration_us = duration.as_micros(),
        "Batch processed"
    );

    let response = ProcessResponse {
        timecards: outcome.timecards,
        errors: outcome
            .errors
            .iter()
            .map(|e| BatchError {
                employee_id: e.employee_id.clone(),
                error: e.error.to_string(),
            })
            .collect(),
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(response),
    )
        .into_response()
}
