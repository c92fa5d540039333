//! HTTP request handlers.

use super::types::{CreateRegistrationRequest, HealthResponse, ListQuery};
use super::AppState;
use crate::error::ApiError;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use registration_notifier::spawn_notification;
use registration_store::{Registration, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use tracing::info;

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Validate and store a registration, then notify the operator in the background.
pub async fn create_registration(
    State(state): State<AppState>,
    request: Result<Json<CreateRegistrationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Registration>), ApiError> {
    let Json(request) = request?;
    let new = request.validate()?;

    let registration = state.store.create(new).await?;

    info!(
        registration_id = registration.id,
        pass_type = %registration.pass_type,
        variant = %registration.variant,
        "Registration created"
    );

    // Delivery outcome never reaches the client.
    spawn_notification(state.notifier.clone(), registration.clone());

    Ok((StatusCode::CREATED, Json(registration)))
}

/// List registrations, most recent first.
pub async fn list_registrations(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Registration>>, ApiError> {
    let Query(query) = query?;
    let limit = resolve_limit(query.limit)?;

    let registrations = state.store.list(limit).await?;
    Ok(Json(registrations))
}

fn resolve_limit(requested: Option<i64>) -> Result<u32, ApiError> {
    let Some(limit) = requested else {
        return Ok(DEFAULT_LIST_LIMIT);
    };

    if limit > i64::from(MAX_LIST_LIMIT) {
        return Err(ApiError::BadRequest(format!(
            "limit must be <= {}",
            MAX_LIST_LIMIT
        )));
    }

    u32::try_from(limit).map_err(|_| ApiError::BadRequest("limit must be >= 0".to_string()))
}
