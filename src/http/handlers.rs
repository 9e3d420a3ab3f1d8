//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for business logic.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{
    parse_date_param, BookingBody, DayQuery, DiscoverQuery, DiscoverResponse, HealthResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
///
/// Health check endpoint to verify the service is running and storage is
/// reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

/// GET /v1/discover
///
/// Rank every single table and table combination able to seat the party
/// within the requested window.
pub async fn discover(
    State(state): State<AppState>,
    Query(query): Query<DiscoverQuery>,
) -> HandlerResult<DiscoverResponse> {
    let request = query.into_request()?;
    let discovery = services::discover(state.repository.as_ref(), &request).await?;
    Ok(Json(DiscoverResponse::from_discovery(discovery)))
}

/// POST /v1/bookings
///
/// Commit a booking for the best-ranked candidate. Requires an
/// `Idempotency-Key` header; replays of a committed key return 200 with the
/// cached response and an `Idempotency-Replay: true` header.
pub async fn create_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<BookingBody>,
) -> Result<Response, AppError> {
    let idempotency_key = headers
        .get("idempotency-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let request = body.into_request(idempotency_key)?;
    let outcome = state.coordinator.book(&request).await?;

    let status = if outcome.replayed {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    let mut response = (status, Json(outcome.confirmation)).into_response();
    if outcome.replayed {
        response
            .headers_mut()
            .insert("idempotency-replay", HeaderValue::from_static("true"));
    }
    Ok(response)
}

/// GET /v1/bookings/day
///
/// List the sector's confirmed bookings for one day, grouped by date.
pub async fn day_bookings(
    State(state): State<AppState>,
    Query(query): Query<DayQuery>,
) -> HandlerResult<Vec<services::DaySchedule>> {
    let date = parse_date_param(&query.date)?;
    let days = services::day_bookings(
        state.repository.as_ref(),
        &query.restaurant_id,
        &query.sector_id,
        date,
    )
    .await?;
    Ok(Json(days))
}

/// DELETE /v1/bookings/{id}
///
/// Cancel a booking (soft delete). 404 when the id is unknown.
pub async fn cancel_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    services::cancel(state.repository.as_ref(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
