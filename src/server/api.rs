//! REST API handlers for the scheduling server
//!
//! This module defines the API routes and handlers. The scheduling trigger
//! answers with the bare run summary on success and `{"detail": ...}` on
//! failure; the auxiliary endpoints use the [`ApiResponse`] envelope.

use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::metrics;
use crate::service::failure_message;

use super::server::AppState;

// ============================================================================
// API Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Simple error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}

/// Failure body of the scheduling trigger
#[derive(Debug, Serialize, Deserialize)]
pub struct DetailResponse {
    pub detail: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Calendar response
#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub date: String,
    pub business_day: bool,
    pub slots: Vec<String>,
}

/// Optional body of the scheduling trigger
#[derive(Debug, Default, Deserialize)]
pub struct ScheduleRequest {
    /// Collection to schedule instead of the configured one
    pub collection: Option<String>,
}

// ============================================================================
// API Routes
// ============================================================================

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Scheduling trigger
        .route("/schedule-interviews/", post(schedule_interviews))
        .route("/schedule-interviews", post(schedule_interviews))
        // Health endpoints
        .route("/api/health", get(health_check))
        // Calendar endpoints
        .route("/api/calendar/{date}", get(get_calendar))
        // Prometheus
        .route("/metrics", get(get_metrics))
        .with_state(state)
}

// ============================================================================
// Scheduling Handlers
// ============================================================================

fn detail(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(DetailResponse {
            detail: message.into(),
        }),
    )
        .into_response()
}

/// Run one scheduling pass
async fn schedule_interviews(State(state): State<AppState>, body: Bytes) -> Response {
    let started = Instant::now();

    let request = if body.iter().all(u8::is_ascii_whitespace) {
        ScheduleRequest::default()
    } else {
        match serde_json::from_slice::<ScheduleRequest>(&body) {
            Ok(request) => request,
            Err(e) => {
                return detail(StatusCode::BAD_REQUEST, format!("Invalid request body: {e}"));
            }
        }
    };

    let collection = match request.collection {
        Some(collection) if collection.trim().is_empty() => {
            return detail(StatusCode::BAD_REQUEST, "collection must not be empty");
        }
        Some(collection) => collection,
        None => state.service.default_collection().to_string(),
    };

    let response = match state.service.run(&collection).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => detail(StatusCode::INTERNAL_SERVER_ERROR, failure_message(&e)),
    };

    metrics::record_api_request(
        "/schedule-interviews",
        response.status().as_u16(),
        started.elapsed().as_secs_f64(),
    );

    response
}

// ============================================================================
// Health Handlers
// ============================================================================

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let uptime = state.start_time.elapsed().as_secs();

    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: uptime,
    }))
}

// ============================================================================
// Calendar Handlers
// ============================================================================

/// Slots generated for a specific date
async fn get_calendar(
    State(state): State<AppState>,
    Path(date_str): Path<String>,
) -> Response {
    let date = match chrono::NaiveDate::parse_from_str(&date_str, "%Y-%m-%d") {
        Ok(d) => d,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(format!(
                    "Invalid date format: {}. Expected YYYY-MM-DD",
                    date_str
                ))),
            )
                .into_response();
        }
    };

    let calendar = state.service.calendar(date);
    let business_day = state
        .service
        .allocator()
        .business_days()
        .is_business_day(date);

    (
        StatusCode::OK,
        Json(ApiResponse::success(CalendarResponse {
            date: date.to_string(),
            business_day,
            slots: calendar.labels(),
        })),
    )
        .into_response()
}

// ============================================================================
// Metrics Handlers
// ============================================================================

/// Prometheus text exposition
async fn get_metrics() -> Response {
    match metrics::encode_metrics() {
        Ok(text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(format!("Failed to encode metrics: {e}"))),
        )
            .into_response(),
    }
}

// ============================================================================
// Tests
// ============================================================================
