// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers.
//!
//! Handles POST/GET /api/contact, GET/POST /api/test, GET /health and
//! GET /metrics.

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State, rejection::QueryRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{debug, info};

use folio_contact::PageQuery;
use folio_core::{HealthStatus, SubmissionId, SubmissionPage, SubmissionRequest};

use crate::error::ApiError;
use crate::extract::ClientMeta;
use crate::server::AppState;

/// Response body for an accepted submission.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    pub id: SubmissionId,
}

/// Response body for GET /api/test.
#[derive(Debug, Serialize)]
pub struct ApiTestResponse {
    pub message: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<ApiTestEnvironment>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTestEnvironment {
    pub version: String,
    pub storage_configured: bool,
    pub database: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub storage: String,
}

/// POST /api/contact
///
/// Validates and stores one contact-form submission.
///
/// The body is parsed as JSON whatever its `Content-Type`.
pub async fn post_contact(
    State(state): State<AppState>,
    ClientMeta(meta): ClientMeta,
    body: Bytes,
) -> Result<Json<SubmitResponse>, ApiError> {
    let request = parse_submission(&body)?;

    let present = [
        &request.name,
        &request.email,
        &request.subject,
        &request.message,
    ]
    .iter()
    .filter(|f| f.is_some())
    .count();
    debug!(
        fields_present = present,
        message_len = request.message.as_deref().map_or(0, str::len),
        "contact submission received"
    );

    let id = state
        .gateway
        .submit(&request, meta)
        .await
        .map_err(|e| ApiError::submission(&e))?;

    Ok(Json(SubmitResponse {
        success: true,
        message: "Contact form submitted successfully".to_string(),
        id,
    }))
}

/// GET /api/contact
///
/// Lists stored submissions newest first. Malformed query strings fall back
/// to the default window.
pub async fn get_contact(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<SubmissionPage>, ApiError> {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let page = state
        .gateway
        .list(&query)
        .await
        .map_err(|e| ApiError::listing(&e))?;
    Ok(Json(page))
}

/// GET /api/test
///
/// Liveness probe that never touches the store.
pub async fn get_api_test(State(state): State<AppState>) -> Json<ApiTestResponse> {
    Json(ApiTestResponse {
        message: "API is working!".to_string(),
        timestamp: now(),
        environment: Some(ApiTestEnvironment {
            version: env!("CARGO_PKG_VERSION").to_string(),
            storage_configured: state.gateway.is_configured(),
            database: state.database.clone(),
        }),
    })
}

/// POST /api/test
pub async fn post_api_test() -> Json<ApiTestResponse> {
    Json(ApiTestResponse {
        message: "POST endpoint is working!".to_string(),
        timestamp: now(),
        environment: None,
    })
}

/// GET /health
///
/// Reports process uptime and the store's health check.
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    let storage = match state.gateway.store() {
        None => "unconfigured".to_string(),
        Some(store) => match store.health_check().await {
            Ok(HealthStatus::Healthy) => "healthy".to_string(),
            Ok(HealthStatus::Unhealthy(reason)) => format!("unhealthy: {reason}"),
            Err(e) => format!("unhealthy: {e}"),
        },
    };
    let status = if storage == "healthy" { "ok" } else { "degraded" };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
        storage,
    })
}

/// GET /metrics
///
/// Prometheus text exposition, or 404 when the exporter is disabled.
pub async fn get_metrics(State(state): State<AppState>) -> Response {
    match &state.health.prometheus_render {
        Some(render) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn parse_submission(body: &[u8]) -> Result<SubmissionRequest, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        info!(reason = %e, "contact submission with unreadable body");
        ApiError::invalid_body()
    })
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
