// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use folio_core::{ErrorKind, FolioError};

pub const INVALID_BODY: &str = "Invalid request body";
pub const NOT_CONFIGURED: &str = "Database connection not configured";
pub const INTERNAL: &str = "Internal server error";
pub const RETRIEVE_FAILED: &str = "Failed to retrieve messages";
pub const TRY_AGAIN: &str = "Failed to process your message. Please try again later.";

/// Response body for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// An error already mapped to its HTTP status and body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    fn new(status: StatusCode, error: &str) -> Self {
        Self {
            status,
            body: ErrorResponse {
                error: error.to_string(),
                message: None,
                details: None,
            },
        }
    }

    /// The body could not be parsed into a submission.
    pub fn invalid_body() -> Self {
        Self::new(StatusCode::BAD_REQUEST, INVALID_BODY)
    }

    /// Maps a failure on the write path.
    ///
    /// Validation errors are 400 with only `error`; store and configuration
    /// failures are 500 with a generic user message and operator details.
    pub fn submission(err: &FolioError) -> Self {
        let error = match err.kind() {
            ErrorKind::MissingField | ErrorKind::InvalidEmailFormat => {
                return Self::new(StatusCode::BAD_REQUEST, &err.to_string());
            }
            ErrorKind::ConfigurationMissing => NOT_CONFIGURED,
            ErrorKind::DatabaseUnavailable | ErrorKind::Internal => INTERNAL,
        };
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorResponse {
                error: error.to_string(),
                message: Some(TRY_AGAIN.to_string()),
                details: Some(details(err)),
            },
        }
    }

    /// Maps a failure on the listing path.
    pub fn listing(err: &FolioError) -> Self {
        match err.kind() {
            ErrorKind::ConfigurationMissing => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, NOT_CONFIGURED)
            }
            _ => Self::new(StatusCode::INTERNAL_SERVER_ERROR, RETRIEVE_FAILED),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &ErrorResponse {
        &self.body
    }
}

/// Operator-facing detail: the underlying message without the variant prefix.
fn details(err: &FolioError) -> String {
    match err {
        FolioError::ConfigurationMissing(msg) | FolioError::Internal(msg) => msg.clone(),
        FolioError::DatabaseUnavailable { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
