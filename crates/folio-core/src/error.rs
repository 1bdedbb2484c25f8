// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Folio contact service.

use std::time::Duration;

use strum::Display;
use thiserror::Error;

use crate::validation::ValidationError;

/// The primary error type used across store traits and the submission gateway.
#[derive(Debug, Error)]
pub enum FolioError {
    /// The submission failed field validation. Never reaches the store.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No store connection string is configured.
    #[error("storage not configured: {0}")]
    ConfigurationMissing(String),

    /// Connecting to the store, or the insert/query call itself, failed or timed out.
    #[error("database unavailable: {message}")]
    DatabaseUnavailable {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid configuration detected at startup (bad TOML, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Coarse error category exposed to callers and metrics labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    MissingField,
    InvalidEmailFormat,
    ConfigurationMissing,
    DatabaseUnavailable,
    Internal,
}

impl FolioError {
    /// Wraps a backend error as [`FolioError::DatabaseUnavailable`].
    pub fn database<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::DatabaseUnavailable {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// A store failure described only by a message.
    pub fn database_msg(message: impl Into<String>) -> Self {
        Self::DatabaseUnavailable {
            message: message.into(),
            source: None,
        }
    }

    /// A timed-out store operation. Reported as a database outage.
    pub fn timeout(duration: Duration) -> Self {
        Self::database_msg(format!("operation timed out after {duration:?}"))
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(ValidationError::MissingField { .. }) => ErrorKind::MissingField,
            Self::Validation(ValidationError::InvalidEmailFormat) => ErrorKind::InvalidEmailFormat,
            Self::ConfigurationMissing(_) => ErrorKind::ConfigurationMissing,
            Self::DatabaseUnavailable { .. } => ErrorKind::DatabaseUnavailable,
            Self::Config(_) | Self::Internal(_) => ErrorKind::Internal,
        }
    }
}
