// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Submission data model shared by the store backends, the gateway service,
//! and the HTTP layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::validation::ValidatedSubmission;

/// Placeholder stored when the web layer cannot determine a metadata value.
pub const UNKNOWN: &str = "unknown";

/// Name of the collection (or table) holding submissions.
pub const SUBMISSIONS_COLLECTION: &str = "contact_submissions";

/// Untrusted contact-form payload.
///
/// Fields are optional so that an absent field surfaces as a validation
/// `MissingField` rather than a deserialization failure. Unknown fields are
/// rejected outright.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SubmissionRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Best-effort request context observed by the web layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMeta {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl RequestMeta {
    pub fn unknown() -> Self {
        Self {
            ip_address: None,
            user_agent: None,
        }
    }
}

/// Store-assigned identifier of a persisted submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(pub String);

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Status written at insert time. The core never transitions it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    /// Every submission arriving through the write endpoint.
    New,
    /// Written only by diagnostic tooling (`folio db check`).
    Test,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Test => "test",
        }
    }
}

/// Normalized record ready for a single insert.
///
/// Only constructible from a [`ValidatedSubmission`]; fields are read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    name: String,
    email: String,
    subject: String,
    message: String,
    submitted_at: DateTime<Utc>,
    ip_address: String,
    user_agent: String,
    status: SubmissionStatus,
}

impl NewSubmission {
    /// Trims every text field, lower-cases the email, and stamps metadata.
    ///
    /// Missing or blank metadata is stored as [`UNKNOWN`].
    pub fn from_validated(
        valid: ValidatedSubmission,
        meta: RequestMeta,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: valid.name.trim().to_string(),
            email: valid.email.trim().to_lowercase(),
            subject: valid.subject.trim().to_string(),
            message: valid.message.trim().to_string(),
            submitted_at,
            ip_address: or_unknown(meta.ip_address),
            user_agent: or_unknown(meta.user_agent),
            status: SubmissionStatus::New,
        }
    }

    /// Overrides the initial status. Diagnostic tooling uses this to mark
    /// its probe records as [`SubmissionStatus::Test`].
    pub fn with_status(mut self, status: SubmissionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    pub fn ip_address(&self) -> &str {
        &self.ip_address
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// The persisted form of this submission.
    pub fn to_record(&self) -> SubmissionRecord {
        SubmissionRecord {
            name: self.name.clone(),
            email: self.email.clone(),
            subject: self.subject.clone(),
            message: self.message.clone(),
            submitted_at: self.submitted_at,
            ip_address: self.ip_address.clone(),
            user_agent: self.user_agent.clone(),
            status: self.status.as_str().to_string(),
        }
    }
}

fn or_unknown(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// A persisted submission as read back from the store.
///
/// `status` is kept as a string: records may carry values set by external
/// administrative tooling that this service does not model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
    pub ip_address: String,
    pub user_agent: String,
    pub status: String,
}

/// A record together with its store identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSubmission {
    #[serde(rename = "_id")]
    pub id: SubmissionId,
    #[serde(flatten)]
    pub record: SubmissionRecord,
}

/// One page of the submission listing, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPage {
    pub messages: Vec<StoredSubmission>,
    pub total: u64,
    pub page: u64,
    pub total_pages: u64,
}

/// Health status reported by store health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Store is fully operational.
    Healthy,
    /// Store is not operational.
    Unhealthy(String),
}
