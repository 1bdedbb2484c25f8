// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Submission validation.
//!
//! [`validate`] is the only way to obtain a [`ValidatedSubmission`], and a
//! [`NewSubmission`](crate::types::NewSubmission) can only be built from one,
//! so nothing reaches the store without passing these rules:
//!
//! 1. `name`, `email`, `subject` and `message` must be present and non-empty
//!    after trimming (checked in that order).
//! 2. The trimmed `email` must look like `local@domain.tld` with no whitespace
//!    and exactly one `@`. Syntax only; no DNS or MX lookups.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::types::SubmissionRequest;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// First failing reason for a rejected submission.
///
/// The `Display` text is what clients see; the offending field name is kept
/// for logs only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("All fields are required")]
    MissingField { field: &'static str },

    #[error("Invalid email format")]
    InvalidEmailFormat,
}

/// A submission that passed [`validate`]. Fields are the caller's raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSubmission {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) subject: String,
    pub(crate) message: String,
}

impl ValidatedSubmission {
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
}

/// Checks a submission request. Pure: no I/O, same input gives the same answer.
pub fn validate(request: &SubmissionRequest) -> Result<ValidatedSubmission, ValidationError> {
    let name = required("name", request.name.as_deref())?;
    let email = required("email", request.email.as_deref())?;
    let subject = required("subject", request.subject.as_deref())?;
    let message = required("message", request.message.as_deref())?;

    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmailFormat);
    }

    Ok(ValidatedSubmission {
        name: name.to_string(),
        email: email.to_string(),
        subject: subject.to_string(),
        message: message.to_string(),
    })
}

/// Syntactic `local@domain.tld` check on the address exactly as submitted.
///
/// Leading or trailing whitespace fails the check; trimming happens only at
/// normalization, after validation has passed.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

fn required<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField { field }),
    }
}
