// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Submission store gateway for the Folio contact service.
//!
//! [`SubmissionGateway`] sits between the HTTP layer and a
//! [`folio_core::SubmissionStore`]: it runs the validator, normalizes
//! accepted submissions, and performs every store call inside a
//! request-scoped, time-bounded connection lease.

pub mod gateway;
pub mod pagination;

pub use gateway::SubmissionGateway;
pub use pagination::{PageQuery, PageWindow};
