// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Folio contact service.
//!
//! Exposes the submission gateway over axum: the contact write and list
//! endpoints, a diagnostic probe, health and Prometheus metrics.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod server;

pub use error::{ApiError, ErrorResponse};
pub use extract::ClientMeta;
pub use server::{AppState, HealthState, build_router, serve};
