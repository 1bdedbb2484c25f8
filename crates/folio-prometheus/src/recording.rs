// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric registration and recording helpers.
//!
//! Uses the metrics-rs facade; without an installed recorder every call is a no-op.

use metrics::{describe_counter, describe_gauge, describe_histogram};

/// Register all Folio metric descriptions.
///
/// Called once at startup after the recorder is installed.
pub fn register_metrics() {
    describe_counter!(
        "folio_submissions_total",
        "Contact submissions by outcome (accepted, rejected, failed)"
    );
    describe_counter!("folio_listings_total", "Listing requests by outcome");
    describe_histogram!(
        "folio_store_latency_seconds",
        "Store round-trip latency per operation, including connection lease"
    );
    describe_gauge!(
        "folio_store_connections_active",
        "Store connections currently leased by requests"
    );
}

/// Record the outcome of a write request.
pub fn record_submission(outcome: &'static str) {
    metrics::counter!("folio_submissions_total", "outcome" => outcome).increment(1);
}

/// Record the outcome of a listing request.
pub fn record_listing(outcome: &'static str) {
    metrics::counter!("folio_listings_total", "outcome" => outcome).increment(1);
}

/// Record store latency for one operation.
pub fn record_store_latency(operation: &'static str, seconds: f64) {
    metrics::histogram!("folio_store_latency_seconds", "operation" => operation).record(seconds);
}

/// A connection lease was handed out.
pub fn connection_leased() {
    metrics::gauge!("folio_store_connections_active").increment(1.0);
}

/// A connection lease was given back.
pub fn connection_released() {
    metrics::gauge!("folio_store_connections_active").decrement(1.0);
}
