// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prometheus metrics adapter for the Folio contact service.
//!
//! Uses the metrics-rs facade with the Prometheus exporter. The rendered text
//! is served by the gateway's `/metrics` endpoint.

pub mod recording;

use async_trait::async_trait;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use folio_core::{FolioError, HealthStatus, PluginAdapter};

pub use recording::{
    connection_leased, connection_released, record_listing, record_store_latency,
    record_submission,
};

/// Owns the process-wide Prometheus recorder.
pub struct PrometheusAdapter {
    handle: PrometheusHandle,
}

impl PrometheusAdapter {
    /// Installs the recorder and describes the submission metrics.
    ///
    /// The recorder is global: a second adapter in the same process is an error.
    pub fn new() -> Result<Self, FolioError> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| FolioError::Internal(format!("metrics recorder unavailable: {e}")))?;
        recording::register_metrics();
        tracing::info!("submission metrics enabled");
        Ok(Self { handle })
    }

    /// Current metrics in the Prometheus text exposition format.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

#[async_trait]
impl PluginAdapter for PrometheusAdapter {
    fn name(&self) -> &str {
        "prometheus"
    }

    async fn health_check(&self) -> Result<HealthStatus, FolioError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), FolioError> {
        Ok(())
    }
}
