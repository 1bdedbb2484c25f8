// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `folio serve` command implementation.
//!
//! Opens the configured store, builds the submission gateway and HTTP router,
//! and serves until SIGINT/SIGTERM.

use std::sync::Arc;

use folio_config::model::FolioConfig;
use folio_contact::SubmissionGateway;
use folio_core::{FolioError, SubmissionStore};
use folio_gateway::{AppState, HealthState, build_router};
use folio_prometheus::PrometheusAdapter;
use tracing::{info, warn};

use crate::shutdown;

/// Runs the `folio serve` command.
pub async fn run_serve(config: FolioConfig) -> Result<(), FolioError> {
    let prometheus_render = if config.prometheus.enabled {
        let adapter = Arc::new(PrometheusAdapter::new()?);
        let render: Arc<dyn Fn() -> String + Send + Sync> = Arc::new(move || adapter.render());
        Some(render)
    } else {
        None
    };

    let store = open_initialized_store(&config).await?;
    if store.is_none() {
        warn!("no storage URI configured; contact endpoints will answer with a configuration error");
    }

    let gateway = SubmissionGateway::from_config(store.clone(), &config);
    let state = AppState {
        gateway,
        health: HealthState::new(prometheus_render),
        database: config.storage.database.clone(),
    };
    let router = build_router(state, &config.server.allowed_origins);

    let token = shutdown::install_signal_handler();
    let server_token = token.clone();
    let served = folio_gateway::serve(&config.server, router, async move {
        server_token.cancelled().await;
    })
    .await;
    token.cancel();

    if let Some(store) = store {
        if let Err(e) = store.shutdown().await {
            warn!(error = %e, "store shutdown failed");
        }
    }
    info!("folio stopped");
    served
}

/// Opens and initializes the configured store, if any.
pub async fn open_initialized_store(
    config: &FolioConfig,
) -> Result<Option<Arc<dyn SubmissionStore>>, FolioError> {
    let Some(store) = folio_storage::open_store(&config.storage)? else {
        return Ok(None);
    };
    store.initialize().await?;
    info!(
        backend = store.name(),
        database = %config.storage.database,
        "submission store ready"
    );
    Ok(Some(store))
}

pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "folio={log_level},folio_core={log_level},folio_contact={log_level},\
             folio_gateway={log_level},folio_storage={log_level},folio_prometheus={log_level},\
             folio_config={log_level},tower_http={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
