// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process signals for `folio serve`.
//!
//! SIGINT or SIGTERM cancels a [`CancellationToken`]; the HTTP server drains
//! in-flight requests once it fires.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Spawns the signal watcher and returns the token it cancels.
///
/// Cancelling the token from elsewhere also stops the watcher.
pub fn install_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let watched = token.clone();

    tokio::spawn(async move {
        tokio::select! {
            signal = wait_for_signal() => {
                info!(signal, "shutting down");
                watched.cancel();
            }
            _ = watched.cancelled() => debug!("shutdown requested without a signal"),
        }
    });

    token
}

/// Resolves with the name of the first termination signal received.
async fn wait_for_signal() -> &'static str {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => tokio::select! {
                _ = tokio::signal::ctrl_c() => "SIGINT",
                _ = sigterm.recv() => "SIGTERM",
            },
            Err(e) => {
                warn!(error = %e, "SIGTERM handler unavailable; only Ctrl+C stops the server");
                ctrl_c_or_pending().await
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c_or_pending().await
    }
}

async fn ctrl_c_or_pending() -> &'static str {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Ctrl+C handler unavailable");
        std::future::pending::<()>().await;
    }
    "SIGINT"
}
