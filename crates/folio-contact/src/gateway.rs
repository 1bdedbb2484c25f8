// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The submission store gateway.
//!
//! Every store operation runs inside a single leased connection bounded by
//! the configured timeout. The lease is closed on success and on error; on
//! timeout the in-flight future is dropped and the lease released by `Drop`.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{debug, error, info, warn};

use folio_config::model::{FolioConfig, ListingConfig};
use folio_core::{
    FolioError, NewSubmission, RequestMeta, StoreConnection, SubmissionId, SubmissionPage,
    SubmissionRequest, SubmissionStore, ValidationError, validate,
};

use crate::pagination::{PageQuery, PageWindow};

const NOT_CONFIGURED: &str = "no storage URI configured";

/// Validates, normalizes and persists contact submissions; serves the paged listing.
#[derive(Clone)]
pub struct SubmissionGateway {
    store: Option<Arc<dyn SubmissionStore>>,
    timeout: Duration,
    listing: ListingConfig,
}

impl SubmissionGateway {
    pub fn new(
        store: Option<Arc<dyn SubmissionStore>>,
        timeout: Duration,
        listing: ListingConfig,
    ) -> Self {
        Self {
            store,
            timeout,
            listing,
        }
    }

    pub fn from_config(store: Option<Arc<dyn SubmissionStore>>, config: &FolioConfig) -> Self {
        Self::new(store, config.storage.timeout(), config.listing.clone())
    }

    /// The configured store, if any.
    pub fn store(&self) -> Option<&Arc<dyn SubmissionStore>> {
        self.store.as_ref()
    }

    pub fn is_configured(&self) -> bool {
        self.store.is_some()
    }

    /// Validates `request` and inserts it as a new submission.
    ///
    /// Validation failures return before any store access.
    pub async fn submit(
        &self,
        request: &SubmissionRequest,
        meta: RequestMeta,
    ) -> Result<SubmissionId, FolioError> {
        let valid = match validate(request) {
            Ok(valid) => valid,
            Err(e) => {
                match &e {
                    ValidationError::MissingField { field } => {
                        info!(field, "submission rejected: missing field");
                    }
                    ValidationError::InvalidEmailFormat => {
                        info!("submission rejected: invalid email format");
                    }
                }
                folio_prometheus::record_submission("rejected");
                return Err(e.into());
            }
        };

        let submission = NewSubmission::from_validated(valid, meta, Utc::now());
        match self.insert(&submission).await {
            Ok(id) => {
                folio_prometheus::record_submission("accepted");
                info!(%id, "submission stored");
                Ok(id)
            }
            Err(e) => {
                folio_prometheus::record_submission("failed");
                Err(e)
            }
        }
    }

    /// Inserts an already normalized submission.
    ///
    /// Used directly by diagnostic tooling that writes non-`new` statuses.
    pub async fn insert(&self, submission: &NewSubmission) -> Result<SubmissionId, FolioError> {
        let store = self.require_store()?;
        self.scoped(store, "insert", |mut conn| async move {
            let outcome = conn.insert(submission).await;
            (conn, outcome)
        })
        .await
    }

    /// Returns one page of submissions, newest first, with page metadata.
    pub async fn list(&self, query: &PageQuery) -> Result<SubmissionPage, FolioError> {
        let window = PageWindow::resolve(query, &self.listing);
        let store = self.require_store().inspect_err(|_| {
            folio_prometheus::record_listing("failed");
        })?;

        let result = self
            .scoped(store, "list", |mut conn| async move {
                let outcome = async {
                    let messages = conn.find_page(window.skip, window.limit).await?;
                    let total = conn.count().await?;
                    Ok::<_, FolioError>((messages, total))
                }
                .await;
                (conn, outcome)
            })
            .await;

        match result {
            Ok((messages, total)) => {
                folio_prometheus::record_listing("ok");
                debug!(
                    skip = window.skip,
                    limit = window.limit,
                    returned = messages.len(),
                    total,
                    "listing served"
                );
                Ok(SubmissionPage {
                    messages,
                    total,
                    page: window.page(),
                    total_pages: window.total_pages(total),
                })
            }
            Err(e) => {
                folio_prometheus::record_listing("failed");
                Err(e)
            }
        }
    }

    /// Counts all stored submissions.
    pub async fn count(&self) -> Result<u64, FolioError> {
        let store = self.require_store()?;
        self.scoped(store, "count", |mut conn| async move {
            let outcome = conn.count().await;
            (conn, outcome)
        })
        .await
    }

    fn require_store(&self) -> Result<&Arc<dyn SubmissionStore>, FolioError> {
        self.store.as_ref().ok_or_else(|| {
            error!("submission store requested but no storage URI is configured");
            FolioError::ConfigurationMissing(NOT_CONFIGURED.into())
        })
    }

    /// Leases a connection, runs `op` on it and releases it, all within the
    /// configured timeout.
    ///
    /// `op` hands the connection back alongside its result so it can be closed.
    async fn scoped<T, F, Fut>(
        &self,
        store: &Arc<dyn SubmissionStore>,
        operation: &'static str,
        op: F,
    ) -> Result<T, FolioError>
    where
        F: FnOnce(Box<dyn StoreConnection>) -> Fut,
        Fut: Future<Output = (Box<dyn StoreConnection>, Result<T, FolioError>)>,
    {
        let started = Instant::now();
        let attempt = async {
            let conn = store.connect().await?;
            let (conn, outcome) = op(conn).await;
            release(conn).await;
            outcome
        };
        let result = tokio::time::timeout(self.timeout, attempt)
            .await
            .unwrap_or_else(|_| Err(FolioError::timeout(self.timeout)));

        let elapsed = started.elapsed();
        folio_prometheus::record_store_latency(operation, elapsed.as_secs_f64());
        match &result {
            Ok(_) => debug!(
                operation,
                elapsed_ms = elapsed.as_millis() as u64,
                "store operation complete"
            ),
            Err(e) => error!(operation, error = %e, "store operation failed"),
        }
        result
    }
}

impl std::fmt::Debug for SubmissionGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionGateway")
            .field("store", &self.store.as_ref().map(|s| s.name().to_string()))
            .field("timeout", &self.timeout)
            .field("listing", &self.listing)
            .finish()
    }
}

async fn release(conn: Box<dyn StoreConnection>) {
    if let Err(e) = conn.close().await {
        warn!(error = %e, "failed to release store connection");
    }
}
