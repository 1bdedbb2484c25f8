// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Submission store traits.
//!
//! A [`SubmissionStore`] owns a long-lived backend client. Every request leases
//! a [`StoreConnection`] from it with [`SubmissionStore::connect`] and must give
//! it back through [`StoreConnection::close`]. Dropping a lease without closing
//! it (timeouts, cancelled futures) must release it as well.

use async_trait::async_trait;

use crate::error::FolioError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{NewSubmission, StoredSubmission, SubmissionId};

/// Backend holding the submission collection.
#[async_trait]
pub trait SubmissionStore: PluginAdapter {
    /// Prepares the backend (client construction, migrations).
    async fn initialize(&self) -> Result<(), FolioError>;

    /// Creates the collection indexes used by the listing query. Idempotent.
    async fn ensure_indexes(&self) -> Result<(), FolioError>;

    /// Leases a connection for the duration of one request.
    async fn connect(&self) -> Result<Box<dyn StoreConnection>, FolioError>;
}

/// A leased, request-scoped connection.
#[async_trait]
pub trait StoreConnection: Send {
    /// Inserts one record and returns its store-assigned identifier.
    ///
    /// No deduplication: inserting the same submission twice yields two records.
    async fn insert(&mut self, submission: &NewSubmission) -> Result<SubmissionId, FolioError>;

    /// Returns up to `limit` records after skipping `skip`, newest `submittedAt` first.
    async fn find_page(
        &mut self,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<StoredSubmission>, FolioError>;

    /// Counts every record in the collection.
    async fn count(&mut self) -> Result<u64, FolioError>;

    /// Releases the lease.
    async fn close(self: Box<Self>) -> Result<(), FolioError>;
}
