// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory submission store with lease accounting and fault injection.
//!
//! `MockStore` implements `SubmissionStore`. Every leased connection is
//! counted when opened and again when dropped, so tests can assert that
//! each request released what it acquired, whatever path it took.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use folio_core::{
    FolioError, HealthStatus, NewSubmission, PluginAdapter, StoreConnection, StoredSubmission,
    SubmissionId, SubmissionStore,
};

/// Failure mode applied to subsequent store calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fault {
    #[default]
    None,
    /// `connect` fails; no lease is opened.
    FailConnect,
    /// `insert` fails after the lease is opened.
    FailInsert,
    /// `find_page` and `count` fail after the lease is opened.
    FailQuery,
    /// Every operation on a leased connection never completes.
    Hang,
    /// `close` reports an error. The lease is still released.
    FailClose,
}

struct Entry {
    seq: u64,
    stored: StoredSubmission,
}

struct Inner {
    entries: Mutex<Vec<Entry>>,
    fault: Mutex<Fault>,
    opened: AtomicUsize,
    released: AtomicUsize,
    next_seq: AtomicU64,
}

/// A cloneable handle to a shared in-memory store.
#[derive(Clone)]
pub struct MockStore {
    inner: Arc<Inner>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::with_fault(Fault::None)
    }

    /// Create a store that starts in the given failure mode.
    pub fn with_fault(fault: Fault) -> Self {
        Self {
            inner: Arc::new(Inner {
                entries: Mutex::new(Vec::new()),
                fault: Mutex::new(fault),
                opened: AtomicUsize::new(0),
                released: AtomicUsize::new(0),
                next_seq: AtomicU64::new(1),
            }),
        }
    }

    pub async fn set_fault(&self, fault: Fault) {
        *self.inner.fault.lock().await = fault;
    }

    /// Number of connections leased so far.
    pub fn opened(&self) -> usize {
        self.inner.opened.load(Ordering::SeqCst)
    }

    /// Number of leased connections released so far.
    pub fn released(&self) -> usize {
        self.inner.released.load(Ordering::SeqCst)
    }

    /// Leases currently outstanding.
    pub fn active(&self) -> usize {
        self.opened() - self.released()
    }

    /// Snapshot of every stored record in insertion order.
    pub async fn records(&self) -> Vec<StoredSubmission> {
        self.inner
            .entries
            .lock()
            .await
            .iter()
            .map(|e| e.stored.clone())
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Pre-populate the store without going through a lease.
    pub async fn seed(&self, submission: &NewSubmission) -> SubmissionId {
        self.inner.push(submission).await
    }

    /// Shared handle usable wherever a `dyn SubmissionStore` is expected.
    pub fn as_dyn(&self) -> Arc<dyn SubmissionStore> {
        Arc::new(self.clone())
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Inner {
    async fn fault(&self) -> Fault {
        *self.fault.lock().await
    }

    async fn push(&self, submission: &NewSubmission) -> SubmissionId {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        let id = SubmissionId(format!("mock-{seq:04}"));
        self.entries.lock().await.push(Entry {
            seq,
            stored: StoredSubmission {
                id: id.clone(),
                record: submission.to_record(),
            },
        });
        id
    }
}

#[async_trait]
impl PluginAdapter for MockStore {
    fn name(&self) -> &str {
        "mock-store"
    }

    async fn health_check(&self) -> Result<HealthStatus, FolioError> {
        match self.inner.fault().await {
            Fault::FailConnect => Ok(HealthStatus::Unhealthy("connect refused".into())),
            _ => Ok(HealthStatus::Healthy),
        }
    }

    async fn shutdown(&self) -> Result<(), FolioError> {
        Ok(())
    }
}

#[async_trait]
impl SubmissionStore for MockStore {
    async fn initialize(&self) -> Result<(), FolioError> {
        Ok(())
    }

    async fn ensure_indexes(&self) -> Result<(), FolioError> {
        Ok(())
    }

    async fn connect(&self) -> Result<Box<dyn StoreConnection>, FolioError> {
        if self.inner.fault().await == Fault::FailConnect {
            return Err(FolioError::database_msg("mock: connection refused"));
        }
        self.inner.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockConnection {
            inner: Arc::clone(&self.inner),
        }))
    }
}

/// A leased mock connection. Counts as released when dropped.
pub struct MockConnection {
    inner: Arc<Inner>,
}

impl Drop for MockConnection {
    fn drop(&mut self) {
        self.inner.released.fetch_add(1, Ordering::SeqCst);
    }
}

async fn hang() {
    std::future::pending::<()>().await;
}

#[async_trait]
impl StoreConnection for MockConnection {
    async fn insert(&mut self, submission: &NewSubmission) -> Result<SubmissionId, FolioError> {
        match self.inner.fault().await {
            Fault::Hang => hang().await,
            Fault::FailInsert => return Err(FolioError::database_msg("mock: insert failed")),
            _ => {}
        }
        Ok(self.inner.push(submission).await)
    }

    async fn find_page(
        &mut self,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<StoredSubmission>, FolioError> {
        match self.inner.fault().await {
            Fault::Hang => hang().await,
            Fault::FailQuery => return Err(FolioError::database_msg("mock: query failed")),
            _ => {}
        }
        let entries = self.inner.entries.lock().await;
        let mut ordered: Vec<&Entry> = entries.iter().collect();
        ordered.sort_by(|a, b| {
            b.stored
                .record
                .submitted_at
                .cmp(&a.stored.record.submitted_at)
                .then(b.seq.cmp(&a.seq))
        });
        Ok(ordered
            .into_iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .map(|e| e.stored.clone())
            .collect())
    }

    async fn count(&mut self) -> Result<u64, FolioError> {
        match self.inner.fault().await {
            Fault::Hang => hang().await,
            Fault::FailQuery => return Err(FolioError::database_msg("mock: count failed")),
            _ => {}
        }
        Ok(self.inner.entries.lock().await.len() as u64)
    }

    async fn close(self: Box<Self>) -> Result<(), FolioError> {
        if self.inner.fault().await == Fault::FailClose {
            return Err(FolioError::database_msg("mock: close failed"));
        }
        Ok(())
    }
}
