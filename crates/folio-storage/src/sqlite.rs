// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the SubmissionStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use folio_core::{
    FolioError, HealthStatus, NewSubmission, PluginAdapter, StoreConnection, StoredSubmission,
    SubmissionId, SubmissionStore,
};

use crate::database::{Database, SqliteLocation};
use crate::lease::Lease;
use crate::queries::submissions;

/// SQLite-backed submission store.
///
/// The database is opened and migrated by [`SubmissionStore::initialize`];
/// every lease shares the same background connection thread.
pub struct SqliteStore {
    location: SqliteLocation,
    db: OnceCell<Database>,
}

impl SqliteStore {
    pub fn new(location: SqliteLocation) -> Self {
        Self {
            location,
            db: OnceCell::new(),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(SqliteLocation::Memory)
    }

    fn db(&self) -> Result<&Database, FolioError> {
        self.db.get().ok_or_else(|| {
            FolioError::database_msg("storage not initialized -- call initialize() first")
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn health_check(&self) -> Result<HealthStatus, FolioError> {
        let Ok(db) = self.db() else {
            return Ok(HealthStatus::Unhealthy("not initialized".into()));
        };
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), FolioError> {
        if let Some(db) = self.db.get()
            && matches!(self.location, SqliteLocation::File(_))
        {
            db.checkpoint().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl SubmissionStore for SqliteStore {
    async fn initialize(&self) -> Result<(), FolioError> {
        self.db
            .get_or_try_init(|| Database::open(&self.location))
            .await?;
        debug!(location = ?self.location, "SQLite submission store initialized");
        Ok(())
    }

    async fn ensure_indexes(&self) -> Result<(), FolioError> {
        // Indexes ship with the schema migrations.
        self.db()?.migrate().await
    }

    async fn connect(&self) -> Result<Box<dyn StoreConnection>, FolioError> {
        let db = self.db()?;
        Ok(Box::new(SqliteConnection {
            conn: db.connection().clone(),
            _lease: Lease::acquire("sqlite"),
        }))
    }
}

/// A leased handle onto the store's background connection.
pub struct SqliteConnection {
    conn: tokio_rusqlite::Connection,
    _lease: Lease,
}

#[async_trait]
impl StoreConnection for SqliteConnection {
    async fn insert(&mut self, submission: &NewSubmission) -> Result<SubmissionId, FolioError> {
        submissions::insert_submission(&self.conn, submission).await
    }

    async fn find_page(
        &mut self,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<StoredSubmission>, FolioError> {
        submissions::find_page(&self.conn, skip, limit).await
    }

    async fn count(&mut self) -> Result<u64, FolioError> {
        submissions::count_submissions(&self.conn).await
    }

    async fn close(self: Box<Self>) -> Result<(), FolioError> {
        Ok(())
    }
}
