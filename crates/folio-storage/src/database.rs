// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite database handle with PRAGMA setup and migrations.
//!
//! All statements run on tokio-rusqlite's single background thread, so a
//! cloned [`tokio_rusqlite::Connection`] is a cheap handle to the same database.

use folio_core::FolioError;
use tracing::debug;

use crate::migrations::run_migrations;

/// Where the SQLite database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqliteLocation {
    /// A file path on disk. Parent directories are created on open.
    File(String),
    /// A private in-memory database, discarded on shutdown.
    Memory,
}

/// An open, migrated SQLite database.
#[derive(Clone)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Opens (or creates) the database, applies PRAGMAs and runs migrations.
    pub async fn open(location: &SqliteLocation) -> Result<Self, FolioError> {
        let conn = match location {
            SqliteLocation::File(path) => {
                if let Some(parent) = std::path::Path::new(path).parent()
                    && !parent.as_os_str().is_empty()
                {
                    std::fs::create_dir_all(parent).map_err(FolioError::database)?;
                }
                tokio_rusqlite::Connection::open(path)
                    .await
                    .map_err(FolioError::database)?
            }
            SqliteLocation::Memory => tokio_rusqlite::Connection::open_in_memory()
                .await
                .map_err(FolioError::database)?,
        };

        let on_disk = matches!(location, SqliteLocation::File(_));
        conn.call(move |conn| -> Result<(), rusqlite::Error> {
            if on_disk {
                conn.execute_batch("PRAGMA journal_mode = WAL;")?;
            }
            conn.execute_batch(
                "PRAGMA synchronous = NORMAL;
                 PRAGMA busy_timeout = 5000;",
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        let db = Self { conn };
        db.migrate().await?;
        debug!(?location, "SQLite database opened");
        Ok(db)
    }

    /// Applies pending migrations. Safe to call repeatedly.
    pub async fn migrate(&self) -> Result<(), FolioError> {
        self.conn
            .call(|conn| -> Result<(), refinery::Error> { run_migrations(conn) })
            .await
            .map_err(|e| FolioError::database_msg(format!("migration failed: {e}")))
    }

    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoints the WAL so the database file is self-contained.
    pub async fn checkpoint(&self) -> Result<(), FolioError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }
}

pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> FolioError {
    FolioError::database(e)
}
