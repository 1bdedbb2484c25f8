// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Submission store backends for the Folio contact service.
//!
//! The backend is picked from the configured connection string:
//! `mongodb://` and `mongodb+srv://` select [`MongoStore`], `sqlite:` selects
//! [`SqliteStore`] (`sqlite::memory:` for a throwaway in-memory database).

pub mod database;
mod lease;
pub mod migrations;
pub mod mongo;
pub mod queries;
pub mod sqlite;

use std::sync::Arc;

use folio_config::model::StorageConfig;
use folio_core::{FolioError, SubmissionStore};

pub use database::{Database, SqliteLocation};
pub use mongo::MongoStore;
pub use sqlite::SqliteStore;

/// The backend a connection string resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreTarget {
    Mongo(String),
    Sqlite(SqliteLocation),
}

impl StoreTarget {
    /// Classifies a connection string by scheme.
    ///
    /// The error never echoes the string, which may carry credentials.
    pub fn parse(uri: &str) -> Result<Self, FolioError> {
        let uri = uri.trim();
        if uri.starts_with("mongodb://") || uri.starts_with("mongodb+srv://") {
            return Ok(Self::Mongo(uri.to_string()));
        }
        let path = uri
            .strip_prefix("sqlite://")
            .or_else(|| uri.strip_prefix("sqlite:"))
            .ok_or_else(|| FolioError::Config("unsupported storage URI scheme".into()))?;
        match path {
            ":memory:" | "" => Ok(Self::Sqlite(SqliteLocation::Memory)),
            path => Ok(Self::Sqlite(SqliteLocation::File(path.to_string()))),
        }
    }
}

/// Builds the configured store, or `None` when no connection string is set.
///
/// The store is not initialized; callers run [`SubmissionStore::initialize`].
pub fn open_store(config: &StorageConfig) -> Result<Option<Arc<dyn SubmissionStore>>, FolioError> {
    let Some(uri) = config.uri.as_deref().filter(|u| !u.trim().is_empty()) else {
        return Ok(None);
    };
    let store: Arc<dyn SubmissionStore> = match StoreTarget::parse(uri)? {
        StoreTarget::Mongo(uri) => Arc::new(MongoStore::new(
            uri,
            config.database.clone(),
            config.timeout(),
        )),
        StoreTarget::Sqlite(location) => Arc::new(SqliteStore::new(location)),
    };
    Ok(Some(store))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(uri: Option<&str>) -> StorageConfig {
        StorageConfig {
            uri: uri.map(str::to_string),
            ..StorageConfig::default()
        }
    }

    #[test]
    fn parse_selects_backend_by_scheme() {
        assert_eq!(
            StoreTarget::parse("mongodb+srv://u:p@cluster0.example.net").unwrap(),
            StoreTarget::Mongo("mongodb+srv://u:p@cluster0.example.net".into())
        );
        assert_eq!(
            StoreTarget::parse("sqlite://data/folio.db").unwrap(),
            StoreTarget::Sqlite(SqliteLocation::File("data/folio.db".into()))
        );
        assert_eq!(
            StoreTarget::parse("sqlite:/var/lib/folio.db").unwrap(),
            StoreTarget::Sqlite(SqliteLocation::File("/var/lib/folio.db".into()))
        );
        assert_eq!(
            StoreTarget::parse("sqlite::memory:").unwrap(),
            StoreTarget::Sqlite(SqliteLocation::Memory)
        );
    }

    #[test]
    fn unsupported_scheme_does_not_leak_uri() {
        let err = StoreTarget::parse("postgres://admin:hunter2@db").unwrap_err();
        assert!(matches!(err, FolioError::Config(_)));
        assert!(!err.to_string().contains("hunter2"));
    }

    #[test]
    fn missing_or_blank_uri_yields_no_store() {
        assert!(open_store(&config(None)).unwrap().is_none());
        assert!(open_store(&config(Some("   "))).unwrap().is_none());
    }

    #[tokio::test]
    async fn open_store_builds_working_sqlite_backend() {
        let store = open_store(&config(Some("sqlite::memory:"))).unwrap().unwrap();
        assert_eq!(store.name(), "sqlite");
        store.initialize().await.unwrap();
        let mut conn = store.connect().await.unwrap();
        assert_eq!(conn.count().await.unwrap(), 0);
        conn.close().await.unwrap();
    }

    #[test]
    fn open_store_builds_mongo_backend_lazily() {
        let store = open_store(&config(Some("mongodb://localhost:27017")))
            .unwrap()
            .unwrap();
        assert_eq!(store.name(), "mongodb");
    }
}
