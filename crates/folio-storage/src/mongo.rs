// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! MongoDB implementation of the SubmissionStore trait.
//!
//! One [`mongodb::Client`] is built on first use and shared by every lease.
//! The driver pools sockets internally, so a lease is a handle onto the
//! `contact_submissions` collection plus lease accounting.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, doc};
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Collection, IndexModel};
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use folio_core::types::{SUBMISSIONS_COLLECTION, UNKNOWN};
use folio_core::{
    FolioError, HealthStatus, NewSubmission, PluginAdapter, StoreConnection, StoredSubmission,
    SubmissionId, SubmissionRecord, SubmissionStore,
};

use crate::lease::Lease;

/// Document shape of a submission inside MongoDB.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    email: String,
    subject: String,
    message: String,
    submitted_at: bson::DateTime,
    #[serde(default = "unknown")]
    ip_address: String,
    #[serde(default = "unknown")]
    user_agent: String,
    #[serde(default = "default_status")]
    status: String,
}

fn unknown() -> String {
    UNKNOWN.to_string()
}

fn default_status() -> String {
    "new".to_string()
}

impl SubmissionDocument {
    fn from_new(submission: &NewSubmission) -> Self {
        let record = submission.to_record();
        Self {
            id: None,
            name: record.name,
            email: record.email,
            subject: record.subject,
            message: record.message,
            submitted_at: bson::DateTime::from_millis(record.submitted_at.timestamp_millis()),
            ip_address: record.ip_address,
            user_agent: record.user_agent,
            status: record.status,
        }
    }

    fn into_stored(self) -> Result<StoredSubmission, FolioError> {
        let id = self
            .id
            .ok_or_else(|| FolioError::Internal("stored document has no _id".into()))?;
        let submitted_at =
            DateTime::<Utc>::from_timestamp_millis(self.submitted_at.timestamp_millis())
                .ok_or_else(|| FolioError::Internal("submittedAt out of range".into()))?;
        Ok(StoredSubmission {
            id: SubmissionId(id.to_hex()),
            record: SubmissionRecord {
                name: self.name,
                email: self.email,
                subject: self.subject,
                message: self.message,
                submitted_at,
                ip_address: self.ip_address,
                user_agent: self.user_agent,
                status: self.status,
            },
        })
    }
}

/// MongoDB-backed submission store.
pub struct MongoStore {
    uri: String,
    database: String,
    timeout: Duration,
    client: OnceCell<Client>,
}

impl MongoStore {
    /// The client is not built until the first lease or health check.
    pub fn new(uri: impl Into<String>, database: impl Into<String>, timeout: Duration) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            timeout,
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> Result<&Client, FolioError> {
        self.client.get_or_try_init(|| self.build_client()).await
    }

    async fn build_client(&self) -> Result<Client, FolioError> {
        let mut options = ClientOptions::parse(&self.uri)
            .await
            .map_err(FolioError::database)?;
        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );
        options.app_name = Some("folio".to_string());
        options.server_selection_timeout = Some(self.timeout);
        options.connect_timeout = Some(self.timeout);

        let client = Client::with_options(options).map_err(FolioError::database)?;
        info!(database = %self.database, "MongoDB client created");
        Ok(client)
    }

    async fn collection(&self) -> Result<Collection<SubmissionDocument>, FolioError> {
        Ok(self
            .client()
            .await?
            .database(&self.database)
            .collection(SUBMISSIONS_COLLECTION))
    }
}

#[async_trait]
impl PluginAdapter for MongoStore {
    fn name(&self) -> &str {
        "mongodb"
    }

    async fn health_check(&self) -> Result<HealthStatus, FolioError> {
        let client = match self.client().await {
            Ok(client) => client,
            Err(e) => return Ok(HealthStatus::Unhealthy(e.to_string())),
        };
        match client.database("admin").run_command(doc! { "ping": 1 }).await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }

    async fn shutdown(&self) -> Result<(), FolioError> {
        if let Some(client) = self.client.get() {
            client.clone().shutdown().await;
            debug!("MongoDB client shut down");
        }
        Ok(())
    }
}

#[async_trait]
impl SubmissionStore for MongoStore {
    async fn initialize(&self) -> Result<(), FolioError> {
        // Building the client may resolve SRV records; outages surface per request.
        debug!(database = %self.database, "MongoDB store registered");
        Ok(())
    }

    async fn ensure_indexes(&self) -> Result<(), FolioError> {
        let indexes = [
            IndexModel::builder().keys(doc! { "submittedAt": -1 }).build(),
            IndexModel::builder().keys(doc! { "email": 1 }).build(),
            IndexModel::builder().keys(doc! { "status": 1 }).build(),
        ];
        self.collection()
            .await?
            .create_indexes(indexes)
            .await
            .map_err(FolioError::database)?;
        info!("submission indexes ensured");
        Ok(())
    }

    async fn connect(&self) -> Result<Box<dyn StoreConnection>, FolioError> {
        let collection = self.collection().await?;
        Ok(Box::new(MongoConnection {
            collection,
            _lease: Lease::acquire("mongodb"),
        }))
    }
}

/// A leased handle onto the submissions collection.
pub struct MongoConnection {
    collection: Collection<SubmissionDocument>,
    _lease: Lease,
}

#[async_trait]
impl StoreConnection for MongoConnection {
    async fn insert(&mut self, submission: &NewSubmission) -> Result<SubmissionId, FolioError> {
        let result = self
            .collection
            .insert_one(SubmissionDocument::from_new(submission))
            .await
            .map_err(FolioError::database)?;
        let id = match result.inserted_id.as_object_id() {
            Some(oid) => oid.to_hex(),
            None => result.inserted_id.to_string(),
        };
        Ok(SubmissionId(id))
    }

    async fn find_page(
        &mut self,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<StoredSubmission>, FolioError> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "submittedAt": -1, "_id": -1 })
            .skip(skip)
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .await
            .map_err(FolioError::database)?;
        let docs: Vec<SubmissionDocument> =
            cursor.try_collect().await.map_err(FolioError::database)?;
        docs.into_iter().map(SubmissionDocument::into_stored).collect()
    }

    async fn count(&mut self) -> Result<u64, FolioError> {
        self.collection
            .count_documents(doc! {})
            .await
            .map_err(FolioError::database)
    }

    async fn close(self: Box<Self>) -> Result<(), FolioError> {
        Ok(())
    }
}
