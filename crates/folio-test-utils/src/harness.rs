// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end HTTP testing.
//!
//! `TestHarness` assembles the router, gateway and a store, and drives
//! requests through the router in-process.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use folio_config::model::ListingConfig;
use folio_contact::SubmissionGateway;
use folio_core::{FolioError, SubmissionStore};
use folio_gateway::{AppState, HealthState, build_router};
use folio_storage::SqliteStore;

use crate::mock_store::MockStore;

enum StoreChoice {
    Mock(MockStore),
    Sqlite,
    Unconfigured,
}

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    store: StoreChoice,
    listing: ListingConfig,
    timeout: Duration,
    allowed_origins: Vec<String>,
    prometheus_render: Option<Arc<dyn Fn() -> String + Send + Sync>>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            store: StoreChoice::Mock(MockStore::new()),
            listing: ListingConfig::default(),
            timeout: Duration::from_secs(5),
            allowed_origins: Vec::new(),
            prometheus_render: None,
        }
    }

    /// Use the given mock store (the default is a fresh one).
    pub fn with_mock_store(mut self, store: MockStore) -> Self {
        self.store = StoreChoice::Mock(store);
        self
    }

    /// Use a real SQLite store in a temp directory.
    pub fn with_sqlite(mut self) -> Self {
        self.store = StoreChoice::Sqlite;
        self
    }

    /// Run without any store, as if no storage URI were configured.
    pub fn unconfigured(mut self) -> Self {
        self.store = StoreChoice::Unconfigured;
        self
    }

    pub fn with_listing(mut self, listing: ListingConfig) -> Self {
        self.listing = listing;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = origins;
        self
    }

    pub fn with_prometheus_render(mut self, render: Arc<dyn Fn() -> String + Send + Sync>) -> Self {
        self.prometheus_render = Some(render);
        self
    }

    /// Build the test harness, initializing the chosen store.
    pub async fn build(self) -> Result<TestHarness, FolioError> {
        let mut temp_dir = None;
        let mut mock = None;
        let store: Option<Arc<dyn SubmissionStore>> = match self.store {
            StoreChoice::Mock(store) => {
                let dyn_store = store.as_dyn();
                mock = Some(store);
                Some(dyn_store)
            }
            StoreChoice::Sqlite => {
                let dir = tempfile::TempDir::new().map_err(FolioError::database)?;
                let path = dir.path().join("folio-test.db");
                let store = SqliteStore::new(folio_storage::SqliteLocation::File(
                    path.to_string_lossy().into_owned(),
                ));
                store.initialize().await?;
                temp_dir = Some(dir);
                Some(Arc::new(store))
            }
            StoreChoice::Unconfigured => None,
        };

        let gateway = SubmissionGateway::new(store, self.timeout, self.listing);
        let state = AppState {
            gateway: gateway.clone(),
            health: HealthState::new(self.prometheus_render),
            database: "portfolio".to_string(),
        };
        let router = build_router(state, &self.allowed_origins);

        Ok(TestHarness {
            router,
            gateway,
            mock,
            _temp_dir: temp_dir,
        })
    }
}

/// A fully assembled HTTP stack for integration tests.
pub struct TestHarness {
    router: Router,
    gateway: SubmissionGateway,
    mock: Option<MockStore>,
    _temp_dir: Option<tempfile::TempDir>,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Harness over a fresh mock store.
    pub async fn new() -> Result<Self, FolioError> {
        Self::builder().build().await
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn gateway(&self) -> &SubmissionGateway {
        &self.gateway
    }

    /// The mock store, when the harness was built over one.
    pub fn mock(&self) -> Option<&MockStore> {
        self.mock.as_ref()
    }

    /// Sends a request through the router and decodes the JSON body.
    ///
    /// Non-JSON bodies decode to `Value::Null`.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self
            .router()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.send(
            Request::get(uri)
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
    }

    pub async fn post_json(
        &self,
        uri: &str,
        body: &serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        self.post_raw(uri, body.to_string()).await
    }

    /// POSTs an arbitrary string labelled as JSON.
    pub async fn post_raw(&self, uri: &str, body: String) -> (StatusCode, serde_json::Value) {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .expect("valid request"),
        )
        .await
    }
}
