// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `folio db` commands: index setup, sample data, and a write/read check.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use folio_config::model::FolioConfig;
use folio_contact::{PageQuery, SubmissionGateway};
use folio_core::types::SUBMISSIONS_COLLECTION;
use folio_core::{
    FolioError, NewSubmission, RequestMeta, SubmissionRequest, SubmissionStatus, SubmissionStore,
    validate,
};
use tracing::{info, warn};

use crate::serve::open_initialized_store;

/// Runs `folio db setup`.
pub async fn run_setup(config: &FolioConfig, with_samples: bool) -> Result<(), FolioError> {
    let store = require_store(config).await?;
    let gateway = SubmissionGateway::from_config(Some(Arc::clone(&store)), config);

    let result = async {
        store.ensure_indexes().await?;
        println!("Indexes ensured on {SUBMISSIONS_COLLECTION} (submittedAt desc, email, status)");

        if with_samples {
            for sample in sample_submissions(Utc::now())? {
                let id = gateway.insert(&sample).await?;
                println!("Inserted sample from {} ({id})", sample.name());
            }
        }

        let total = gateway.count().await?;
        println!("Total submissions: {total}");
        Ok::<(), FolioError>(())
    }
    .await;

    close(store).await;
    result
}

/// Runs `folio db check`.
pub async fn run_check(config: &FolioConfig) -> Result<(), FolioError> {
    let store = require_store(config).await?;
    let gateway = SubmissionGateway::from_config(Some(Arc::clone(&store)), config);

    let result = async {
        let probe = probe_submission(Utc::now())?;
        let id = gateway.insert(&probe).await?;
        println!("Inserted diagnostic submission {id}");

        let page = gateway.list(&PageQuery::new(Some("5"), None)).await?;
        println!("Total submissions: {}", page.total);
        for stored in &page.messages {
            let record = &stored.record;
            println!(
                "  {} {} <{}> [{}] {}",
                record.submitted_at.to_rfc3339(),
                record.name,
                record.email,
                record.status,
                record.subject
            );
        }
        Ok::<(), FolioError>(())
    }
    .await;

    close(store).await;
    result
}

async fn require_store(config: &FolioConfig) -> Result<Arc<dyn SubmissionStore>, FolioError> {
    open_initialized_store(config).await?.ok_or_else(|| {
        FolioError::ConfigurationMissing(
            "set storage.uri, FOLIO_STORAGE_URI or MONGODB_URI".to_string(),
        )
    })
}

async fn close(store: Arc<dyn SubmissionStore>) {
    if let Err(e) = store.shutdown().await {
        warn!(error = %e, "store shutdown failed");
    }
}

fn build(
    name: &str,
    email: &str,
    subject: &str,
    message: &str,
    meta: RequestMeta,
    at: DateTime<Utc>,
) -> Result<NewSubmission, FolioError> {
    let request = SubmissionRequest {
        name: Some(name.to_string()),
        email: Some(email.to_string()),
        subject: Some(subject.to_string()),
        message: Some(message.to_string()),
    };
    Ok(NewSubmission::from_validated(validate(&request)?, meta, at))
}

fn meta(ip: &str, user_agent: &str) -> RequestMeta {
    RequestMeta {
        ip_address: Some(ip.to_string()),
        user_agent: Some(user_agent.to_string()),
    }
}

/// Three demo submissions stamped now, two hours ago and a day ago.
fn sample_submissions(now: DateTime<Utc>) -> Result<Vec<NewSubmission>, FolioError> {
    Ok(vec![
        build(
            "John Doe",
            "john.doe@example.com",
            "Website Development Inquiry",
            "I came across your portfolio and would like to discuss a web development project. Could we schedule a call?",
            meta("192.168.1.100", "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"),
            now,
        )?,
        build(
            "Sarah Johnson",
            "sarah.j@company.com",
            "Collaboration Opportunity",
            "Our startup is looking for a React developer and your work fits. Would you be open to a freelance engagement?",
            meta("10.0.0.50", "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36"),
            now - Duration::hours(2),
        )?,
        build(
            "Tech Recruiter",
            "recruiter@techcorp.com",
            "Full-time Position Available",
            "We have a full-time React/Node.js role with remote options that matches your skills. Interested in hearing more?",
            meta("172.16.0.10", "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36"),
            now - Duration::hours(24),
        )?,
    ])
}

/// The diagnostic record written by `folio db check`.
fn probe_submission(now: DateTime<Utc>) -> Result<NewSubmission, FolioError> {
    let submission = build(
        "Folio Check",
        "check@folio.invalid",
        "Store connectivity check",
        "Written by `folio db check`. Safe to delete.",
        meta("127.0.0.1", concat!("folio-db-check/", env!("CARGO_PKG_VERSION"))),
        now,
    )?;
    info!("writing diagnostic submission");
    Ok(submission.with_status(SubmissionStatus::Test))
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_config::model::StorageConfig;

    fn sqlite_config(dir: &tempfile::TempDir) -> FolioConfig {
        let path = dir.path().join("folio.db");
        FolioConfig {
            storage: StorageConfig {
                uri: Some(format!("sqlite://{}", path.display())),
                ..StorageConfig::default()
            },
            ..FolioConfig::default()
        }
    }

    #[test]
    fn samples_are_staggered_newest_first() {
        let now = Utc::now();
        let samples = sample_submissions(now).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].submitted_at(), now);
        assert_eq!(samples[1].submitted_at(), now - Duration::hours(2));
        assert_eq!(samples[2].submitted_at(), now - Duration::hours(24));
        assert!(samples.iter().all(|s| s.status() == SubmissionStatus::New));
    }

    #[test]
    fn probe_is_marked_as_test() {
        let probe = probe_submission(Utc::now()).unwrap();
        assert_eq!(probe.status(), SubmissionStatus::Test);
        assert_eq!(probe.to_record().status, "test");
    }

    #[tokio::test]
    async fn commands_require_a_store() {
        let config = FolioConfig::default();
        let err = run_setup(&config, false).await.unwrap_err();
        assert!(matches!(err, FolioError::ConfigurationMissing(_)));
        let err = run_check(&config).await.unwrap_err();
        assert!(matches!(err, FolioError::ConfigurationMissing(_)));
    }

    #[tokio::test]
    async fn setup_then_check_against_sqlite() {
        let dir = tempfile::tempdir().unwrap();
        let config = sqlite_config(&dir);

        run_setup(&config, true).await.unwrap();
        run_check(&config).await.unwrap();

        let store = open_initialized_store(&config).await.unwrap().unwrap();
        let gateway = SubmissionGateway::from_config(Some(Arc::clone(&store)), &config);
        let page = gateway.list(&PageQuery::default()).await.unwrap();
        assert_eq!(page.total, 4);
        assert_eq!(page.messages[0].record.status, "test");
        assert_eq!(
            page.messages
                .iter()
                .filter(|m| m.record.status == "new")
                .count(),
            3
        );
    }
}
