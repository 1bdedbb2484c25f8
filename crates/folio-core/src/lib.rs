// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Folio contact service.
//!
//! Holds the submission data model, the pure submission validator, the error
//! taxonomy, and the store traits implemented by `folio-storage`.

pub mod error;
pub mod traits;
pub mod types;
pub mod validation;

pub use error::{ErrorKind, FolioError};
pub use traits::{PluginAdapter, StoreConnection, SubmissionStore};
pub use types::{
    HealthStatus, NewSubmission, RequestMeta, StoredSubmission, SubmissionId, SubmissionPage,
    SubmissionRecord, SubmissionRequest, SubmissionStatus,
};
pub use validation::{ValidatedSubmission, ValidationError, validate};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_traits_are_object_safe() {
        fn _assert_store(_: &dyn SubmissionStore) {}
        fn _assert_connection(_: Box<dyn StoreConnection>) {}
    }

    #[test]
    fn health_status_variants() {
        let unhealthy = HealthStatus::Unhealthy("down".into());

        assert_eq!(HealthStatus::Healthy, HealthStatus::Healthy);
        assert_ne!(unhealthy, HealthStatus::Healthy);
        assert_ne!(unhealthy, HealthStatus::Unhealthy("timeout".into()));
    }
}
