// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Folio integration tests.
//!
//! Provides a mock store and a test harness for fast, deterministic tests
//! without an external database.
//!
//! # Components
//!
//! - [`MockStore`] - In-memory store with lease accounting and fault injection
//! - [`TestHarness`] - Full HTTP router over a mock, SQLite, or absent store

pub mod harness;
pub mod mock_store;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_store::{Fault, MockStore};
