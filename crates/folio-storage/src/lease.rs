// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connection lease accounting.

use tracing::trace;

/// Held by every leased connection. Dropping it, on any path, marks the lease released.
#[derive(Debug)]
pub(crate) struct Lease {
    backend: &'static str,
}

impl Lease {
    pub(crate) fn acquire(backend: &'static str) -> Self {
        folio_prometheus::connection_leased();
        trace!(backend, "store connection leased");
        Self { backend }
    }
}

impl Drop for Lease {
    fn drop(&mut self) {
        folio_prometheus::connection_released();
        trace!(backend = self.backend, "store connection released");
    }
}
