// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Listing query parameters and page arithmetic.

use serde::Deserialize;

use folio_config::model::ListingConfig;

/// Raw `limit`/`skip` query parameters.
///
/// Kept as strings so that garbage input falls back to defaults instead of
/// rejecting the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub skip: Option<String>,
}

impl PageQuery {
    pub fn new(limit: Option<&str>, skip: Option<&str>) -> Self {
        Self {
            limit: limit.map(str::to_string),
            skip: skip.map(str::to_string),
        }
    }
}

/// A resolved offset/limit pair. `limit` is always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: u64,
    pub limit: u64,
}

impl PageWindow {
    /// Resolves raw parameters against the listing configuration.
    ///
    /// A missing, unparsable or non-positive `limit` becomes
    /// `default_limit`; `max_limit`, when configured, caps it. A missing,
    /// unparsable or negative `skip` becomes 0. Numbers are read from their
    /// leading digits, so `"25abc"` reads as 25.
    pub fn resolve(query: &PageQuery, listing: &ListingConfig) -> Self {
        let default_limit = listing.default_limit.max(1);
        let mut limit = query
            .limit
            .as_deref()
            .and_then(leading_int)
            .filter(|n| *n > 0)
            .map_or(default_limit, |n| n.unsigned_abs());
        if let Some(max) = listing.max_limit {
            limit = limit.min(max.max(1));
        }

        let skip = query
            .skip
            .as_deref()
            .and_then(leading_int)
            .filter(|n| *n >= 0)
            .map_or(0, |n| n.unsigned_abs());

        Self { skip, limit }
    }

    /// One-based page number containing `skip`.
    pub fn page(&self) -> u64 {
        self.skip / self.limit + 1
    }

    /// Number of pages needed for `total` records.
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }
}

/// Parses an optional sign followed by leading ASCII digits, ignoring the rest.
fn leading_int(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Saturate absurdly long inputs instead of failing.
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(max_limit: Option<u64>) -> ListingConfig {
        ListingConfig {
            default_limit: 10,
            max_limit,
        }
    }

    fn resolve(limit: Option<&str>, skip: Option<&str>) -> PageWindow {
        PageWindow::resolve(&PageQuery::new(limit, skip), &listing(None))
    }

    #[test]
    fn defaults_apply_when_absent() {
        assert_eq!(resolve(None, None), PageWindow { skip: 0, limit: 10 });
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        assert_eq!(
            resolve(Some("ten"), Some("later")),
            PageWindow { skip: 0, limit: 10 }
        );
        assert_eq!(resolve(Some(""), Some("")), PageWindow { skip: 0, limit: 10 });
    }

    #[test]
    fn leading_digits_are_honoured() {
        assert_eq!(
            resolve(Some("25abc"), Some(" 5.9")),
            PageWindow { skip: 5, limit: 25 }
        );
    }

    #[test]
    fn non_positive_limit_and_negative_skip_are_replaced() {
        assert_eq!(
            resolve(Some("0"), Some("-3")),
            PageWindow { skip: 0, limit: 10 }
        );
        assert_eq!(resolve(Some("-5"), None).limit, 10);
    }

    #[test]
    fn limit_is_unbounded_unless_capped() {
        assert_eq!(resolve(Some("5000"), None).limit, 5000);
        let capped = PageWindow::resolve(&PageQuery::new(Some("5000"), None), &listing(Some(100)));
        assert_eq!(capped.limit, 100);
    }

    #[test]
    fn huge_numbers_saturate() {
        let window = resolve(Some("99999999999999999999999"), None);
        assert_eq!(window.limit, i64::MAX as u64);
    }

    #[test]
    fn page_arithmetic() {
        let first = PageWindow { skip: 0, limit: 10 };
        let second = PageWindow { skip: 10, limit: 10 };
        let odd = PageWindow { skip: 15, limit: 10 };
        assert_eq!(first.page(), 1);
        assert_eq!(second.page(), 2);
        assert_eq!(odd.page(), 2);
        assert_eq!(first.total_pages(15), 2);
        assert_eq!(first.total_pages(20), 2);
        assert_eq!(first.total_pages(0), 0);
        assert_eq!(first.total_pages(1), 1);
    }
}
