/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Response types for the hero A/B analytics API.
//!
//! `POST /events` always answers with the plain-text body [`CAPTURE_OK`].
//! `GET /stats` answers with [`StatsResponse`] or, on failure, with
//! [`crate::ErrorBody`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::variant::Variant;

/// Body returned by the capture endpoint on every non-405 path.
pub const CAPTURE_OK: &str = "ok";

/// Response payload for `GET /stats`.
///
/// # Example
///
/// ```json
/// {
///   "days": 14,
///   "since": "2025-01-01T00:00:00Z",
///   "totals": { "rows": 3, "views": 2, "clicks": 1 },
///   "variants": [
///     { "variant": "A", "views": 2, "clicks": 1, "ctr": 0.5, "clicksByCta": { "book_call": 1 } },
///     { "variant": "B", "views": 0, "clicks": 0, "ctr": 0.0, "clicksByCta": {} },
///     { "variant": "C", "views": 0, "clicks": 0, "ctr": 0.0, "clicksByCta": {} }
///   ]
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StatsResponse {
    /// Lookback window after clamping.
    pub days: i64,
    /// Start of the window, RFC 3339 in UTC.
    pub since: String,
    pub totals: StatsTotals,
    /// One entry per arm, always in `A, B, C` order.
    pub variants: Vec<VariantStats>,
}

/// Sums across all variants in the window.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct StatsTotals {
    /// Records attributed to a known variant.
    pub rows: u64,
    pub views: u64,
    pub clicks: u64,
}

/// Per-arm counters.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VariantStats {
    pub variant: Variant,
    pub views: u64,
    pub clicks: u64,
    /// `clicks / views`, or `0` when there were no views.
    pub ctr: f64,
    /// Click counts keyed by CTA name; clicks without a CTA land on `"unknown"`.
    #[serde(rename = "clicksByCta")]
    pub clicks_by_cta: BTreeMap<String, u64>,
}

impl VariantStats {
    pub fn empty(variant: Variant) -> Self {
        Self {
            variant,
            views: 0,
            clicks: 0,
            ctr: 0.0,
            clicks_by_cta: BTreeMap::new(),
        }
    }
}
