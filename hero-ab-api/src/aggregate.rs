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

//! Single-pass summary of the event log over a lookback window.

use chrono::{DateTime, Duration, Utc};
use hero_ab_types::{
    requests::{DEFAULT_DAYS, MAX_DAYS, MIN_DAYS},
    EventKind, StatsTotals, Variant, VariantStats,
};

use crate::store::EventRow;

/// CTA label for clicks that did not say which button was pressed.
pub const UNKNOWN_CTA: &str = "unknown";

/// Per-variant counters plus their sums.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub totals: StatsTotals,
    /// Always `A, B, C`.
    pub variants: Vec<VariantStats>,
}

/// Resolve the raw `days` query value into a window length.
///
/// Absent or non-numeric values fall back to 14. Decimals are truncated.
/// Everything is clamped into `[1, 90]`.
pub fn resolve_days(raw: Option<&str>) -> i64 {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return DEFAULT_DAYS;
    };
    let parsed = raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|d| d.is_finite())
            .map(|d| d.trunc() as i64)
    });
    match parsed {
        Some(days) => days.clamp(MIN_DAYS, MAX_DAYS),
        None => DEFAULT_DAYS,
    }
}

/// Start of a `days`-long window ending at `now`.
pub fn window_start(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now - Duration::hours(days * 24)
}

/// Click-through rate; zero when there were no views.
pub fn ctr(clicks: u64, views: u64) -> f64 {
    if views == 0 {
        0.0
    } else {
        clicks as f64 / views as f64
    }
}

/// Count views and clicks per variant.
///
/// Rows whose variant is outside `{A,B,C}` are skipped entirely. Rows with a
/// known variant but an unknown event kind count towards `totals.rows` only.
pub fn aggregate(rows: &[EventRow]) -> Summary {
    let mut buckets = Variant::ALL.map(VariantStats::empty);
    let mut counted = 0u64;

    for row in rows {
        let Some(variant) = row.variant.as_deref().and_then(Variant::parse) else {
            continue;
        };
        counted += 1;

        let bucket = &mut buckets[variant.index()];
        match row.event.as_deref().and_then(EventKind::parse) {
            Some(EventKind::VariantView) => bucket.views += 1,
            Some(EventKind::CtaClick) => {
                bucket.clicks += 1;
                let cta = row
                    .cta
                    .as_deref()
                    .filter(|c| !c.is_empty())
                    .unwrap_or(UNKNOWN_CTA);
                *bucket.clicks_by_cta.entry(cta.to_string()).or_insert(0) += 1;
            }
            None => {}
        }
    }

    let mut totals = StatsTotals {
        rows: counted,
        ..Default::default()
    };
    for bucket in &mut buckets {
        bucket.ctr = ctr(bucket.clicks, bucket.views);
        totals.views += bucket.views;
        totals.clicks += bucket.clicks;
    }

    Summary {
        totals,
        variants: buckets.into_iter().collect(),
    }
}
