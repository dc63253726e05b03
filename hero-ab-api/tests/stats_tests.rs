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

//! Integration tests for the stats endpoint.


use std::sync::Arc;

use axum::http::{header, StatusCode};
use chrono::{DateTime, Duration, Utc};
use hero_ab_api::store::{EventStore, MemoryEventStore};
use hero_ab_types::{ErrorBody, StatsResponse, StatsTotals, Variant};
use serde_json::json;
use test_helpers::*;
use tower::ServiceExt;

async fn get_stats(app: axum::Router, uri: &str) -> StatsResponse {
    let resp = app.oneshot(bare("GET", uri)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    response_json(resp).await
}

// ── End to end ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_capture_then_stats_end_to_end() {
    let (_store, app) = memory_app();

    for body in [
        json!({"event": "hero_variant_view", "variant": "A"}),
        json!({"event": "hero_variant_view", "variant": "A"}),
        json!({"event": "hero_cta_click", "variant": "A", "cta": "book_call"}),
    ] {
        let resp = app.clone().oneshot(json_post("/events", &body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = app.oneshot(bare("GET", "/stats?days=1")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );

    let body: serde_json::Value = response_json(resp).await;
    assert_eq!(body["days"], 1);
    assert_eq!(body["totals"], json!({"rows": 3, "views": 2, "clicks": 1}));
    assert_eq!(
        body["variants"][0],
        json!({"variant": "A", "views": 2, "clicks": 1, "ctr": 0.5, "clicksByCta": {"book_call": 1}})
    );
    for i in 1..3 {
        assert_eq!(body["variants"][i]["views"], 0);
        assert_eq!(body["variants"][i]["clicks"], 0);
        assert_eq!(body["variants"][i]["ctr"], 0.0);
        assert_eq!(body["variants"][i]["clicksByCta"], json!({}));
    }
}

#[tokio::test]
async fn test_stats_lists_variants_in_fixed_order() {
    let (_store, app) = memory_app();
    let stats = get_stats(app, "/stats").await;
    let order: Vec<Variant> = stats.variants.iter().map(|v| v.variant).collect();
    assert_eq!(order, vec![Variant::A, Variant::B, Variant::C]);
    assert_eq!(stats.totals, StatsTotals::default());
}

#[tokio::test]
async fn test_stats_alias_route() {
    let (store, app) = memory_app();
    store.insert(view("B")).await.unwrap();
    let stats = get_stats(app, "/api/hero-ab-stats?days=3").await;
    assert_eq!(stats.days, 3);
    assert_eq!(stats.variants[1].views, 1);
}

// ── Window handling ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_stats_days_is_clamped() {
    let cases = [
        ("/stats?days=0", 1),
        ("/stats?days=-3", 1),
        ("/stats?days=200", 90),
        ("/stats?days=abc", 14),
        ("/stats?days=", 14),
        ("/stats", 14),
        ("/stats?days=45", 45),
    ];
    for (uri, expected) in cases {
        let (_store, app) = memory_app();
        let stats = get_stats(app, uri).await;
        assert_eq!(stats.days, expected, "{uri}");
    }
}

#[tokio::test]
async fn test_stats_since_matches_window() {
    let (_store, app) = memory_app();
    let before = Utc::now();
    let stats = get_stats(app, "/stats?days=7").await;
    let after = Utc::now();

    let since: DateTime<Utc> = stats.since.parse().expect("RFC 3339 since");
    assert!(since >= before - Duration::days(7) - Duration::milliseconds(1));
    assert!(since <= after - Duration::days(7));
}

#[tokio::test]
async fn test_stats_excludes_events_outside_window() {
    let (store, app) = memory_app();
    let now = Utc::now();
    store.insert_at(view("A"), now - Duration::days(10)).await;
    store.insert_at(view("A"), now - Duration::hours(2)).await;

    let recent = get_stats(app.clone(), "/stats?days=7").await;
    assert_eq!(recent.variants[0].views, 1);

    let wide = get_stats(app, "/stats?days=14").await;
    assert_eq!(wide.variants[0].views, 2);
}

// ── Aggregation rules ────────────────────────────────────────────────────

#[tokio::test]
async fn test_stats_ignores_unknown_variants() {
    let (store, app) = memory_app();
    store.insert(view("Z")).await.unwrap();
    store.insert(click("Z", Some("book_call"))).await.unwrap();
    store.insert(view("C")).await.unwrap();

    let stats = get_stats(app, "/stats").await;
    assert_eq!(
        stats.totals,
        StatsTotals {
            rows: 1,
            views: 1,
            clicks: 0
        }
    );
    assert!(stats.variants.iter().all(|v| v.clicks_by_cta.is_empty()));
}

#[tokio::test]
async fn test_stats_ctr_is_zero_without_views() {
    let (store, app) = memory_app();
    for _ in 0..3 {
        store.insert(click("B", None)).await.unwrap();
    }

    let stats = get_stats(app, "/stats").await;
    let b = &stats.variants[1];
    assert_eq!(b.clicks, 3);
    assert_eq!(b.views, 0);
    assert_eq!(b.ctr, 0.0);
    assert_eq!(b.clicks_by_cta.get("unknown"), Some(&3));
}

#[tokio::test]
async fn test_stats_is_idempotent() {
    let (store, app) = memory_app();
    store.insert(view("A")).await.unwrap();
    store.insert(click("A", Some("pricing"))).await.unwrap();
    store.insert(view("C")).await.unwrap();

    let first = get_stats(app.clone(), "/stats?days=2").await;
    let second = get_stats(app, "/stats?days=2").await;
    assert_eq!(first.days, second.days);
    assert_eq!(first.totals, second.totals);
    assert_eq!(first.variants, second.variants);
}

// ── Failure policy ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_stats_storage_failure_is_surfaced() {
    let store = MemoryEventStore::new();
    store.set_outage(Some("boom")).await;
    let app = build_app(Some(Arc::new(store)));

    let resp = app.oneshot(bare("GET", "/stats")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorBody = response_json(resp).await;
    assert!(!body.ok);
    assert_eq!(body.error, "storage unavailable: boom");
}

#[tokio::test]
async fn test_stats_without_storage_is_500() {
    let app = build_app(None);
    let resp = app.oneshot(bare("GET", "/stats")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorBody = response_json(resp).await;
    assert!(!body.ok);
    assert!(body.error.contains("not configured"));
}

#[tokio::test]
async fn test_stats_rejects_other_methods() {
    for method in ["POST", "PUT", "DELETE"] {
        let (_store, app) = memory_app();
        let resp = app.oneshot(bare(method, "/stats")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
    }
}

#[tokio::test]
async fn test_healthz_does_not_need_storage() {
    let app = build_app(None);
    let resp = app.oneshot(bare("GET", "/healthz")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(response_text(resp).await, "ok");
}
