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

//! Tests for the PostgREST-backed store against an in-process fake.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{Duration, TimeZone, Utc};
use hero_ab_api::store::{EventStore, NewEvent, RestEventStore, StoreError};
use serde_json::{json, Value};
use tokio::sync::Mutex;

#[derive(Clone, Default)]
struct FakePostgrest {
    inserted: Arc<Mutex<Vec<(HeaderMap, Value)>>>,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    fail_with: Option<StatusCode>,
}

async fn fake_insert(
    State(fake): State<FakePostgrest>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    if let Some(status) = fake.fail_with {
        return (status, "permission denied for table hero_ab_events").into_response();
    }
    fake.inserted.lock().await.push((headers, body));
    StatusCode::CREATED.into_response()
}

async fn fake_select(
    State(fake): State<FakePostgrest>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    if let Some(status) = fake.fail_with {
        return (status, "relation does not exist").into_response();
    }
    fake.queries.lock().await.push(params);
    Json(json!([
        {"event": "hero_variant_view", "variant": "A", "cta": null,
         "created_at": "2025-03-01T10:00:00.123456+00:00"},
        {"event": "hero_cta_click", "variant": "A", "cta": "book_call",
         "created_at": "2025-03-01T10:05:00+00:00"}
    ]))
    .into_response()
}

async fn spawn_fake(fake: FakePostgrest) -> String {
    let app = Router::new()
        .route(
            "/rest/v1/hero_ab_events",
            get(fake_select).post(fake_insert),
        )
        .with_state(fake);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_insert_posts_row_with_service_key() {
    let fake = FakePostgrest::default();
    let base_url = spawn_fake(fake.clone()).await;
    let store = RestEventStore::new(&base_url, "service-key", "hero_ab_events");

    store
        .insert(NewEvent {
            event: Some("hero_cta_click".to_string()),
            variant: Some("C".to_string()),
            cta: Some("book_call".to_string()),
            session_id: Some("s-7".to_string()),
            ..Default::default()
        })
        .await
        .expect("insert succeeds");

    let inserted = fake.inserted.lock().await;
    assert_eq!(inserted.len(), 1);
    let (headers, body) = &inserted[0];
    assert_eq!(headers.get("apikey").unwrap(), "service-key");
    assert_eq!(
        headers.get("authorization").unwrap(),
        "Bearer service-key"
    );
    assert_eq!(headers.get("prefer").unwrap(), "return=minimal");
    assert_eq!(body["variant"], "C");
    assert_eq!(body["session_id"], "s-7");
    assert_eq!(body["ref"], Value::Null);
}

#[tokio::test]
async fn test_select_since_sends_projection_and_filter() {
    let fake = FakePostgrest::default();
    let base_url = spawn_fake(fake.clone()).await;
    let store = RestEventStore::new(&base_url, "service-key", "hero_ab_events");

    let since = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
    let rows = store.select_since(since).await.expect("select succeeds");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].cta.as_deref(), Some("book_call"));
    assert_eq!(
        rows[1].created_at,
        since + Duration::hours(10) + Duration::minutes(5)
    );

    let queries = fake.queries.lock().await;
    assert_eq!(queries[0]["select"], "event,variant,cta,created_at");
    assert_eq!(queries[0]["created_at"], "gte.2025-03-01T00:00:00.000Z");
}

#[tokio::test]
async fn test_non_success_status_is_reported() {
    let fake = FakePostgrest {
        fail_with: Some(StatusCode::UNAUTHORIZED),
        ..Default::default()
    };
    let base_url = spawn_fake(fake).await;
    let store = RestEventStore::new(&base_url, "wrong-key", "hero_ab_events");

    let err = store.select_since(Utc::now()).await.unwrap_err();
    match err {
        StoreError::Status { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "relation does not exist");
        }
        other => panic!("expected status error, got {other:?}"),
    }

    let err = store.insert(NewEvent::default()).await.unwrap_err();
    assert!(matches!(err, StoreError::Status { status: 401, .. }));
}

#[tokio::test]
async fn test_unreachable_store_is_http_error() {
    // Bind then drop to get a port nobody listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let store = RestEventStore::new(&format!("http://{addr}"), "key", "hero_ab_events");
    let err = store.select_since(Utc::now()).await.unwrap_err();
    assert!(matches!(err, StoreError::Http(_)));
}
