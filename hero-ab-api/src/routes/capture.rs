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

//! Handler for the event capture endpoint.

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderMap, Method},
    response::Response,
};
use hero_ab_types::CaptureRequest;
use http_body_util::{BodyExt, Limited};
use serde_json::{json, Value};

use crate::error::EndpointError;
use crate::policy::plain_ok;
use crate::state::AppState;
use crate::store::NewEvent;

/// Largest capture body read into memory. Anything bigger is dropped.
pub const MAX_CAPTURE_BODY: usize = 2 * 1024 * 1024;

/// POST /events
///
/// Answers `200 "ok"` on every path except a wrong method; see
/// [`FailureVisibility::Silent`](crate::policy::FailureVisibility::Silent).
pub async fn capture_event(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Body,
) -> Response {
    match record(&state, &method, &headers, body).await {
        Ok(()) => plain_ok(),
        Err(err) => state.capture_failures.render("capture", err),
    }
}

async fn record(
    state: &AppState,
    method: &Method,
    headers: &HeaderMap,
    body: Body,
) -> Result<(), EndpointError> {
    if *method != Method::POST {
        return Err(EndpointError::MethodNotAllowed(method.clone()));
    }

    let body = read_body(body).await?;
    let payload = parse_payload(headers, &body)?;
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let event = NewEvent::from_request(allow_listed(&payload), user_agent);

    tracing::info!(
        event = ?event.event,
        variant = ?event.variant,
        cta = ?event.cta,
        path = ?event.path,
        session_id = ?event.session_id,
        "hero ab event"
    );

    let store = state.store.as_ref().ok_or_else(EndpointError::not_configured)?;
    store.insert(event).await?;
    Ok(())
}

/// Collect at most [`MAX_CAPTURE_BODY`] bytes. The router's own body limit
/// does not apply to a raw `Body`, so an oversized request lands here.
async fn read_body(body: Body) -> Result<Bytes, EndpointError> {
    Limited::new(body, MAX_CAPTURE_BODY)
        .collect()
        .await
        .map(|collected| collected.to_bytes())
        .map_err(|err| EndpointError::Body(err.to_string()))
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
        .unwrap_or(false)
}

/// JSON bodies are parsed; anything else is wrapped as `{"raw": "<body>"}`.
/// An empty JSON body is treated as `null`.
fn parse_payload(headers: &HeaderMap, body: &[u8]) -> Result<Value, EndpointError> {
    if !is_json(headers) {
        return Ok(json!({ "raw": String::from_utf8_lossy(body) }));
    }
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(body)?)
}

/// Keep only the allow-listed string fields of `payload`.
fn allow_listed(payload: &Value) -> CaptureRequest {
    let field = |key: &str| payload.get(key).and_then(Value::as_str).map(str::to_string);
    CaptureRequest {
        event: field("event"),
        variant: field("variant"),
        cta: field("cta"),
        path: field("path"),
        referrer: field("ref"),
        session_id: field("sessionId").or_else(|| field("session_id")),
    }
}
