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

//! Per-endpoint failure visibility.
//!
//! The capture endpoint is a telemetry sink called by beacons that retry on
//! any non-2xx, so it runs [`FailureVisibility::Silent`]: errors are logged
//! and the caller still gets `200 "ok"`. The stats endpoint is read by
//! operators and runs [`FailureVisibility::Surfaced`]. A wrong HTTP verb is
//! answered with 405 under both policies.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use hero_ab_types::{responses::CAPTURE_OK, ErrorBody};

use crate::error::EndpointError;

/// Whether an endpoint shows its failures to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureVisibility {
    /// Log the failure and answer `200 "ok"`.
    Silent,
    /// Answer with the error status and `{ ok: false, error }`.
    Surfaced,
}

impl FailureVisibility {
    /// Turn `err` into the response this policy prescribes, logging it on the way.
    pub fn render(self, endpoint: &'static str, err: EndpointError) -> Response {
        if let EndpointError::MethodNotAllowed(ref method) = err {
            tracing::debug!(endpoint, %method, "rejected request method");
            return method_not_allowed();
        }

        match self {
            FailureVisibility::Silent => {
                match &err {
                    EndpointError::Configuration(_) => {
                        tracing::info!(endpoint, kind = err.kind(), "{err}; event discarded")
                    }
                    EndpointError::Parse(_) | EndpointError::Body(_) => {
                        tracing::warn!(endpoint, kind = err.kind(), "{err}; event dropped")
                    }
                    _ => tracing::error!(endpoint, kind = err.kind(), "{err}; event dropped"),
                }
                plain_ok()
            }
            FailureVisibility::Surfaced => {
                tracing::error!(endpoint, kind = err.kind(), "{err}");
                let body = ErrorBody::new(err.to_string());
                (
                    err.status(),
                    [(header::CACHE_CONTROL, "no-store")],
                    Json(body),
                )
                    .into_response()
            }
        }
    }
}

/// `200 "ok"`, the capture endpoint's only success answer.
pub fn plain_ok() -> Response {
    (StatusCode::OK, CAPTURE_OK).into_response()
}

fn method_not_allowed() -> Response {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").into_response()
}
