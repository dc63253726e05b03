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

//! Endpoint error taxonomy.
//!
//! Handlers never turn these into responses themselves; they hand them to the
//! endpoint's [`FailureVisibility`](crate::policy::FailureVisibility), which
//! decides whether the caller sees them.

use axum::http::{Method, StatusCode};
use thiserror::Error;

use crate::store::StoreError;

/// Everything that can go wrong while serving a capture or stats request.
#[derive(Debug, Error)]
pub enum EndpointError {
    /// The endpoint was called with the wrong HTTP verb.
    #[error("method {0} not allowed")]
    MethodNotAllowed(Method),

    /// The body could not be read, or was larger than the capture limit.
    #[error("unreadable request body: {0}")]
    Body(String),

    /// The body claimed to be JSON but did not parse.
    #[error("invalid JSON body: {0}")]
    Parse(#[from] serde_json::Error),

    /// No storage collaborator is configured.
    #[error("storage is not configured: {0}")]
    Configuration(String),

    /// The storage collaborator failed the insert or select.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl EndpointError {
    pub fn not_configured() -> Self {
        Self::Configuration(
            "set STORAGE_URL and STORAGE_SERVICE_KEY, or DATABASE_URL".to_string(),
        )
    }

    /// Status used when the error is surfaced to the caller.
    pub fn status(&self) -> StatusCode {
        match self {
            EndpointError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            EndpointError::Body(_) => StatusCode::PAYLOAD_TOO_LARGE,
            EndpointError::Parse(_) => StatusCode::BAD_REQUEST,
            EndpointError::Configuration(_) | EndpointError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            EndpointError::MethodNotAllowed(_) => "method_not_allowed",
            EndpointError::Body(_) => "body_error",
            EndpointError::Parse(_) => "parse_error",
            EndpointError::Configuration(_) => "configuration_error",
            EndpointError::Storage(_) => "storage_error",
        }
    }
}
