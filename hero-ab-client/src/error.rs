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

//! Error types for the hero A/B API client.

use thiserror::Error;

/// Errors returned by [`HeroAbClient`](crate::HeroAbClient) methods.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The endpoint was called with a method it does not accept (HTTP 405).
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The server reported a failure, with the `error` field of its envelope
    /// when one was present.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// A network or transport error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
