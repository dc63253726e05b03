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

//! API error envelope.
//!
//! Surfaced failures are returned as `{ "ok": false, "error": "<message>" }`.

use serde::{Deserialize, Serialize};

/// Error body returned by endpoints that surface failures to the caller.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    /// Always `false`.
    pub ok: bool,

    /// Human-readable description of what went wrong.
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: message.into(),
        }
    }
}
