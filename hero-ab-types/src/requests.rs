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

//! Request types for the hero A/B analytics API.
//!
//! These types define the shape of request bodies and query parameters.
//! They are used by both the server and clients.

use serde::{Deserialize, Serialize};

/// Allow-listed body of `POST /events`.
///
/// Every field is optional. The server keeps only these fields (plus the
/// request's `User-Agent`) and drops anything else the caller sends.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct CaptureRequest {
    /// `hero_variant_view` or `hero_cta_click`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,

    /// Experiment arm label (`A`, `B` or `C`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,

    /// Which call-to-action was clicked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Referrer.
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,

    /// Client-generated session correlation id.
    #[serde(
        rename = "sessionId",
        alias = "session_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub session_id: Option<String>,
}

/// Lookback window used when `days` is absent or not a number.
pub const DEFAULT_DAYS: i64 = 14;
/// Smallest accepted lookback window.
pub const MIN_DAYS: i64 = 1;
/// Largest accepted lookback window.
pub const MAX_DAYS: i64 = 90;

/// Query parameters for `GET /stats`.
///
/// `days` is kept as the raw string so that junk like `?days=abc` falls back
/// to [`DEFAULT_DAYS`] instead of failing extraction.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct StatsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<String>,
}

impl StatsQuery {
    pub fn with_days(days: i64) -> Self {
        Self {
            days: Some(days.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_request_uses_browser_field_names() {
        let req = CaptureRequest {
            event: Some("hero_cta_click".into()),
            referrer: Some("https://news.ycombinator.com".into()),
            session_id: Some("s-1".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["ref"], "https://news.ycombinator.com");
        assert_eq!(json["sessionId"], "s-1");
        assert!(json.get("variant").is_none());
    }

    #[test]
    fn capture_request_accepts_snake_case_session_id() {
        let req: CaptureRequest = serde_json::from_str(r#"{"session_id":"s-2"}"#).unwrap();
        assert_eq!(req.session_id.as_deref(), Some("s-2"));
    }
}
