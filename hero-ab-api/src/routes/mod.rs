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

//! Axum router configuration for the hero A/B analytics API.

pub mod capture;
pub mod health;
pub mod stats;

use axum::{
    routing::{any, get},
    Router,
};

use crate::state::AppState;

/// Build the full application router.
///
/// Capture and stats accept every method so that a wrong verb goes through
/// the endpoint's failure policy instead of the router's bare 405.
pub fn router() -> Router<AppState> {
    Router::new()
        // Event capture
        .route("/events", any(capture::capture_event))
        .route("/api/hero-ab-event", any(capture::capture_event))
        // Stats
        .route("/stats", any(stats::get_stats))
        .route("/api/hero-ab-stats", any(stats::get_stats))
        .route("/healthz", get(health::healthz))
}
