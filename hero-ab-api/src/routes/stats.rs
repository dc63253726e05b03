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

//! Handler for the stats endpoint.

use axum::{
    extract::{RawQuery, State},
    http::{header, Method},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use hero_ab_types::StatsResponse;

use crate::aggregate::{aggregate, resolve_days, window_start};
use crate::error::EndpointError;
use crate::state::AppState;

/// GET /stats?days=<1..90>
pub async fn get_stats(
    State(state): State<AppState>,
    method: Method,
    RawQuery(query): RawQuery,
) -> Response {
    match summarize(&state, &method, query.as_deref()).await {
        Ok(stats) => ([(header::CACHE_CONTROL, "no-store")], Json(stats)).into_response(),
        Err(err) => state.stats_failures.render("stats", err),
    }
}

async fn summarize(
    state: &AppState,
    method: &Method,
    query: Option<&str>,
) -> Result<StatsResponse, EndpointError> {
    if *method != Method::GET {
        return Err(EndpointError::MethodNotAllowed(method.clone()));
    }

    let days = resolve_days(days_param(query).as_deref());
    let since = window_start(Utc::now(), days);

    let store = state.store.as_ref().ok_or_else(EndpointError::not_configured)?;
    let rows = store.select_since(since).await?;
    let summary = aggregate(&rows);

    tracing::debug!(
        backend = store.backend(),
        days,
        rows = rows.len(),
        "hero ab stats computed"
    );

    Ok(StatsResponse {
        days,
        since: since.to_rfc3339_opts(SecondsFormat::Millis, true),
        totals: summary.totals,
        variants: summary.variants,
    })
}

/// First `days` value of the raw query string, percent-decoded.
fn days_param(query: Option<&str>) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == "days")
        .map(|(_, value)| value.into_owned())
}
