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

//! Event log behind a PostgREST endpoint (the REST layer Supabase exposes).
//!
//! Both the `apikey` header and `Authorization: Bearer` carry the service
//! key, which is what Supabase expects for server-side access.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;

use super::{EventRow, EventStore, NewEvent, StoreError};

/// Columns the stats endpoint reads back.
const SELECT_COLUMNS: &str = "event,variant,cta,created_at";

#[derive(Debug, Clone)]
pub struct RestEventStore {
    base_url: String,
    service_key: String,
    table: String,
    http: Client,
}

impl RestEventStore {
    /// # Arguments
    ///
    /// * `base_url` - project URL, e.g. `"https://abc.supabase.co"`
    /// * `service_key` - service-role key
    /// * `table` - events table name
    pub fn new(base_url: &str, service_key: &str, table: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
            table: table.to_string(),
            http: Client::new(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.service_key)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", self.service_key),
            )
    }
}

/// PostgREST filter selecting rows at or after `since`.
fn created_at_filter(since: DateTime<Utc>) -> String {
    format!("gte.{}", since.to_rfc3339_opts(SecondsFormat::Millis, true))
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl EventStore for RestEventStore {
    fn backend(&self) -> &'static str {
        "rest"
    }

    async fn insert(&self, event: NewEvent) -> Result<(), StoreError> {
        let response = self
            .authorized(self.http.post(self.table_url()))
            .header("Prefer", "return=minimal")
            .json(&event)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn select_since(&self, since: DateTime<Utc>) -> Result<Vec<EventRow>, StoreError> {
        let response = self
            .authorized(self.http.get(self.table_url()))
            .query(&[
                ("select", SELECT_COLUMNS.to_string()),
                ("created_at", created_at_filter(since)),
            ])
            .send()
            .await?;
        let rows: Vec<EventRow> = ensure_success(response).await?.json().await?;
        Ok(rows)
    }
}
