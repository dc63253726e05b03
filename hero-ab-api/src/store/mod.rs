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

//! Event log storage collaborators.
//!
//! The log is append-only and owned by an external service. The capture
//! endpoint calls [`EventStore::insert`] once per accepted event and the stats
//! endpoint calls [`EventStore::select_since`] once per request. Neither
//! retries; a failure is handed back to the endpoint's failure policy.

pub mod memory;
pub mod postgres;
pub mod rest;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hero_ab_types::CaptureRequest;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use memory::MemoryEventStore;
pub use postgres::PgEventStore;
pub use rest::RestEventStore;

/// Default name of the events table.
pub const DEFAULT_TABLE: &str = "hero_ab_events";

/// A record about to be appended. `created_at` is assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewEvent {
    pub event: Option<String>,
    pub variant: Option<String>,
    pub cta: Option<String>,
    pub path: Option<String>,
    #[serde(rename = "ref")]
    pub referrer: Option<String>,
    pub session_id: Option<String>,
    pub user_agent: Option<String>,
}

impl NewEvent {
    pub fn from_request(request: CaptureRequest, user_agent: Option<String>) -> Self {
        Self {
            event: request.event,
            variant: request.variant,
            cta: request.cta,
            path: request.path,
            referrer: request.referrer,
            session_id: request.session_id,
            user_agent,
        }
    }
}

/// Projection of a stored record read back by the stats endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, sqlx::FromRow)]
pub struct EventRow {
    pub event: Option<String>,
    pub variant: Option<String>,
    pub cta: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Failures talking to the storage collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Postgres rejected the query or the pool could not hand out a connection.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The REST store could not be reached or returned an unreadable body.
    #[error("storage request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The REST store answered with a non-2xx status.
    #[error("storage responded with {status}: {body}")]
    Status { status: u16, body: String },

    /// The store is intentionally offline (used by tests and maintenance).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Append/query access to the event log.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Short backend name for logs (`"postgres"`, `"rest"`, `"memory"`).
    fn backend(&self) -> &'static str;

    /// Append exactly one record.
    async fn insert(&self, event: NewEvent) -> Result<(), StoreError>;

    /// Every record with `created_at >= since`, in no particular order.
    async fn select_since(&self, since: DateTime<Utc>) -> Result<Vec<EventRow>, StoreError>;
}
