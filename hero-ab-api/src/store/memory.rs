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

//! In-process event log, for tests and local demos.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{EventRow, EventStore, NewEvent, StoreError};

/// A record held by [`MemoryEventStore`], with its insert timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEvent {
    pub event: NewEvent,
    pub created_at: DateTime<Utc>,
}

/// Thread-safe in-memory log. Clones share the same underlying records.
#[derive(Debug, Clone, Default)]
pub struct MemoryEventStore {
    events: Arc<RwLock<Vec<StoredEvent>>>,
    outage: Arc<RwLock<Option<String>>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record with an explicit timestamp, bypassing the outage switch.
    pub async fn insert_at(&self, event: NewEvent, created_at: DateTime<Utc>) {
        self.events
            .write()
            .await
            .push(StoredEvent { event, created_at });
    }

    /// Snapshot of everything stored so far, in insert order.
    pub async fn events(&self) -> Vec<StoredEvent> {
        self.events.read().await.clone()
    }

    /// Make every subsequent call fail with [`StoreError::Unavailable`].
    /// Pass `None` to bring the store back.
    pub async fn set_outage(&self, reason: Option<&str>) {
        *self.outage.write().await = reason.map(str::to_string);
    }

    async fn check_outage(&self) -> Result<(), StoreError> {
        match self.outage.read().await.as_ref() {
            Some(reason) => Err(StoreError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, event: NewEvent) -> Result<(), StoreError> {
        self.check_outage().await?;
        self.insert_at(event, Utc::now()).await;
        Ok(())
    }

    async fn select_since(&self, since: DateTime<Utc>) -> Result<Vec<EventRow>, StoreError> {
        self.check_outage().await?;
        let events = self.events.read().await;
        Ok(events
            .iter()
            .filter(|stored| stored.created_at >= since)
            .map(|stored| EventRow {
                event: stored.event.event.clone(),
                variant: stored.event.variant.clone(),
                cta: stored.event.cta.clone(),
                created_at: stored.created_at,
            })
            .collect())
    }
}
