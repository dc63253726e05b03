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

//! Shared application state passed to every Axum handler via `State`.

use std::sync::Arc;

use crate::config::{Config, StorageConfig};
use crate::policy::FailureVisibility;
use crate::store::{EventStore, MemoryEventStore, PgEventStore, RestEventStore, StoreError};

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Event log collaborator. `None` makes capture log-only and stats fail.
    pub store: Option<Arc<dyn EventStore>>,
    /// Failure policy of the capture endpoint.
    pub capture_failures: FailureVisibility,
    /// Failure policy of the stats endpoint.
    pub stats_failures: FailureVisibility,
}

impl AppState {
    /// State with the standard policies: capture silent, stats surfaced.
    pub fn new(store: Option<Arc<dyn EventStore>>) -> Self {
        Self {
            store,
            capture_failures: FailureVisibility::Silent,
            stats_failures: FailureVisibility::Surfaced,
        }
    }

    /// Build the configured store. Both remote backends connect lazily. The
    /// Postgres table is created by a background task; if that fails the
    /// service still starts and stats surface the storage error per request.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn from_config(config: &Config) -> Result<Self, StoreError> {
        let store: Option<Arc<dyn EventStore>> = match &config.storage {
            StorageConfig::Rest { url, service_key } => Some(Arc::new(RestEventStore::new(
                url,
                service_key,
                &config.events_table,
            ))),
            StorageConfig::Postgres {
                database_url,
                max_connections,
            } => {
                let store = PgEventStore::connect_lazy(
                    database_url,
                    *max_connections,
                    &config.events_table,
                )?;
                let schema_store = store.clone();
                tokio::spawn(async move {
                    match schema_store.ensure_schema().await {
                        Ok(()) => tracing::info!("events table ready"),
                        Err(e) => tracing::warn!("could not prepare events table: {e}"),
                    }
                });
                Some(Arc::new(store))
            }
            StorageConfig::Memory => Some(Arc::new(MemoryEventStore::new())),
            StorageConfig::None => None,
        };
        Ok(Self::new(store))
    }
}
