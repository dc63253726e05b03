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

//! Events table queries over a sqlx Postgres pool.
//!
//! The table name comes from configuration and is validated there against
//! `^[A-Za-z_][A-Za-z0-9_]*$` before it is spliced into SQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::{EventRow, EventStore, NewEvent, StoreError};

/// Event log stored in a Postgres table.
#[derive(Debug, Clone)]
pub struct PgEventStore {
    pool: PgPool,
    table: String,
}

impl PgEventStore {
    pub fn new(pool: PgPool, table: &str) -> Self {
        Self {
            pool,
            table: table.to_string(),
        }
    }

    /// Open a pool against `database_url`.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        table: &str,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool, table))
    }

    /// Build a pool that opens connections on first use, so an unreachable
    /// database at startup only fails the requests that need it.
    pub fn connect_lazy(
        database_url: &str,
        max_connections: u32,
        table: &str,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_lazy(database_url)?;
        Ok(Self::new(pool, table))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the events table and its `created_at` index if missing.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        let create_table = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                id BIGSERIAL PRIMARY KEY,
                event TEXT,
                variant TEXT,
                cta TEXT,
                path TEXT,
                "ref" TEXT,
                session_id TEXT,
                user_agent TEXT,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
            table = self.table
        );
        sqlx::query(&create_table).execute(&self.pool).await?;

        let create_index = format!(
            "CREATE INDEX IF NOT EXISTS {table}_created_at_idx ON {table} (created_at)",
            table = self.table
        );
        sqlx::query(&create_index).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn insert(&self, event: NewEvent) -> Result<(), StoreError> {
        let sql = format!(
            r#"
            INSERT INTO {table} (event, variant, cta, path, "ref", session_id, user_agent)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
            table = self.table
        );
        sqlx::query(&sql)
            .bind(event.event)
            .bind(event.variant)
            .bind(event.cta)
            .bind(event.path)
            .bind(event.referrer)
            .bind(event.session_id)
            .bind(event.user_agent)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn select_since(&self, since: DateTime<Utc>) -> Result<Vec<EventRow>, StoreError> {
        let sql = format!(
            "SELECT event, variant, cta, created_at FROM {table} WHERE created_at >= $1",
            table = self.table
        );
        let rows = sqlx::query_as::<_, EventRow>(&sql)
            .bind(since)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
