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

//! Application configuration loaded from environment variables.

use std::env;

use crate::store::DEFAULT_TABLE;

const VALID_TABLE_PATTERN: &str = "^[A-Za-z_][A-Za-z0-9_]*$";

/// Configuration for the hero A/B analytics service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP server (e.g. "0.0.0.0:8080").
    pub listen_addr: String,
    /// Which storage collaborator to talk to, if any.
    pub storage: StorageConfig,
    /// Name of the events table (default: `hero_ab_events`).
    pub events_table: String,
}

/// Storage collaborator selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// PostgREST / Supabase project.
    Rest { url: String, service_key: String },
    /// Direct Postgres connection.
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    /// Process-local log; lost on restart.
    Memory,
    /// Nothing configured: capture logs only, stats fail.
    None,
}

impl StorageConfig {
    pub fn backend_name(&self) -> &'static str {
        match self {
            StorageConfig::Rest { .. } => "rest",
            StorageConfig::Postgres { .. } => "postgres",
            StorageConfig::Memory => "memory",
            StorageConfig::None => "none",
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Optional
    /// - `LISTEN_ADDR` (default: `"0.0.0.0:8080"`)
    /// - `STORAGE_URL` + `STORAGE_SERVICE_KEY` (REST backend, must be set together)
    /// - `DATABASE_URL` (Postgres backend, used when the REST pair is absent)
    /// - `DB_MAX_CONNECTIONS` (default: `"5"`)
    /// - `STORAGE_BACKEND` (`rest`, `postgres`, `memory` or `none`; default: auto)
    /// - `EVENTS_TABLE` (default: `"hero_ab_events"`)
    pub fn from_env() -> Result<Self, String> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`], reading variables through `var`.
    /// Empty values count as unset.
    pub fn from_vars<F>(var: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let listen_addr = var("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());

        let events_table = var("EVENTS_TABLE").unwrap_or_else(|| DEFAULT_TABLE.to_string());
        let re = regex::Regex::new(VALID_TABLE_PATTERN).expect("valid regex");
        if !re.is_match(&events_table) {
            return Err(format!(
                "EVENTS_TABLE must match pattern: {VALID_TABLE_PATTERN}"
            ));
        }

        let rest = match (var("STORAGE_URL"), var("STORAGE_SERVICE_KEY")) {
            (Some(url), Some(service_key)) => Some(StorageConfig::Rest { url, service_key }),
            (None, None) => None,
            _ => {
                return Err(
                    "STORAGE_URL and STORAGE_SERVICE_KEY must be set together".to_string(),
                )
            }
        };

        let postgres = match var("DATABASE_URL") {
            Some(database_url) => {
                let max_connections = var("DB_MAX_CONNECTIONS")
                    .unwrap_or_else(|| "5".to_string())
                    .parse::<u32>()
                    .map_err(|_| "DB_MAX_CONNECTIONS must be a valid integer")?;
                Some(StorageConfig::Postgres {
                    database_url,
                    max_connections,
                })
            }
            None => None,
        };

        let storage = match var("STORAGE_BACKEND").as_deref() {
            None => rest.or(postgres).unwrap_or(StorageConfig::None),
            Some("rest") => rest.ok_or(
                "STORAGE_BACKEND=rest requires STORAGE_URL and STORAGE_SERVICE_KEY",
            )?,
            Some("postgres") => {
                postgres.ok_or("STORAGE_BACKEND=postgres requires DATABASE_URL")?
            }
            Some("memory") => StorageConfig::Memory,
            Some("none") => StorageConfig::None,
            Some(other) => {
                return Err(format!(
                    "STORAGE_BACKEND must be one of rest, postgres, memory, none (got {other:?})"
                ))
            }
        };

        Ok(Self {
            listen_addr,
            storage,
            events_table,
        })
    }
}
