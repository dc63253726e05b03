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

//! Hero A/B analytics server entry point.
//!
//! A standalone Axum service that records hero experiment events and
//! reports per-variant views, clicks and click-through rate.

use hero_ab_api::config::{Config, StorageConfig};
use hero_ab_api::routes;
use hero_ab_api::state::AppState;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env().map_err(anyhow::Error::msg)?;

    let state = AppState::from_config(&config)?;

    match &config.storage {
        StorageConfig::None => tracing::warn!(
            "No storage configured: events are logged only and /stats will fail"
        ),
        storage => tracing::info!(
            "Event storage backend: {} (table {})",
            storage.backend_name(),
            config.events_table
        ),
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::router().layer(cors).with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;

    tracing::info!("Hero A/B analytics listening on {}", config.listen_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
