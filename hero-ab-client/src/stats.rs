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

//! Stats: `GET /stats`.

use hero_ab_types::{StatsQuery, StatsResponse};

use crate::error::ClientError;
use crate::{error_from_response, HeroAbClient};

impl HeroAbClient {
    /// Fetch per-variant stats for the last `days` days (server default when `None`).
    ///
    /// Calls `GET /stats?days={days}`.
    pub async fn stats(&self, days: Option<i64>) -> Result<StatsResponse, ClientError> {
        let query = days.map(StatsQuery::with_days).unwrap_or_default();
        let response = self.get("/stats").query(&query).send().await?;
        if response.status().is_success() {
            return Ok(response.json().await?);
        }
        Err(error_from_response(response).await)
    }
}
