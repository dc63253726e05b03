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

//! Event capture: `POST /events`.

use hero_ab_types::CaptureRequest;

use crate::error::ClientError;
use crate::{error_from_response, HeroAbClient};

impl HeroAbClient {
    /// Record one hero event.
    ///
    /// The server answers `200 "ok"` even when it drops the event, so `Ok(())`
    /// means the request was delivered, not that it was stored.
    pub async fn capture(&self, request: &CaptureRequest) -> Result<(), ClientError> {
        let response = self.post("/events").json(request).send().await?;
        if response.status().is_success() {
            return Ok(());
        }
        let err = error_from_response(response).await;
        log::warn!("hero event capture failed: {err}");
        Err(err)
    }
}
