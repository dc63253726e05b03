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

//! REST client for the hero A/B analytics API.
//!
//! # Example
//!
//! ```no_run
//! use hero_ab_client::HeroAbClient;
//! use hero_ab_types::CaptureRequest;
//!
//! # async fn example() -> Result<(), hero_ab_client::ClientError> {
//! let client = HeroAbClient::new("http://localhost:8080");
//!
//! client
//!     .capture(&CaptureRequest {
//!         event: Some("hero_variant_view".to_string()),
//!         variant: Some("A".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let stats = client.stats(Some(7)).await?;
//! println!("{} views in the last {} days", stats.totals.views, stats.days);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod events;
pub mod stats;

pub use error::ClientError;
pub use hero_ab_types;

use hero_ab_types::ErrorBody;
use reqwest::Client;

/// A typed REST client for the hero A/B analytics API.
#[derive(Debug, Clone)]
pub struct HeroAbClient {
    base_url: String,
    http: Client,
}

impl HeroAbClient {
    /// Create a new client pointing at the given service base URL.
    ///
    /// # Arguments
    ///
    /// * `base_url` - e.g. `"http://localhost:8080"`
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub(crate) fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http.get(self.url(path))
    }

    pub(crate) fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http.post(self.url(path))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Map a non-success response to [`ClientError`], pulling the message out of
/// an `{ ok: false, error }` envelope when the body is one.
pub(crate) async fn error_from_response(response: reqwest::Response) -> ClientError {
    let status = response.status().as_u16();
    if status == 405 {
        return ClientError::MethodNotAllowed;
    }
    let text = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => body.error,
        Err(_) => text,
    };
    ClientError::Server { status, message }
}
