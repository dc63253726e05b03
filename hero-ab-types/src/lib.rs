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

//! Shared API types for the hero A/B analytics service.
//!
//! This crate defines the contract between the capture/stats service and its
//! consumers (the marketing site, dashboards, integration tests).
//! It is intentionally framework-agnostic: no axum, no database types.

pub mod error;
pub mod requests;
pub mod responses;
pub mod variant;

pub use error::ErrorBody;
pub use requests::{CaptureRequest, StatsQuery};
pub use responses::{StatsResponse, StatsTotals, VariantStats};
pub use variant::{EventKind, Variant};
