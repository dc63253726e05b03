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

//! Hero A/B analytics API library.
//!
//! This crate provides the Axum router, application state, storage
//! collaborators and configuration for the capture/stats service. The binary
//! entry point (`main.rs`) is a thin wrapper that calls into this library.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod policy;
pub mod routes;
pub mod state;
pub mod store;
