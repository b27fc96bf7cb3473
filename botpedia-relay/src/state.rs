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
 *
 * Unless you explicitly state otherwise, any contribution intentionally
 * submitted for inclusion in the work by you, as defined in the Apache-2.0
 * license, shall be dual licensed as above, without any additional terms or
 * conditions.
 */

//! Shared application state passed to every Axum handler via `State`.

use crate::config::Config;
use std::sync::Arc;

/// Application state shared across all request handlers.
///
/// The relay holds no session state between requests; this is only the
/// immutable configuration plus a pooled HTTP client for outbound calls.
#[derive(Clone)]
pub struct AppState {
    /// Outbound HTTP client (connection pool is shared across requests).
    pub http: reqwest::Client,
    /// Relay configuration.
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            config: Arc::new(config),
        }
    }
}
