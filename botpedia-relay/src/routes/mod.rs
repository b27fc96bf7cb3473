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

//! Axum router configuration for the relay.

pub mod health;
pub mod session;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// SDP offers are small, but leave generous headroom for session JSON.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Build the full application router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/session", post(session::post_session))
        .route("/session", get(session::get_session))
        .route("/health", get(health::health))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}
