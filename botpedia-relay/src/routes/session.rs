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

//! `/session`, the negotiation endpoint.
//!
//! `POST /session` carries a connection offer: raw SDP text, or JSON
//! `{"sdp": "..."}`. The relay forwards the offer with the server-held key
//! attached and returns the vendor answer verbatim. An empty body is a
//! validation error; token mode lives on `GET /session`, which mints an
//! ephemeral credential the browser can use to negotiate with the vendor
//! directly.
//!
//! A credential or answer is good for exactly one connection attempt; the
//! relay holds nothing between requests, so a retry is just a new request.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use botpedia_types::SdpPayload;
use tracing::{error, info};

use crate::error::AppError;
use crate::state::AppState;
use crate::upstream::{self, UpstreamResponse};

/// POST /session
pub async fn post_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Response, AppError> {
    let offer_sdp = extract_offer(&headers, &body)?;

    let api_key = require_api_key(&state)?;
    let upstream = upstream::exchange_sdp(&state, &api_key, &offer_sdp).await?;

    if upstream.is_success() {
        info!("SDP exchange answered ({} bytes)", upstream.body.len());
    } else {
        error!(
            status = %upstream.status,
            body = %String::from_utf8_lossy(&upstream.body),
            "vendor rejected SDP offer"
        );
    }

    // Default the answer's content type to SDP; the vendor omits it on some
    // error paths.
    Ok(passthrough(upstream, "application/sdp"))
}

/// GET /session
pub async fn get_session(State(state): State<AppState>) -> Result<Response, AppError> {
    let api_key = require_api_key(&state)?;
    let upstream = upstream::mint_credential(&state, &api_key).await?;

    if !upstream.is_success() {
        error!(
            status = %upstream.status,
            body = %String::from_utf8_lossy(&upstream.body),
            "vendor refused to mint a session credential"
        );
    }

    Ok(passthrough(upstream, "application/json"))
}

/// Fail before any outbound call when the secret is absent.
fn require_api_key(state: &AppState) -> Result<String, AppError> {
    state
        .config
        .api_key
        .clone()
        .ok_or_else(AppError::missing_api_key)
}

/// Pull the offer SDP out of the request body, whichever shape it arrived in.
fn extract_offer(headers: &HeaderMap, body: &str) -> Result<String, AppError> {
    if body.trim().is_empty() {
        return Err(AppError::invalid_offer(
            "empty body; POST an SDP offer or use GET for token mode",
        ));
    }

    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.contains("json"))
        .unwrap_or(false)
        || body.trim_start().starts_with('{');

    if is_json {
        let payload: SdpPayload = serde_json::from_str(body)
            .map_err(|e| AppError::invalid_offer(&format!("JSON body without valid sdp: {e}")))?;
        if payload.sdp.trim().is_empty() {
            return Err(AppError::invalid_offer("sdp field is empty"));
        }
        Ok(payload.sdp)
    } else {
        Ok(body.to_string())
    }
}

/// Relay the captured vendor response without reshaping it.
fn passthrough(upstream: UpstreamResponse, default_content_type: &str) -> Response {
    let content_type = upstream
        .content_type
        .unwrap_or_else(|| default_content_type.to_string());

    match Response::builder()
        .status(upstream.status)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(upstream.body))
    {
        Ok(response) => response,
        Err(e) => {
            error!("failed to build pass-through response: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
