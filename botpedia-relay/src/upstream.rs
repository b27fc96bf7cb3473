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

//! Outbound calls to the vendor realtime endpoint.
//!
//! Two negotiation modes exist. SDP-exchange mode posts the raw offer to
//! `{base}/realtime?model=...` and receives the answer SDP. Credential mode
//! posts a JSON session config to `{base}/realtime/sessions` and receives an
//! ephemeral client secret. In both modes the response is captured whole
//! (status, content type and body) so the handler can relay it verbatim,
//! including vendor rejections.

use crate::error::AppError;
use crate::state::AppState;
use axum::http::StatusCode;
use botpedia_types::SessionConfig;
use tracing::error;
use url::Url;

/// Beta opt-in header required by the vendor realtime endpoint.
const REALTIME_BETA_HEADER: (&str, &str) = ("OpenAI-Beta", "realtime=v1");

/// A vendor response captured verbatim for pass-through.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Forward an SDP offer to the vendor and capture the answer (or rejection).
pub async fn exchange_sdp(
    state: &AppState,
    api_key: &str,
    offer_sdp: &str,
) -> Result<UpstreamResponse, AppError> {
    let url = realtime_url(state)?;

    let response = state
        .http
        .post(url)
        .bearer_auth(api_key)
        .header("Content-Type", "application/sdp")
        .header(REALTIME_BETA_HEADER.0, REALTIME_BETA_HEADER.1)
        .body(offer_sdp.to_string())
        .send()
        .await
        .map_err(|e| {
            error!("realtime SDP exchange unreachable: {e}");
            AppError::upstream_unreachable(&e.to_string())
        })?;

    capture(response).await
}

/// Mint an ephemeral credential from the vendor sessions endpoint.
pub async fn mint_credential(state: &AppState, api_key: &str) -> Result<UpstreamResponse, AppError> {
    let url = format!("{}/realtime/sessions", state.config.upstream_base);

    let session = SessionConfig {
        model: state.config.model.clone(),
        voice: state.config.voice.clone(),
        modalities: vec!["audio".to_string(), "text".to_string()],
        instructions: state.config.instructions.clone(),
    };

    let response = state
        .http
        .post(url)
        .bearer_auth(api_key)
        .header(REALTIME_BETA_HEADER.0, REALTIME_BETA_HEADER.1)
        .json(&session)
        .send()
        .await
        .map_err(|e| {
            error!("realtime sessions endpoint unreachable: {e}");
            AppError::upstream_unreachable(&e.to_string())
        })?;

    capture(response).await
}

/// `{base}/realtime?model={model}` with the model properly escaped.
fn realtime_url(state: &AppState) -> Result<Url, AppError> {
    let mut url = Url::parse(&format!("{}/realtime", state.config.upstream_base))
        .map_err(|e| AppError::internal(&format!("bad upstream base url: {e}")))?;
    url.query_pairs_mut()
        .append_pair("model", &state.config.model);
    Ok(url)
}

async fn capture(response: reqwest::Response) -> Result<UpstreamResponse, AppError> {
    // reqwest and axum track separate `http` versions; carry the status as u16.
    let status = StatusCode::from_u16(response.status().as_u16())
        .map_err(|e| AppError::internal(&format!("invalid upstream status: {e}")))?;
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());
    let body = response
        .bytes()
        .await
        .map_err(|e| AppError::upstream_unreachable(&e.to_string()))?
        .to_vec();

    Ok(UpstreamResponse {
        status,
        content_type,
        body,
    })
}
