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

//! Application error type that implements Axum's `IntoResponse`.
//!
//! Only relay-originated failures use this type. Vendor non-success
//! responses are never converted to an [`AppError`]; they are passed
//! through verbatim by the session handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use botpedia_types::ErrorBody;

/// Relay-level error pairing an HTTP status code with an [`ErrorBody`].
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl AppError {
    pub fn new(status: StatusCode, body: ErrorBody) -> Self {
        Self { status, body }
    }

    /// ConfigurationError: the vendor secret is absent. Detected before any
    /// outbound call.
    pub fn missing_api_key() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody::missing_api_key(),
        )
    }

    /// ValidationError: client offer is missing or malformed.
    pub fn invalid_offer(detail: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ErrorBody::invalid_offer(detail))
    }

    /// The vendor endpoint could not be reached at all (DNS, TLS, refused
    /// connection). Distinct from a vendor non-success status, which is
    /// relayed verbatim instead.
    pub fn upstream_unreachable(detail: &str) -> Self {
        Self::new(
            StatusCode::BAD_GATEWAY,
            ErrorBody::upstream_unreachable(detail),
        )
    }

    pub fn internal(detail: &str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::internal(detail))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http_body_util::BodyExt;

    async fn read_error_body(resp: Response) -> (StatusCode, ErrorBody) {
        let status = resp.status();
        let bytes = Body::new(resp.into_body())
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        let parsed: ErrorBody = serde_json::from_slice(&bytes).expect("deserialize error body");
        (status, parsed)
    }

    #[tokio::test]
    async fn missing_api_key_produces_500() {
        let resp = AppError::missing_api_key().into_response();
        let (status, body) = read_error_body(resp).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.error.contains("OPENAI_API_KEY"));
    }

    #[tokio::test]
    async fn invalid_offer_produces_400_with_detail() {
        let resp = AppError::invalid_offer("empty body").into_response();
        let (status, body) = read_error_body(resp).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.details.as_deref(), Some("empty body"));
    }

    #[tokio::test]
    async fn upstream_unreachable_produces_502() {
        let resp = AppError::upstream_unreachable("connection refused").into_response();
        let (status, body) = read_error_body(resp).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body.details.as_deref(), Some("connection refused"));
    }
}
