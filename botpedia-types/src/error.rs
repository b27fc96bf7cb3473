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

//! Relay error body.
//!
//! Every failure the relay produces itself is returned as an [`ErrorBody`].
//! Upstream (vendor) failures are *not* reshaped into this type; the relay
//! passes those through verbatim so that vendor-side rejections stay
//! diagnosable from the raw status and body.

use serde::{Deserialize, Serialize};

/// Body of a relay-originated failure response: `{ "error": ..., "details": ... }`.
///
/// The `error` field is a human-readable description; `details` carries
/// engineering-level context (a parse error, a transport error) when there
/// is any.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub error: String,

    /// Optional engineering-level detail for debugging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    /// The server-held vendor secret is not configured. Detected before any
    /// outbound call is made.
    pub fn missing_api_key() -> Self {
        Self {
            error: "OPENAI_API_KEY is not configured".to_string(),
            details: None,
        }
    }

    /// The client sent a malformed or empty offer.
    pub fn invalid_offer(detail: &str) -> Self {
        Self {
            error: "Invalid session offer".to_string(),
            details: Some(detail.to_string()),
        }
    }

    /// The vendor endpoint could not be reached at the transport level.
    pub fn upstream_unreachable(detail: &str) -> Self {
        Self {
            error: "Realtime endpoint unreachable".to_string(),
            details: Some(detail.to_string()),
        }
    }

    pub fn internal(detail: &str) -> Self {
        Self {
            error: "Internal relay error".to_string(),
            details: Some(detail.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_are_omitted_when_absent() {
        let json = serde_json::to_string(&ErrorBody::missing_api_key()).unwrap();
        assert!(!json.contains("details"));
    }

    #[test]
    fn invalid_offer_carries_detail() {
        let body = ErrorBody::invalid_offer("empty body");
        assert_eq!(body.details.as_deref(), Some("empty body"));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["details"], "empty body");
    }
}
