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

//! Session-negotiation payloads.
//!
//! A negotiation exchanges exactly one of two shapes with the relay:
//! an SDP offer/answer pair (opaque text, optionally JSON-wrapped), or an
//! ephemeral [`SessionCredential`] minted by the vendor sessions endpoint.
//! Either is valid for exactly one connection attempt; reuse requires a
//! fresh request.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON wrapper around an opaque SDP blob: `{ "sdp": "v=0..." }`.
///
/// Some clients post raw `application/sdp` text instead; the relay accepts
/// both and the vendor only ever sees raw SDP.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SdpPayload {
    pub sdp: String,
}

/// The ephemeral secret inside a [`SessionCredential`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ClientSecret {
    /// Bearer value the browser presents directly to the vendor.
    pub value: String,

    /// Expiry as a unix timestamp, when the vendor reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

/// Ephemeral credential issued by the vendor sessions endpoint and relayed
/// to the browser verbatim.
///
/// The relay never reshapes this body; this type exists so the client and
/// tests can decode it. Fields the vendor adds that we do not model are
/// preserved in `extra`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SessionCredential {
    pub client_secret: ClientSecret,
    pub model: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Session configuration the relay attaches in credential mode.
///
/// The same modality/turn-detection knobs travel over the event channel in a
/// `session-configure` message once the channel opens.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub model: String,
    pub voice: String,
    pub modalities: Vec<String>,
    pub instructions: String,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct HealthResponse {
    pub ok: bool,
    pub model: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_preserves_unmodeled_fields() {
        let raw = r#"{
            "client_secret": { "value": "ek_abc", "expires_at": 1735689600 },
            "model": "gpt-realtime",
            "voice": "verse",
            "turn_detection": { "type": "server_vad" }
        }"#;
        let cred: SessionCredential = serde_json::from_str(raw).unwrap();
        assert_eq!(cred.client_secret.value, "ek_abc");
        assert_eq!(cred.model, "gpt-realtime");
        assert!(cred.extra.contains_key("voice"));
        assert!(cred.extra.contains_key("turn_detection"));

        // Round back out without losing the vendor's fields.
        let out = serde_json::to_value(&cred).unwrap();
        assert_eq!(out["turn_detection"]["type"], "server_vad");
    }

    #[test]
    fn sdp_payload_shape() {
        let payload: SdpPayload = serde_json::from_str(r#"{"sdp":"v=0\r\no=- 1 1"}"#).unwrap();
        assert!(payload.sdp.starts_with("v=0"));
    }
}
