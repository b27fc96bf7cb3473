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

//! Event-channel message vocabulary.
//!
//! Once the peer connection establishes, both sides exchange JSON messages
//! over the data channel, dispatched by the `type` tag. The enumeration is
//! closed: a tag we do not recognize decodes to [`RealtimeEvent::Unknown`]
//! so that dispatch stays exhaustive and vendor protocol drift surfaces as
//! a visible no-op instead of a decode failure.

use serde::{Deserialize, Serialize};

/// One message on the bidirectional event channel.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RealtimeEvent {
    /// Remote session is ready to be configured.
    SessionReady,

    /// Configure the remote session's response behavior.
    SessionConfigure {
        modalities: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        turn_detection: Option<String>,
    },

    /// Ask the remote side to produce a new turn.
    TurnRequest,

    /// Incremental text fragment of the current turn.
    TextDelta { delta: String },

    /// The current turn finished; accumulated text is final.
    TurnComplete,

    /// The remote side reported an error on the channel.
    Error { message: String },

    /// Any tag this build does not understand.
    #[serde(other)]
    Unknown,
}

impl RealtimeEvent {
    /// The wire tag of this event, as it appears in the JSON `type` field.
    pub fn tag(&self) -> &'static str {
        match self {
            RealtimeEvent::SessionReady => "session-ready",
            RealtimeEvent::SessionConfigure { .. } => "session-configure",
            RealtimeEvent::TurnRequest => "turn-request",
            RealtimeEvent::TextDelta { .. } => "text-delta",
            RealtimeEvent::TurnComplete => "turn-complete",
            RealtimeEvent::Error { .. } => "error",
            RealtimeEvent::Unknown => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_delta_decodes_from_wire_tag() {
        let event: RealtimeEvent =
            serde_json::from_str(r#"{"type":"text-delta","delta":"Hola"}"#).unwrap();
        assert_eq!(
            event,
            RealtimeEvent::TextDelta {
                delta: "Hola".to_string()
            }
        );
    }

    #[test]
    fn configure_encodes_kebab_case_tag() {
        let event = RealtimeEvent::SessionConfigure {
            modalities: vec!["text".to_string()],
            turn_detection: Some("server_vad".to_string()),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "session-configure");
        assert_eq!(json["modalities"][0], "text");
    }

    #[test]
    fn unrecognized_tag_becomes_unknown() {
        let event: RealtimeEvent =
            serde_json::from_str(r#"{"type":"rate-limits-updated"}"#).unwrap();
        assert_eq!(event, RealtimeEvent::Unknown);
    }

    #[test]
    fn turn_complete_round_trips() {
        let json = serde_json::to_string(&RealtimeEvent::TurnComplete).unwrap();
        let back: RealtimeEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RealtimeEvent::TurnComplete);
        assert_eq!(back.tag(), "turn-complete");
    }
}
