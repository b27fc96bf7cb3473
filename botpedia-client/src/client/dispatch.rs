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

//! Inbound event dispatch, separated from the browser glue so the
//! accumulate/flush behavior is testable off-browser.

use crate::speech::TranscriptBuffer;
use botpedia_types::RealtimeEvent;

/// What the client should do in response to one inbound channel message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchAction {
    /// Remote session announced readiness: configure it and ask for a turn.
    ConfigureSession,
    /// A text fragment was appended to the transcript.
    AppendDelta(String),
    /// The turn finished: speak the flushed transcript. Empty text means
    /// there was nothing accumulated.
    SpeakTurn(String),
    /// The remote side reported an error.
    SurfaceError(String),
    /// Outbound-only or unrecognized tag.
    Nothing,
}

pub fn dispatch_event(event: RealtimeEvent, transcript: &mut TranscriptBuffer) -> DispatchAction {
    match event {
        RealtimeEvent::SessionReady => DispatchAction::ConfigureSession,
        RealtimeEvent::TextDelta { delta } => {
            transcript.push(&delta);
            DispatchAction::AppendDelta(delta)
        }
        RealtimeEvent::TurnComplete => DispatchAction::SpeakTurn(transcript.take()),
        RealtimeEvent::Error { message } => DispatchAction::SurfaceError(message),
        // These two only travel client -> server.
        RealtimeEvent::SessionConfigure { .. } | RealtimeEvent::TurnRequest => {
            DispatchAction::Nothing
        }
        RealtimeEvent::Unknown => DispatchAction::Nothing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_accumulate_until_turn_completes() {
        let mut transcript = TranscriptBuffer::new();

        let action = dispatch_event(
            RealtimeEvent::TextDelta {
                delta: "Ho".to_string(),
            },
            &mut transcript,
        );
        assert_eq!(action, DispatchAction::AppendDelta("Ho".to_string()));

        dispatch_event(
            RealtimeEvent::TextDelta {
                delta: "la".to_string(),
            },
            &mut transcript,
        );

        let action = dispatch_event(RealtimeEvent::TurnComplete, &mut transcript);
        assert_eq!(action, DispatchAction::SpeakTurn("Hola".to_string()));

        // The buffer was flushed: a second completion has nothing to say.
        let action = dispatch_event(RealtimeEvent::TurnComplete, &mut transcript);
        assert_eq!(action, DispatchAction::SpeakTurn(String::new()));
    }

    #[test]
    fn session_ready_requests_configuration() {
        let mut transcript = TranscriptBuffer::new();
        let action = dispatch_event(RealtimeEvent::SessionReady, &mut transcript);
        assert_eq!(action, DispatchAction::ConfigureSession);
    }

    #[test]
    fn errors_surface_their_message() {
        let mut transcript = TranscriptBuffer::new();
        let action = dispatch_event(
            RealtimeEvent::Error {
                message: "session expired".to_string(),
            },
            &mut transcript,
        );
        assert_eq!(
            action,
            DispatchAction::SurfaceError("session expired".to_string())
        );
    }

    #[test]
    fn unknown_tags_are_a_visible_no_op() {
        let mut transcript = TranscriptBuffer::new();
        transcript.push("partial");
        let action = dispatch_event(RealtimeEvent::Unknown, &mut transcript);
        assert_eq!(action, DispatchAction::Nothing);
        // An unknown tag must not disturb the accumulation in progress.
        assert_eq!(transcript.as_str(), "partial");
    }
}
