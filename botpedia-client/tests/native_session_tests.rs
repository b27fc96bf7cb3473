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

// Host-side coverage of the parts of the client that do not touch browser
// APIs. Browser-dependent behavior lives in tests/wasm.rs.

#![cfg(not(target_arch = "wasm32"))]

use botpedia_client::{
    emit_client_event, subscribe_client_events, ClientEvent, RealtimeEvent, SessionClient,
    SessionClientOptions, SessionState,
};

#[test]
fn new_client_starts_idle_and_unmuted() {
    let client = SessionClient::new(SessionClientOptions::default());
    assert_eq!(client.state(), SessionState::Idle);
    assert!(!client.is_connected());
    assert!(!client.is_muted());
}

#[test]
fn toggle_mute_without_capture_reports_unmuted() {
    let client = SessionClient::new(SessionClientOptions::default());
    assert!(!client.toggle_mute());
    assert!(!client.is_muted());
}

#[test]
fn send_control_while_idle_is_a_no_op() {
    let client = SessionClient::new(SessionClientOptions::default());
    client.send_control(&RealtimeEvent::TurnRequest);
    assert_eq!(client.state(), SessionState::Idle);
}

#[tokio::test]
async fn event_bus_delivers_to_subscribers() {
    let mut rx = subscribe_client_events();
    emit_client_event(ClientEvent::TextDelta("hola".to_string()));
    // The bus is global, so other tests may interleave their own events.
    loop {
        match rx.recv().await.unwrap() {
            ClientEvent::TextDelta(text) if text == "hola" => break,
            _ => {}
        }
    }
}

#[test]
fn emit_without_subscribers_does_not_block() {
    emit_client_event(ClientEvent::Disconnected);
}

#[test]
fn realtime_event_wire_format_round_trips_through_the_bus_types() {
    // The channel carries vendor events verbatim; unknown types must land
    // on the catch-all rather than fail the whole frame.
    let known: RealtimeEvent = serde_json::from_str(r#"{"type":"text-delta","delta":"ho"}"#)
        .unwrap();
    assert!(matches!(known, RealtimeEvent::TextDelta { delta } if delta == "ho"));

    let unknown: RealtimeEvent =
        serde_json::from_str(r#"{"type":"conversation.item.created"}"#).unwrap();
    assert!(matches!(unknown, RealtimeEvent::Unknown));
}
