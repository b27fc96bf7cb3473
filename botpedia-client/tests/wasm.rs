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

//! Browser-side integration tests for the session client lifecycle.

#![cfg(target_arch = "wasm32")]

use botpedia_client::{RealtimeEvent, SessionClient, SessionClientOptions, SessionState};
use gloo_timers::future::TimeoutFuture;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

/// Poll `pred` every 25 ms until it holds or `max_ms` elapses.
async fn settle(pred: impl Fn() -> bool, max_ms: u32) -> bool {
    let mut waited = 0u32;
    loop {
        if pred() {
            return true;
        }
        if waited >= max_ms {
            return false;
        }
        TimeoutFuture::new(25).await;
        waited += 25;
    }
}

/// Options whose negotiation can never succeed (nothing listens on the
/// relay port), counting every reported outcome.
fn doomed_options(outcomes: &Rc<Cell<u32>>) -> SessionClientOptions {
    let failed = outcomes.clone();
    let connected = outcomes.clone();
    SessionClientOptions {
        relay_url: "http://127.0.0.1:9".to_string(),
        negotiation_timeout_ms: 500,
        on_negotiation_failed: Rc::new(move |_| failed.set(failed.get() + 1)),
        on_connected: Rc::new(move || connected.set(connected.get() + 1)),
        ..Default::default()
    }
}

#[wasm_bindgen_test]
fn new_client_is_idle() {
    let client = SessionClient::new(SessionClientOptions::default());
    assert_eq!(client.state(), SessionState::Idle);
    assert!(!client.is_connected());
}

#[wasm_bindgen_test]
fn connect_moves_to_negotiating_synchronously() {
    let client = SessionClient::new(SessionClientOptions::default());
    client.connect().unwrap();
    assert_eq!(client.state(), SessionState::Negotiating);
    client.hangup();
}

#[wasm_bindgen_test]
fn second_connect_is_rejected_while_negotiating() {
    let client = SessionClient::new(SessionClientOptions::default());
    client.connect().unwrap();
    assert!(client.connect().is_err());
    client.hangup();
}

#[wasm_bindgen_test]
fn hangup_is_idempotent() {
    let client = SessionClient::new(SessionClientOptions::default());
    client.connect().unwrap();
    client.hangup();
    assert_eq!(client.state(), SessionState::Idle);
    // A second hangup from idle must be a no-op.
    client.hangup();
    assert_eq!(client.state(), SessionState::Idle);
}

#[wasm_bindgen_test]
fn hangup_cancels_an_in_flight_negotiation() {
    let client = SessionClient::new(SessionClientOptions::default());
    client.connect().unwrap();
    client.hangup();
    // The spawned negotiation task sees the reset state and must not
    // resurrect the session once it resumes.
    assert_eq!(client.state(), SessionState::Idle);
    assert!(!client.is_connected());
}

#[wasm_bindgen_test]
fn send_control_without_a_channel_is_a_no_op() {
    let client = SessionClient::new(SessionClientOptions::default());
    client.send_control(&RealtimeEvent::TurnRequest);
    assert_eq!(client.state(), SessionState::Idle);
}

#[wasm_bindgen_test]
fn toggle_mute_without_capture_reports_unmuted() {
    let client = SessionClient::new(SessionClientOptions::default());
    assert!(!client.toggle_mute());
}

#[wasm_bindgen_test]
async fn failed_connect_rolls_back_to_idle() {
    let outcomes = Rc::new(Cell::new(0u32));
    let client = SessionClient::new(doomed_options(&outcomes));
    client.connect().unwrap();

    // Whichever step fails first (capture denial, unreachable relay,
    // timeout), the attempt must report exactly once and land on idle
    // with the capture released.
    assert!(settle(|| outcomes.get() > 0, 10_000).await);
    assert_eq!(client.state(), SessionState::Idle);
    assert!(!client.is_connected());
    assert!(!client.is_muted());

    // Everything was rolled back, so a fresh attempt is legal again.
    client.connect().unwrap();
    client.hangup();
}

#[wasm_bindgen_test]
async fn superseded_attempt_reports_no_outcome() {
    let outcomes = Rc::new(Cell::new(0u32));
    let client = SessionClient::new(doomed_options(&outcomes));

    // Attempt #1 suspends in capture; the hangup supersedes it before a
    // second, equally doomed attempt starts.
    client.connect().unwrap();
    client.hangup();
    client.connect().unwrap();

    assert!(settle(|| outcomes.get() > 0, 10_000).await);
    // Let the superseded first task resume and notice it is stale. It
    // must neither report an outcome nor tear down the second attempt's
    // state.
    TimeoutFuture::new(1_000).await;
    assert_eq!(outcomes.get(), 1);
    assert_eq!(client.state(), SessionState::Idle);
}

#[wasm_bindgen_test]
fn connect_is_legal_again_after_hangup() {
    let client = SessionClient::new(SessionClientOptions::default());
    client.connect().unwrap();
    client.hangup();
    client.connect().unwrap();
    assert_eq!(client.state(), SessionState::Negotiating);
    client.hangup();
}
