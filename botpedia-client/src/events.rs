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

//! Framework-agnostic event types for the session client.
//!
//! These events are emitted via the event bus and can be subscribed to by
//! any frontend framework (Yew, Dioxus, Leptos, plain JS via wasm-bindgen).

/// Events emitted by the [`SessionClient`](crate::SessionClient) that UI
/// frameworks can subscribe to.
#[derive(Clone, Debug)]
pub enum ClientEvent {
    // === Connection events ===
    /// Negotiation finished; the peer connection is live.
    Connected,

    /// A `connect()` attempt failed; all acquired resources were released.
    NegotiationFailed(String),

    /// The session was torn down (hangup or fatal channel error).
    Disconnected,

    // === Conversation events ===
    /// Incremental text fragment of the turn in progress.
    TextDelta(String),

    /// A turn completed; payload is the full accumulated text.
    TurnComplete(String),

    /// The event channel reported an error.
    ChannelError(String),

    // === Capture events ===
    /// The microphone mute flag changed.
    MuteChanged(bool),
}
