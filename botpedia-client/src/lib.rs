//! This crate provides the client-side (browser) half of the BotPedia
//! realtime voice chat. It owns the local peer connection, the microphone
//! capture, the auxiliary event channel used to steer the remote session,
//! and the speech synthesis of completed turns.
//!
//! The crate makes no assumptions about the UI or the HTML of the client
//! app. The only DOM data it needs is the optional id of the `<audio>`
//! element into which remote audio should be rendered. UI frameworks can
//! observe the client either through the callbacks on
//! [`SessionClientOptions`] or by subscribing to the global event bus.
//!
//! # Outline of usage
//!
//! ```no_run
//! use botpedia_client::{SessionClient, SessionClientOptions};
//!
//! let options = SessionClientOptions {
//!     relay_url: "http://localhost:3000".to_string(),
//!     ..Default::default()
//! };
//! let client = SessionClient::new(options);
//!
//! client.connect().ok(); // at most one negotiation in flight
//! client.toggle_mute();  // valid once capture exists
//! client.hangup();       // idempotent, releases everything
//! ```
//!
//! ## Event subscription
//!
//! ```no_run
//! use botpedia_client::{subscribe_client_events, ClientEvent};
//!
//! let mut rx = subscribe_client_events();
//! wasm_bindgen_futures::spawn_local(async move {
//!     while let Ok(event) = rx.recv().await {
//!         match event {
//!             ClientEvent::TurnComplete(text) => log::info!("bot said: {text}"),
//!             _ => {}
//!         }
//!     }
//! });
//! ```

mod client;
mod connection;
mod constants;
mod event_bus;
mod events;
mod media;
mod speech;

pub use botpedia_types::RealtimeEvent;
pub use client::{SessionClient, SessionClientOptions, SessionState};
pub use event_bus::{emit_client_event, subscribe_client_events};
pub use events::ClientEvent;
pub use speech::TranscriptBuffer;
