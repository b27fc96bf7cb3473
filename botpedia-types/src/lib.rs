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

//! Shared wire types for the BotPedia realtime voice stack.
//!
//! This crate defines the contract between the relay (`botpedia-relay`) and
//! the browser client (`botpedia-client`): the session-negotiation payloads,
//! the relay error body, and the event-channel message vocabulary.
//! It is intentionally framework-agnostic: no axum, no web-sys.

pub mod error;
pub mod events;
pub mod session;

pub use error::ErrorBody;
pub use events::RealtimeEvent;
pub use session::{ClientSecret, HealthResponse, SdpPayload, SessionConfig, SessionCredential};
