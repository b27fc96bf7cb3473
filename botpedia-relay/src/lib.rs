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

//! BotPedia realtime relay.
//!
//! A stateless single-hop forwarder between the browser client and the
//! vendor realtime endpoint. The relay attaches the server-held API key to
//! each outbound request and returns the vendor response verbatim (status,
//! body and content type unchanged) so the secret never reaches the
//! browser and the relay never has to track vendor protocol changes.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod upstream;
