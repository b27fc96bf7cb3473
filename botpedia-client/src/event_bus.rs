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

//! Global event bus for framework-agnostic client events.
//!
//! A MPMC broadcast channel: any component can subscribe, the client emits.
//! Subscribers each receive every event independently.

use crate::events::ClientEvent;
use async_broadcast::{broadcast, Receiver, Sender};
use once_cell::sync::Lazy;
use std::ops::Deref;

const EVENT_BUS_CAPACITY: usize = 256;

static SENDER: Lazy<Sender<ClientEvent>> = Lazy::new(|| {
    let (mut s, r) = broadcast(EVENT_BUS_CAPACITY);
    s.set_overflow(true);

    // Keep one receiver alive in the background so the channel never closes
    // while no UI subscriber is attached.
    #[cfg(target_arch = "wasm32")]
    {
        let mut receiver = r;
        wasm_bindgen_futures::spawn_local(async move {
            while (receiver.recv().await).is_ok() {}
        });
    }

    // On native targets there is no task spawner to run a drain loop, so
    // leak the receiver instead. Overflow mode keeps the unpolled receiver
    // from ever blocking the sender.
    #[cfg(not(target_arch = "wasm32"))]
    std::mem::forget(r);

    s
});

/// Subscribe to client events.
///
/// Returns a receiver that will receive all future client events.
pub fn subscribe_client_events() -> Receiver<ClientEvent> {
    SENDER.new_receiver()
}

/// Emit an event to all current subscribers. Never blocks; when the channel
/// is saturated the oldest event is dropped first.
pub fn emit_client_event(event: ClientEvent) {
    let sender = SENDER.deref();
    if sender.receiver_count() == 0 {
        return;
    }
    let _ = sender.try_broadcast(event);
}
