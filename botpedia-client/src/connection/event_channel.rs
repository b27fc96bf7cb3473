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

//! Data channel carrying vendor session events as JSON text frames.
//!
//! Incoming frames are decoded into [`RealtimeEvent`] before reaching the
//! caller; frames that fail to decode are surfaced through the error
//! callback rather than dropped silently.

use botpedia_types::RealtimeEvent;
use log::{debug, warn};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{MessageEvent, RtcDataChannel};

pub struct EventChannel {
    channel: RtcDataChannel,
    open: Rc<Cell<bool>>,
    _onopen: Closure<dyn FnMut()>,
    _onmessage: Closure<dyn FnMut(MessageEvent)>,
    _onerror: Closure<dyn FnMut(web_sys::Event)>,
}

impl EventChannel {
    pub fn new(
        channel: RtcDataChannel,
        on_open: Rc<dyn Fn()>,
        on_event: Rc<dyn Fn(RealtimeEvent)>,
        on_error: Rc<dyn Fn(String)>,
    ) -> Self {
        let open = Rc::new(Cell::new(false));

        let open_flag = open.clone();
        let onopen = Closure::wrap(Box::new(move || {
            debug!("event channel open");
            open_flag.set(true);
            on_open();
        }) as Box<dyn FnMut()>);
        channel.set_onopen(Some(onopen.as_ref().unchecked_ref()));

        let error_cb = on_error.clone();
        let onmessage = Closure::wrap(Box::new(move |event: MessageEvent| {
            let Some(text) = event.data().as_string() else {
                warn!("ignoring non-text frame on event channel");
                return;
            };
            match serde_json::from_str::<RealtimeEvent>(&text) {
                Ok(event) => on_event(event),
                Err(e) => error_cb(format!("undecodable event frame: {e}")),
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        channel.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));

        let error_cb = on_error;
        let onerror = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            error_cb("event channel error".to_string());
        }) as Box<dyn FnMut(web_sys::Event)>);
        channel.set_onerror(Some(onerror.as_ref().unchecked_ref()));

        Self {
            channel,
            open,
            _onopen: onopen,
            _onmessage: onmessage,
            _onerror: onerror,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Serialize and send an event; fails when the channel is not open.
    pub fn send(&self, event: &RealtimeEvent) -> anyhow::Result<()> {
        if !self.open.get() {
            anyhow::bail!("event channel is not open");
        }
        let text = serde_json::to_string(event)?;
        self.channel
            .send_with_str(&text)
            .map_err(|e| anyhow::anyhow!("send failed: {e:?}"))?;
        Ok(())
    }

    pub fn close(&self) {
        self.open.set(false);
        self.channel.close();
    }
}

impl Drop for EventChannel {
    fn drop(&mut self) {
        self.channel.set_onopen(None);
        self.channel.set_onmessage(None);
        self.channel.set_onerror(None);
        self.channel.close();
    }
}
