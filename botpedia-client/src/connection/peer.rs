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

//! `RtcPeerConnection` wrapper for a single realtime audio session.
//!
//! The peer owns the handler [`Closure`]s registered on the connection, so
//! dropping the wrapper unregisters them and closes the connection.

use js_sys::{Array, Reflect};
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    HtmlAudioElement, MediaStream, MediaStreamTrack, RtcDataChannel, RtcPeerConnection,
    RtcSdpType, RtcSessionDescriptionInit, RtcTrackEvent,
};

pub struct PeerSession {
    pc: RtcPeerConnection,
    _ontrack: Closure<dyn FnMut(RtcTrackEvent)>,
    _onconnectionstatechange: Closure<dyn FnMut()>,
    _oniceconnectionstatechange: Closure<dyn FnMut()>,
}

impl PeerSession {
    /// Create a peer connection wired to play remote audio.
    ///
    /// When `remote_audio_id` names an `<audio>` element in the page, the
    /// first remote track is attached to it; otherwise remote audio is
    /// left unsunk and the page is expected to handle the track itself.
    pub fn new(remote_audio_id: Option<String>) -> Result<Self, JsValue> {
        let pc = RtcPeerConnection::new()?;

        let ontrack = Closure::wrap(Box::new(move |event: RtcTrackEvent| {
            if let Some(id) = &remote_audio_id {
                sink_remote_track(id, &event);
            }
        }) as Box<dyn FnMut(RtcTrackEvent)>);
        pc.set_ontrack(Some(ontrack.as_ref().unchecked_ref()));

        let state_pc = pc.clone();
        let onconnectionstatechange = Closure::wrap(Box::new(move || {
            debug!("peer connection state: {:?}", state_pc.connection_state());
        }) as Box<dyn FnMut()>);
        pc.set_onconnectionstatechange(Some(onconnectionstatechange.as_ref().unchecked_ref()));

        let ice_pc = pc.clone();
        let oniceconnectionstatechange = Closure::wrap(Box::new(move || {
            debug!("ice connection state: {:?}", ice_pc.ice_connection_state());
        }) as Box<dyn FnMut()>);
        pc.set_oniceconnectionstatechange(Some(
            oniceconnectionstatechange.as_ref().unchecked_ref(),
        ));

        Ok(Self {
            pc,
            _ontrack: ontrack,
            _onconnectionstatechange: onconnectionstatechange,
            _oniceconnectionstatechange: oniceconnectionstatechange,
        })
    }

    pub fn add_audio_track(&self, track: &MediaStreamTrack, stream: &MediaStream) {
        self.pc
            .add_track(track, stream, &Array::new());
    }

    /// Open an ordered data channel before the offer is created, so the
    /// channel rides in the initial SDP.
    pub fn create_event_channel(&self, label: &str) -> RtcDataChannel {
        self.pc.create_data_channel(label)
    }

    /// Create the local offer and install it as the local description,
    /// returning the offer SDP text.
    pub async fn create_offer_sdp(&self) -> Result<String, JsValue> {
        let offer = JsFuture::from(self.pc.create_offer()).await?;
        let sdp = Reflect::get(&offer, &JsValue::from_str("sdp"))?
            .as_string()
            .ok_or_else(|| JsValue::from_str("offer has no sdp field"))?;

        let description = RtcSessionDescriptionInit::new(RtcSdpType::Offer);
        description.set_sdp(&sdp);
        JsFuture::from(self.pc.set_local_description(&description)).await?;
        Ok(sdp)
    }

    /// Install the remote answer SDP.
    pub async fn apply_answer(&self, answer_sdp: &str) -> Result<(), JsValue> {
        let description = RtcSessionDescriptionInit::new(RtcSdpType::Answer);
        description.set_sdp(answer_sdp);
        JsFuture::from(self.pc.set_remote_description(&description)).await?;
        Ok(())
    }
}

impl Drop for PeerSession {
    fn drop(&mut self) {
        self.pc.set_ontrack(None);
        self.pc.set_onconnectionstatechange(None);
        self.pc.set_oniceconnectionstatechange(None);
        self.pc.close();
    }
}

fn sink_remote_track(element_id: &str, event: &RtcTrackEvent) {
    let Some(element) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(element_id))
    else {
        warn!("remote audio element #{element_id} not found");
        return;
    };
    let Ok(audio) = element.dyn_into::<HtmlAudioElement>() else {
        warn!("element #{element_id} is not an <audio> element");
        return;
    };
    let Ok(stream) = MediaStream::new_with_tracks(&Array::of1(&event.track())) else {
        warn!("failed to wrap remote track in a MediaStream");
        return;
    };
    audio.set_src_object(Some(&stream));
    let _ = audio.play();
}
