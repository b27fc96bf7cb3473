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

//! Microphone capture for the local participant.
//!
//! [`Microphone::capture`] requests the user's permission and acquires an
//! audio-only stream. Mute flips the enabled flag on the live tracks
//! (keeping the capture warm); `stop()` releases the OS-level device and is
//! what hangup and failed negotiations must always reach. Dropping the
//! wrapper stops the tracks too, so a displaced capture can never leave
//! the device live.

use gloo_utils::window;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{MediaStream, MediaStreamConstraints, MediaStreamTrack};

pub struct Microphone {
    stream: MediaStream,
    muted: bool,
}

impl Microphone {
    /// Ask the browser for an audio-only capture. Resolves once the user
    /// grants (or has previously granted) permission; rejects on denial.
    pub async fn capture() -> Result<Self, JsValue> {
        let navigator = window().navigator();
        let media_devices = navigator.media_devices()?;

        let constraints = MediaStreamConstraints::new();
        constraints.set_audio(&JsValue::from_bool(true));
        constraints.set_video(&JsValue::from_bool(false));

        let promise = media_devices.get_user_media_with_constraints(&constraints)?;
        let stream: MediaStream = JsFuture::from(promise).await?.dyn_into()?;

        Ok(Self {
            stream,
            muted: false,
        })
    }

    pub fn stream(&self) -> &MediaStream {
        &self.stream
    }

    /// The capture's first audio track, which is what gets added to the
    /// peer connection.
    pub fn audio_track(&self) -> Option<MediaStreamTrack> {
        self.stream
            .get_audio_tracks()
            .get(0)
            .dyn_into::<MediaStreamTrack>()
            .ok()
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        for track in self.stream.get_audio_tracks().iter() {
            track
                .unchecked_into::<MediaStreamTrack>()
                .set_enabled(!muted);
        }
    }

    /// Release the device. The stream is unusable afterwards.
    pub fn stop(&self) {
        for track in self.stream.get_tracks().iter() {
            track.unchecked_into::<MediaStreamTrack>().stop();
        }
    }
}

impl Drop for Microphone {
    fn drop(&mut self) {
        self.stop();
    }
}
