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

//! Top-level session client.
//!
//! [`SessionClient`] drives one realtime voice session against the relay:
//! it captures the microphone, negotiates a WebRTC peer connection, and
//! turns data-channel events into spoken replies. The client is `Clone`
//! and cheap to pass into UI callbacks; all clones share one [`Inner`].
//!
//! Negotiation makes no retry attempts. Any failure rolls back every
//! resource acquired so far and returns the client to idle, so a page can
//! simply offer the user a "try again" button.

use crate::client::dispatch::{dispatch_event, DispatchAction};
use crate::client::state::SessionState;
use crate::connection::{fetch_answer, EventChannel, PeerSession};
use crate::constants::{DEFAULT_NEGOTIATION_TIMEOUT_MS, DEFAULT_SPEECH_LANG, EVENT_CHANNEL_LABEL};
use crate::event_bus::emit_client_event;
use crate::events::ClientEvent;
use crate::media::{LevelMeter, Microphone};
use crate::speech::{SpeechSynthesizer, TranscriptBuffer};
use anyhow::{anyhow, Context};
use botpedia_types::RealtimeEvent;
use log::{debug, error, info, warn};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Options passed to [`SessionClient::new`].
///
/// The callbacks let a UI react to session activity directly; the same
/// activity is also published on the client event bus for listeners that
/// are not wired into the page component tree.
pub struct SessionClientOptions {
    /// Base URL of the relay, e.g. `https://relay.example.com`.
    pub relay_url: String,

    /// DOM id of an `<audio>` element to play remote audio into.
    pub remote_audio_id: Option<String>,

    /// How long the offer/answer exchange may take before negotiation
    /// fails.
    pub negotiation_timeout_ms: u32,

    /// Tear the session down when the event channel reports an error.
    pub hangup_on_channel_error: bool,

    /// BCP 47 language tag for synthesized speech.
    pub speech_lang: String,

    pub on_connected: Rc<dyn Fn()>,
    pub on_negotiation_failed: Rc<dyn Fn(String)>,
    pub on_text_delta: Rc<dyn Fn(String)>,
    pub on_turn_complete: Rc<dyn Fn(String)>,
    pub on_channel_error: Rc<dyn Fn(String)>,

    /// When set, microphone input levels are sampled and reported here.
    pub on_mic_level: Option<Rc<dyn Fn(f32)>>,
}

impl Default for SessionClientOptions {
    fn default() -> Self {
        Self {
            relay_url: "http://127.0.0.1:3000".to_string(),
            remote_audio_id: None,
            negotiation_timeout_ms: DEFAULT_NEGOTIATION_TIMEOUT_MS,
            hangup_on_channel_error: true,
            speech_lang: DEFAULT_SPEECH_LANG.to_string(),
            on_connected: Rc::new(|| {}),
            on_negotiation_failed: Rc::new(|_| {}),
            on_text_delta: Rc::new(|_| {}),
            on_turn_complete: Rc::new(|_| {}),
            on_channel_error: Rc::new(|_| {}),
            on_mic_level: None,
        }
    }
}

struct Inner {
    options: SessionClientOptions,
    state: SessionState,
    /// Bumped on every connect and teardown. A spawned negotiation task
    /// carries the generation it was started with and goes inert as soon
    /// as the stored value moves past it, so an attempt suspended across
    /// a hangup/reconnect cycle can never act on a later attempt's
    /// resources.
    generation: u64,
    microphone: Option<Microphone>,
    level_meter: Option<LevelMeter>,
    peer: Option<PeerSession>,
    channel: Option<EventChannel>,
    transcript: TranscriptBuffer,
    speech: SpeechSynthesizer,
}

impl Inner {
    /// Releases every session resource and returns to idle.
    ///
    /// Safe to call in any state; returns whether a session (or a
    /// negotiation attempt) was actually active.
    fn teardown(&mut self) -> bool {
        let was_active = !self.state.is_idle();
        self.generation += 1;
        if let Some(channel) = self.channel.take() {
            channel.close();
        }
        self.peer = None;
        if let Some(mut meter) = self.level_meter.take() {
            meter.stop();
        }
        if let Some(microphone) = self.microphone.take() {
            microphone.stop();
        }
        self.speech.cancel();
        self.transcript.clear();
        self.state = self.state.reset();
        was_active
    }
}

#[derive(Clone)]
pub struct SessionClient {
    inner: Rc<RefCell<Inner>>,
    http: reqwest::Client,
}

impl SessionClient {
    pub fn new(options: SessionClientOptions) -> Self {
        let speech = SpeechSynthesizer::new(&options.speech_lang);
        Self {
            inner: Rc::new(RefCell::new(Inner {
                options,
                state: SessionState::Idle,
                generation: 0,
                microphone: None,
                level_meter: None,
                peer: None,
                channel: None,
                transcript: TranscriptBuffer::new(),
                speech,
            })),
            http: reqwest::Client::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.inner.borrow().state
    }

    pub fn is_connected(&self) -> bool {
        self.inner.borrow().state.is_connected()
    }

    pub fn is_muted(&self) -> bool {
        self.inner
            .borrow()
            .microphone
            .as_ref()
            .map(|m| m.is_muted())
            .unwrap_or(false)
    }

    /// Start a session. Fails immediately when one is already underway;
    /// a failed attempt returns the client to idle before reporting, so
    /// the caller may call `connect` again right away.
    pub fn connect(&self) -> anyhow::Result<()> {
        let generation = {
            let mut inner = self.inner.borrow_mut();
            inner.state = inner.state.begin_negotiation()?;
            inner.generation += 1;
            inner.generation
        };
        info!("starting session negotiation");

        let client = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = client.run_negotiation(generation).await {
                let reason = format!("{e:#}");
                error!("negotiation failed: {reason}");
                {
                    let mut inner = client.inner.borrow_mut();
                    // A hangup (or a newer attempt) superseded this one;
                    // whatever is stored now is not ours to tear down.
                    if inner.generation != generation {
                        return;
                    }
                    inner.teardown();
                }
                let cb = client.inner.borrow().options.on_negotiation_failed.clone();
                cb(reason.clone());
                emit_client_event(ClientEvent::NegotiationFailed(reason));
            }
        });
        Ok(())
    }

    async fn run_negotiation(&self, generation: u64) -> anyhow::Result<()> {
        let (relay_url, remote_audio_id, timeout, on_mic_level) = {
            let inner = self.inner.borrow();
            (
                inner.options.relay_url.clone(),
                inner.options.remote_audio_id.clone(),
                Duration::from_millis(inner.options.negotiation_timeout_ms as u64),
                inner.options.on_mic_level.clone(),
            )
        };

        let microphone = Microphone::capture()
            .await
            .map_err(|e| anyhow!("microphone capture failed: {e:?}"))?;
        {
            // Store immediately so a racing hangup releases the track.
            let mut inner = self.inner.borrow_mut();
            if inner.generation != generation {
                // Superseded while suspended in capture; release our own
                // acquisition and leave whatever is stored alone.
                microphone.stop();
                return Ok(());
            }
            if let Some(on_level) = on_mic_level {
                match LevelMeter::start(microphone.stream(), on_level) {
                    Ok(meter) => inner.level_meter = Some(meter),
                    // The meter is cosmetic, the session works without it.
                    Err(e) => warn!("level meter unavailable: {e:?}"),
                }
            }
            inner.microphone = Some(microphone);
        }

        let peer = PeerSession::new(remote_audio_id)
            .map_err(|e| anyhow!("peer connection setup failed: {e:?}"))?;
        {
            let inner = self.inner.borrow();
            let microphone = inner
                .microphone
                .as_ref()
                .context("microphone released during negotiation")?;
            let track = microphone
                .audio_track()
                .context("capture stream has no audio track")?;
            peer.add_audio_track(&track, microphone.stream());
        }

        // The channel must exist before the offer so it is negotiated in
        // the initial SDP.
        let raw_channel = peer.create_event_channel(EVENT_CHANNEL_LABEL);
        let channel = self.wire_event_channel(raw_channel);

        let offer = peer
            .create_offer_sdp()
            .await
            .map_err(|e| anyhow!("offer creation failed: {e:?}"))?;
        let answer = fetch_answer(&self.http, &relay_url, &offer, timeout).await?;
        peer.apply_answer(&answer)
            .await
            .map_err(|e| anyhow!("answer rejected: {e:?}"))?;

        let on_connected = {
            let mut inner = self.inner.borrow_mut();
            if inner.generation != generation {
                // Hung up (or reconnected) while we awaited; our locals
                // drop and clean up, the stored state belongs to someone
                // else.
                return Ok(());
            }
            inner.peer = Some(peer);
            inner.channel = Some(channel);
            inner.state = inner.state.complete_negotiation()?;
            inner.options.on_connected.clone()
        };
        info!("session connected");
        on_connected();
        emit_client_event(ClientEvent::Connected);
        Ok(())
    }

    fn wire_event_channel(&self, channel: web_sys::RtcDataChannel) -> EventChannel {
        let on_open = Rc::new(|| debug!("vendor event channel ready"));

        let event_client = self.clone();
        let on_event = Rc::new(move |event: RealtimeEvent| {
            event_client.handle_channel_event(event);
        });

        let error_client = self.clone();
        let on_error = Rc::new(move |message: String| {
            error_client.handle_channel_error(message);
        });

        EventChannel::new(channel, on_open, on_event, on_error)
    }

    fn handle_channel_event(&self, event: RealtimeEvent) {
        debug!("channel event: {}", event.tag());
        let action = {
            let mut inner = self.inner.borrow_mut();
            dispatch_event(event, &mut inner.transcript)
        };
        match action {
            DispatchAction::ConfigureSession => {
                self.send_control(&RealtimeEvent::SessionConfigure {
                    modalities: vec!["text".to_string()],
                    turn_detection: Some("server_vad".to_string()),
                });
                self.send_control(&RealtimeEvent::TurnRequest);
            }
            DispatchAction::AppendDelta(delta) => {
                let cb = self.inner.borrow().options.on_text_delta.clone();
                cb(delta.clone());
                emit_client_event(ClientEvent::TextDelta(delta));
            }
            DispatchAction::SpeakTurn(text) => {
                let cb = {
                    let inner = self.inner.borrow();
                    if let Err(e) = inner.speech.speak(&text) {
                        warn!("speech synthesis failed: {e:?}");
                    }
                    inner.options.on_turn_complete.clone()
                };
                cb(text.clone());
                emit_client_event(ClientEvent::TurnComplete(text));
            }
            DispatchAction::SurfaceError(message) => self.handle_channel_error(message),
            DispatchAction::Nothing => {}
        }
    }

    fn handle_channel_error(&self, message: String) {
        warn!("event channel error: {message}");
        let (cb, hangup) = {
            let inner = self.inner.borrow();
            (
                inner.options.on_channel_error.clone(),
                inner.options.hangup_on_channel_error,
            )
        };
        cb(message.clone());
        emit_client_event(ClientEvent::ChannelError(message));
        if hangup {
            self.hangup();
        }
    }

    /// Send a control event to the vendor over the data channel.
    /// A no-op when the channel is absent or not yet open.
    pub fn send_control(&self, event: &RealtimeEvent) {
        let inner = self.inner.borrow();
        match inner.channel.as_ref() {
            Some(channel) if channel.is_open() => {
                if let Err(e) = channel.send(event) {
                    warn!("failed to send {}: {e}", event.tag());
                }
            }
            _ => debug!("dropping {}: event channel not open", event.tag()),
        }
    }

    /// Flip the microphone mute flag, returning the new value.
    /// Returns `false` when no capture is active.
    pub fn toggle_mute(&self) -> bool {
        let muted = {
            let mut inner = self.inner.borrow_mut();
            let Some(microphone) = inner.microphone.as_mut() else {
                return false;
            };
            let muted = !microphone.is_muted();
            microphone.set_muted(muted);
            muted
        };
        emit_client_event(ClientEvent::MuteChanged(muted));
        muted
    }

    /// End the session and release all resources. Idempotent; calling
    /// while idle does nothing.
    pub fn hangup(&self) {
        let was_active = self.inner.borrow_mut().teardown();
        if was_active {
            info!("session ended");
            emit_client_event(ClientEvent::Disconnected);
        }
    }
}
