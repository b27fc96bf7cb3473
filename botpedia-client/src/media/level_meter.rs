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

//! Microphone input level sampling (the on-page VU meter).
//!
//! An `AudioContext` + `AnalyserNode` pair taps the capture stream and a
//! periodic timer reports the RMS level to a caller callback. The meter
//! owns the `AudioContext`, so stopping it releases the audio graph along
//! with the rest of the capture resources.

use crate::constants::{LEVEL_METER_FFT_SIZE, LEVEL_METER_INTERVAL_MS};
use gloo::timers::callback::Interval;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use web_sys::{AudioContext, MediaStream};

pub struct LevelMeter {
    context: AudioContext,
    interval: Option<Interval>,
}

impl LevelMeter {
    /// Start sampling `stream`, reporting levels in `0.0..=1.0`.
    pub fn start(stream: &MediaStream, on_level: Rc<dyn Fn(f32)>) -> Result<Self, JsValue> {
        let context = AudioContext::new()?;
        let source = context.create_media_stream_source(stream)?;
        let analyser = context.create_analyser()?;
        analyser.set_fft_size(LEVEL_METER_FFT_SIZE);
        source.connect_with_audio_node(&analyser)?;

        let mut samples = vec![0u8; analyser.frequency_bin_count() as usize];
        let interval = Interval::new(LEVEL_METER_INTERVAL_MS, move || {
            analyser.get_byte_time_domain_data(&mut samples);
            on_level(rms_level(&samples));
        });

        Ok(Self {
            context,
            interval: Some(interval),
        })
    }

    pub fn stop(&mut self) {
        if let Some(interval) = self.interval.take() {
            interval.cancel();
        }
        let _ = self.context.close();
    }
}

impl Drop for LevelMeter {
    fn drop(&mut self) {
        self.stop();
    }
}

/// RMS of byte-domain audio samples, normalized to `0.0..=1.0`.
/// Samples are centered on 128 (silence).
fn rms_level(samples: &[u8]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples
        .iter()
        .map(|&s| {
            let v = (s as f32 - 128.0) / 128.0;
            v * v
        })
        .sum();
    (sum / samples.len() as f32).sqrt()
}
