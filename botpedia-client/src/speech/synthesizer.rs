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

//! Thin wrapper over the browser's SpeechSynthesis engine.
//!
//! The engine keeps its own utterance queue; this wrapper only enqueues and
//! cancels. `cancel()` flushes the whole queue, which is exactly the
//! teardown behavior hangup needs.

use gloo_utils::window;
use log::error;
use wasm_bindgen::JsValue;
use web_sys::SpeechSynthesisUtterance;

pub struct SpeechSynthesizer {
    lang: String,
}

impl SpeechSynthesizer {
    /// `lang` is a BCP 47 tag, e.g. `"es-CL"`.
    pub fn new(lang: &str) -> Self {
        Self {
            lang: lang.to_string(),
        }
    }

    /// Queue one utterance. Empty text is a no-op.
    pub fn speak(&self, text: &str) -> Result<(), JsValue> {
        if text.trim().is_empty() {
            return Ok(());
        }
        let synth = window().speech_synthesis()?;
        let utterance = SpeechSynthesisUtterance::new_with_text(text)?;
        utterance.set_lang(&self.lang);
        synth.speak(&utterance);
        Ok(())
    }

    /// Drop the current utterance and everything queued behind it.
    pub fn cancel(&self) {
        match window().speech_synthesis() {
            Ok(synth) => synth.cancel(),
            Err(e) => error!("speech synthesis unavailable: {e:?}"),
        }
    }
}
