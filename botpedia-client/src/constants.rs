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

/// How long the relay round-trip may take before the attempt fails.
pub const DEFAULT_NEGOTIATION_TIMEOUT_MS: u32 = 15_000;

/// Label of the data channel carrying control/content events.
pub const EVENT_CHANNEL_LABEL: &str = "oai-events";

/// Language hint for synthesized speech.
pub const DEFAULT_SPEECH_LANG: &str = "es-CL";

/// Microphone level sampling period.
pub const LEVEL_METER_INTERVAL_MS: u32 = 50;

pub const LEVEL_METER_FFT_SIZE: u32 = 256;
