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

//! Application configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

/// Default persona prompt sent to the vendor when minting a credential.
pub const DEFAULT_INSTRUCTIONS: &str = "Eres el asistente de voz de BotPedia Chile, \
una enciclopedia conversacional sobre Chile. Responde siempre en español chileno, \
de forma breve, cercana y precisa. Si no sabes algo, dilo sin inventar.";

const DEFAULT_MODEL: &str = "gpt-realtime";
const DEFAULT_VOICE: &str = "verse";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_UPSTREAM_BASE: &str = "https://api.openai.com/v1";

/// Configuration for the relay.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP server (e.g. "0.0.0.0:3000").
    pub listen_addr: String,
    /// Vendor API key. `None` is tolerated at startup (with a warning) so
    /// that `/health` stays useful; session requests then fail with 500
    /// before any outbound call.
    pub api_key: Option<String>,
    /// Realtime model forwarded as the `model` query parameter.
    pub model: String,
    /// Voice requested when minting a credential.
    pub voice: String,
    /// System instructions attached in credential mode.
    pub instructions: String,
    /// Vendor API base (overridable so tests can point at a local fake).
    pub upstream_base: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Optional
    /// - `OPENAI_API_KEY` (warned about when absent)
    /// - `REALTIME_MODEL` (default: `"gpt-realtime"`)
    /// - `REALTIME_VOICE` (default: `"verse"`)
    /// - `LISTEN_ADDR` (default: `"0.0.0.0:3000"`)
    /// - `SYSTEM_INSTRUCTIONS` (default: built-in BotPedia Chile prompt)
    /// - `UPSTREAM_BASE_URL` (default: `"https://api.openai.com/v1"`)
    pub fn from_env() -> Result<Self, String> {
        let listen_addr =
            env::var("LISTEN_ADDR").unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());
        listen_addr
            .parse::<SocketAddr>()
            .map_err(|_| format!("LISTEN_ADDR is not a valid socket address: {listen_addr}"))?;

        let api_key = env::var("OPENAI_API_KEY").ok().filter(|s| !s.is_empty());

        let upstream_base = env::var("UPSTREAM_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_UPSTREAM_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            listen_addr,
            api_key,
            model: env::var("REALTIME_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            voice: env::var("REALTIME_VOICE").unwrap_or_else(|_| DEFAULT_VOICE.to_string()),
            instructions: env::var("SYSTEM_INSTRUCTIONS")
                .unwrap_or_else(|_| DEFAULT_INSTRUCTIONS.to_string()),
            upstream_base,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            voice: DEFAULT_VOICE.to_string(),
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
            upstream_base: DEFAULT_UPSTREAM_BASE.to_string(),
        }
    }

    #[test]
    fn defaults_are_well_formed() {
        let config = base_config();
        assert!(config.listen_addr.parse::<SocketAddr>().is_ok());
        assert!(!config.upstream_base.ends_with('/'));
    }
}
