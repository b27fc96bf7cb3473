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

//! Lifecycle of one conversation attempt.
//!
//! Transitions are deliberately narrow: `connect()` is only legal from
//! idle, completion is only legal while negotiating, and reset (hangup or
//! failure) is legal from anywhere and always lands on idle. No partially
//! connected state is observable from outside.

use anyhow::{bail, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Negotiating,
    Connected,
}

impl SessionState {
    /// Start a negotiation. Exactly one may be in flight per client.
    pub fn begin_negotiation(self) -> Result<Self> {
        match self {
            SessionState::Idle => Ok(SessionState::Negotiating),
            SessionState::Negotiating => bail!("a negotiation is already in flight"),
            SessionState::Connected => bail!("already connected; hang up first"),
        }
    }

    /// Finish a negotiation. A hangup may race the in-flight attempt; the
    /// late completion must then not resurrect the session, which is why
    /// this is only legal while still negotiating.
    pub fn complete_negotiation(self) -> Result<Self> {
        match self {
            SessionState::Negotiating => Ok(SessionState::Connected),
            other => bail!("negotiation completed while {other:?}"),
        }
    }

    /// Hangup or failure path. Always valid.
    pub fn reset(self) -> Self {
        SessionState::Idle
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, SessionState::Idle)
    }

    pub fn is_negotiating(&self) -> bool {
        matches!(self, SessionState::Negotiating)
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, SessionState::Connected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_full_cycle() {
        let state = SessionState::Idle;
        let state = state.begin_negotiation().unwrap();
        assert!(state.is_negotiating());
        let state = state.complete_negotiation().unwrap();
        assert!(state.is_connected());
        assert!(state.reset().is_idle());
    }

    #[test]
    fn second_negotiation_is_rejected() {
        let state = SessionState::Idle.begin_negotiation().unwrap();
        assert!(state.begin_negotiation().is_err());
    }

    #[test]
    fn connect_while_connected_is_rejected() {
        assert!(SessionState::Connected.begin_negotiation().is_err());
    }

    #[test]
    fn completion_after_reset_is_rejected() {
        // hangup() raced the in-flight negotiation
        let state = SessionState::Negotiating.reset();
        assert!(state.complete_negotiation().is_err());
    }

    #[test]
    fn reset_is_idempotent() {
        assert!(SessionState::Idle.reset().is_idle());
    }
}
