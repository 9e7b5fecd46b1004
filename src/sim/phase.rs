//! Game phase state machine

use serde::{Deserialize, Serialize};

/// Current phase of a run
///
/// `Dead` and `Complete` are terminal: no transition leaves them, and the
/// tick functions return immediately while in either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting on the title screen
    #[default]
    Title,
    /// Active gameplay
    Playing,
    /// Avatar health reached zero
    Dead,
    /// Level goal reached
    Complete,
}

impl Phase {
    #[inline]
    pub fn is_playing(self) -> bool {
        self == Phase::Playing
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Dead | Phase::Complete)
    }

    /// Title -> Playing. Returns whether the transition happened.
    pub fn start(&mut self) -> bool {
        self.transition(Phase::Title, Phase::Playing)
    }

    /// Playing -> Dead
    pub fn kill(&mut self) -> bool {
        self.transition(Phase::Playing, Phase::Dead)
    }

    /// Playing -> Complete
    pub fn complete(&mut self) -> bool {
        self.transition(Phase::Playing, Phase::Complete)
    }

    fn transition(&mut self, from: Phase, to: Phase) -> bool {
        if *self == from {
            *self = to;
            true
        } else {
            false
        }
    }
}
