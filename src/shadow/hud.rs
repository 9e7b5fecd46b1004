//! HUD projection for the platformer

use serde::Serialize;

use super::state::GameState;
use crate::sim::Phase;

const TUTORIAL_HINTS: [&str; 5] = [
    "Arrow keys to move",
    "Up to jump",
    "E to pick up a candle",
    "Hold Z, X or C to sing a tone",
    "Climb onto a shadow",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShadowHud {
    pub level: u32,
    /// "Low", "High", "Whisper", "Silence" or nothing
    pub voice: Option<&'static str>,
    pub echo: Option<&'static str>,
    pub crystallized: bool,
    pub shadow_count: usize,
    pub holding_light: bool,
    pub hint: Option<&'static str>,
    pub phase: Phase,
}

impl ShadowHud {
    pub fn from_state(state: &GameState) -> Self {
        let tones = &state.tones;
        Self {
            level: state.level.number,
            voice: tones.active_voice().map(|v| v.label()),
            echo: tones.echo.map(|t| crate::shadow::Voice::from(t).label()),
            crystallized: tones.crystallized,
            shadow_count: state.shadows.len(),
            holding_light: state.player.holding.is_some(),
            hint: TUTORIAL_HINTS.get(usize::from(state.tutorial_step)).copied(),
            phase: state.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shadow::Tone;

    #[test]
    fn test_hint_follows_tutorial() {
        let mut state = GameState::new(2);
        assert_eq!(ShadowHud::from_state(&state).hint, Some("Arrow keys to move"));
        state.tutorial_step = 5;
        assert_eq!(ShadowHud::from_state(&state).hint, None);
    }

    #[test]
    fn test_voice_labels() {
        let mut state = GameState::new(2);
        assert_eq!(ShadowHud::from_state(&state).voice, None);
        state.tones.current = Some(Tone::Whisper);
        assert_eq!(ShadowHud::from_state(&state).voice, Some("Whisper"));
        state.tones.silence = true;
        let hud = ShadowHud::from_state(&state);
        assert_eq!(hud.voice, Some("Silence"));
        assert_eq!(hud.level, 1);
    }
}
