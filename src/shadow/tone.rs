//! Tone input state machine, sway oscillator and echo queue
//!
//! ```text
//! idle --(tone key held)--> ringing (shadows solid) --(released)--> idle
//!             silence held: crystallized (no sway, max opacity)
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::consts::*;
use super::state::ShadowInput;
use crate::sim::{Effects, Rgb, Ripple};

/// A held note. Mutually exclusive with each other; precedence low > high > whisper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Low,
    High,
    Whisper,
}

impl Tone {
    pub fn from_input(input: &ShadowInput) -> Option<Tone> {
        if input.low {
            Some(Tone::Low)
        } else if input.high {
            Some(Tone::High)
        } else if input.whisper {
            Some(Tone::Whisper)
        } else {
            None
        }
    }
}

/// Whatever currently shapes the shadows: silence or one of the tones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Voice {
    Silence,
    Low,
    High,
    Whisper,
}

impl From<Tone> for Voice {
    fn from(tone: Tone) -> Self {
        match tone {
            Tone::Low => Voice::Low,
            Tone::High => Voice::High,
            Tone::Whisper => Voice::Whisper,
        }
    }
}

impl Voice {
    pub fn color(self) -> Rgb {
        match self {
            Voice::Silence => Rgb::WHITE,
            Voice::Low => Rgb(0xc68642),
            Voice::High => Rgb(0x87ceeb),
            Voice::Whisper => Rgb(0xdda0dd),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Voice::Silence => "Silence",
            Voice::Low => "Low",
            Voice::High => "High",
            Voice::Whisper => "Whisper",
        }
    }
}

/// A tone waiting to echo back
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingEcho {
    pub tone: Tone,
    /// Seconds until it fires
    pub delay: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToneState {
    pub current: Option<Tone>,
    pub silence: bool,
    pub crystallized: bool,
    /// Accumulated sway oscillator phase (radians)
    pub sway_phase: f32,
    pub echo_queue: Vec<PendingEcho>,
    pub echo: Option<Tone>,
    pub echo_timer: f32,
}

impl ToneState {
    /// Silence wins over any held tone
    pub fn active_voice(&self) -> Option<Voice> {
        if self.silence {
            Some(Voice::Silence)
        } else {
            self.current.map(Voice::from)
        }
    }

    pub fn is_ringing(&self) -> bool {
        self.active_voice().is_some()
    }

    /// Horizontal sway applied to projected shadows
    pub fn sway_offset(&self) -> f32 {
        if self.crystallized {
            0.0
        } else {
            self.sway_phase.sin() * SWAY_AMPLITUDE
        }
    }

    /// Read this frame's tone keys, run the echo queue and the sway oscillator
    ///
    /// `at` is the player's feet; ripples spawn just above it.
    pub fn update(&mut self, input: &ShadowInput, at: Vec2, dt: f32, fx: &mut Effects) {
        let tone = Tone::from_input(input);
        let was_silent = self.silence;
        self.silence = input.silence;

        if tone != self.current || self.silence != was_silent {
            if let Some(t) = tone.filter(|t| Some(*t) != self.current) {
                self.echo_queue.push(PendingEcho {
                    tone: t,
                    delay: ECHO_DELAY,
                });
            }
            self.current = tone;
            self.crystallized = self.silence;

            if let Some(voice) = self.active_voice() {
                fx.spawn_ripple(Ripple::new(
                    at - Vec2::new(0.0, 14.0),
                    5.0,
                    90.0,
                    NOTE_RIPPLE_LIFE,
                    voice.color(),
                ));
            }
        }

        self.run_echoes(at, dt, fx);

        if !self.crystallized && self.is_ringing() {
            self.sway_phase = (self.sway_phase + SWAY_RATE * dt).rem_euclid(std::f32::consts::TAU);
        }
    }

    fn run_echoes(&mut self, at: Vec2, dt: f32, fx: &mut Effects) {
        let mut fired = Vec::new();
        self.echo_queue.retain_mut(|echo| {
            echo.delay -= dt;
            if echo.delay <= 0.0 {
                fired.push(echo.tone);
                false
            } else {
                true
            }
        });

        for tone in fired {
            fx.spawn_ripple(Ripple::new(
                at - Vec2::new(0.0, 20.0),
                12.0,
                60.0,
                ECHO_RIPPLE_LIFE,
                Voice::from(tone).color(),
            ));
            self.echo = Some(tone);
            self.echo_timer = ECHO_DURATION;
            log::debug!("echo fired: {:?}", tone);
        }

        if self.echo_timer > 0.0 {
            self.echo_timer -= dt;
            if self.echo_timer <= 0.0 {
                self.echo_timer = 0.0;
                self.echo = None;
            }
        }
    }
}
