//! Per-frame input snapshots and edge detection

use serde::{Deserialize, Serialize};

/// Anything that can hand the loop an immutable snapshot of the controls.
///
/// Concrete keyboard/touch bindings live in `crate::platform`.
pub trait InputProvider<T> {
    fn snapshot(&self) -> T;
}

/// This frame's snapshot together with the previous one.
///
/// Edge-triggered actions ("press E to grab") compare the two instead of
/// consuming the live key set, so a held key can never repeat-trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFrame<T> {
    pub now: T,
    pub prev: T,
}

impl<T: Copy> InputFrame<T> {
    pub fn new(now: T, prev: T) -> Self {
        Self { now, prev }
    }

    /// A frame with no history (previous == current, so nothing is "just pressed")
    pub fn steady(now: T) -> Self {
        Self { now, prev: now }
    }

    #[inline]
    pub fn held(&self, button: impl Fn(&T) -> bool) -> bool {
        button(&self.now)
    }

    /// True only on the frame the button went down
    #[inline]
    pub fn pressed(&self, button: impl Fn(&T) -> bool) -> bool {
        button(&self.now) && !button(&self.prev)
    }
}

/// Horizontal facing of an avatar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    struct Buttons {
        grab: bool,
    }

    #[test]
    fn test_pressed_is_edge_triggered() {
        let down = Buttons { grab: true };
        let up = Buttons::default();

        let first = InputFrame::new(down, up);
        assert!(first.pressed(|b| b.grab));

        let held = InputFrame::new(down, down);
        assert!(held.held(|b| b.grab));
        assert!(!held.pressed(|b| b.grab));

        assert!(!InputFrame::steady(down).pressed(|b| b.grab));
    }
}
