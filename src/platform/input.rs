//! Keyboard adapter
//!
//! Event callbacks only ever add or remove codes from the live set; the loop
//! asks for a snapshot once per frame.

use std::collections::HashSet;

use crate::boar::BoarInput;
use crate::shadow::ShadowInput;
use crate::sim::InputProvider;

/// Currently pressed `KeyboardEvent.code` values
#[derive(Debug, Clone, Default)]
pub struct KeySet {
    down: HashSet<String>,
}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, code: &str) {
        self.down.insert(code.to_owned());
    }

    pub fn key_up(&mut self, code: &str) {
        self.down.remove(code);
    }

    /// Forget everything, e.g. when the window loses focus and key-ups go missing
    pub fn clear(&mut self) {
        self.down.clear();
    }

    pub fn is_down(&self, code: &str) -> bool {
        self.down.contains(code)
    }

    fn any(&self, codes: &[&str]) -> bool {
        codes.iter().any(|c| self.is_down(c))
    }

    /// Codes a page should stop from scrolling it
    pub fn captures(code: &str) -> bool {
        matches!(
            code,
            "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight" | "Space"
        )
    }
}

const UP: &[&str] = &["ArrowUp", "KeyW"];
const DOWN: &[&str] = &["ArrowDown", "KeyS"];
const LEFT: &[&str] = &["ArrowLeft", "KeyA"];
const RIGHT: &[&str] = &["ArrowRight", "KeyD"];

impl InputProvider<BoarInput> for KeySet {
    fn snapshot(&self) -> BoarInput {
        BoarInput {
            up: self.any(UP),
            down: self.any(DOWN),
            left: self.any(LEFT),
            right: self.any(RIGHT),
            sprint: self.any(&["ShiftLeft", "ShiftRight"]),
        }
    }
}

impl InputProvider<ShadowInput> for KeySet {
    fn snapshot(&self) -> ShadowInput {
        ShadowInput {
            left: self.any(LEFT),
            right: self.any(RIGHT),
            up: self.any(UP),
            low: self.is_down("KeyZ"),
            high: self.is_down("KeyX"),
            whisper: self.is_down("KeyC"),
            silence: self.is_down("Space"),
            grab: self.is_down("KeyE"),
        }
    }
}
