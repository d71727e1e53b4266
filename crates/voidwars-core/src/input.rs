//! Fixed keyboard scheme.
//!
//! Adapters translate their pressed-key set into a [`FrameInput`]; the
//! simulation itself only ever sees action sets.

use crate::commands::{ActionSet, FrameInput};
use crate::enums::GameMode;

/// Key names bound to one player slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyScheme {
    pub up: &'static str,
    pub down: &'static str,
    pub left: &'static str,
    pub right: &'static str,
    pub fire: &'static str,
    pub skill: &'static str,
}

pub const PLAYER_ONE_KEYS: KeyScheme = KeyScheme {
    up: "KeyW",
    down: "KeyS",
    left: "KeyA",
    right: "KeyD",
    fire: "Space",
    skill: "KeyE",
};

pub const PLAYER_TWO_KEYS: KeyScheme = KeyScheme {
    up: "ArrowUp",
    down: "ArrowDown",
    left: "ArrowLeft",
    right: "ArrowRight",
    fire: "Enter",
    skill: "ShiftRight",
};

pub const PAUSE_KEYS: [&str; 2] = ["KeyP", "Escape"];

impl KeyScheme {
    pub fn actions<'a, I>(&self, pressed: I) -> ActionSet
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut set = ActionSet::default();
        for key in pressed {
            if key == self.up {
                set.up = true;
            } else if key == self.down {
                set.down = true;
            } else if key == self.left {
                set.left = true;
            } else if key == self.right {
                set.right = true;
            } else if key == self.fire {
                set.fire = true;
            } else if key == self.skill || (self.skill == "ShiftRight" && key == "ShiftLeft") {
                set.skill = true;
            }
        }
        set
    }
}

/// Build the frame input from the set of currently pressed key names.
/// In solo both schemes drive slot 0.
pub fn frame_input_from_keys(pressed: &[&str], mode: GameMode) -> FrameInput {
    let one = PLAYER_ONE_KEYS.actions(pressed.iter().copied());
    let two = PLAYER_TWO_KEYS.actions(pressed.iter().copied());
    let slots = match mode {
        GameMode::Solo => [one.merge(two), ActionSet::default()],
        GameMode::Coop => [one, two],
    };
    FrameInput {
        slots,
        pause: pressed.iter().any(|k| PAUSE_KEYS.contains(k)),
    }
}
