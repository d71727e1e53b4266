//! Inputs sent from the frontend to the simulation.
//!
//! `FrameInput` is the per-tick action state; `SessionCommand`s are queued
//! and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::UpgradeId;

/// Actions currently held by one player slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSet {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub skill: bool,
}

impl ActionSet {
    /// Unnormalised movement direction on each axis (-1, 0 or 1).
    pub fn axis(&self) -> (f32, f32) {
        let dx = (self.right as i8 - self.left as i8) as f32;
        let dy = (self.down as i8 - self.up as i8) as f32;
        (dx, dy)
    }

    /// Union of two action sets. Used to merge both key schemes in solo.
    pub fn merge(self, other: ActionSet) -> ActionSet {
        ActionSet {
            up: self.up || other.up,
            down: self.down || other.down,
            left: self.left || other.left,
            right: self.right || other.right,
            fire: self.fire || other.fire,
            skill: self.skill || other.skill,
        }
    }
}

/// Complete input for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Action set per player slot.
    pub slots: [ActionSet; 2],
    /// Whether a pause key is held. Toggling is edge-triggered.
    pub pause: bool,
}

impl FrameInput {
    pub fn slot(&self, slot: u8) -> ActionSet {
        self.slots.get(slot as usize).copied().unwrap_or_default()
    }
}

/// Session-level actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionCommand {
    /// Pick one of the offered upgrades and advance to the next level.
    SelectUpgrade { id: UpgradeId },
    /// Pause or resume gameplay.
    TogglePause,
    /// Leave the run and return to the menu.
    ExitToMenu,
}
