//! ECS components for hecs entities.
//!
//! Components are plain data. Game logic lives in systems; the only helpers
//! here are read-only accessors.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{Aabb, Vec2};

/// Shared spatial state of every simulated entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner.
    pub position: Vec2,
    /// Pixels per tick.
    pub velocity: Vec2,
    pub width: f32,
    pub height: f32,
    /// Cosmetic rotation in radians.
    pub rotation: f32,
    /// Set once; the cleanup pass despawns the entity at the end of the tick.
    pub marked_for_removal: bool,
}

impl Body {
    pub fn new(position: Vec2, velocity: Vec2, width: f32, height: f32) -> Self {
        Self {
            position,
            velocity,
            width,
            height,
            rotation: 0.0,
            marked_for_removal: false,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.position.x, self.position.y, self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.position + Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// A timed player modifier with an absolute expiry timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Buff {
    pub kind: BuffKind,
    pub expires_at_ms: f64,
}

/// Active-skill state machine: Ready → (activate) → cooling down → Ready.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillState {
    pub ready: bool,
    pub cooldown_remaining_ms: f64,
    pub active_remaining_ms: f64,
}

impl Default for SkillState {
    fn default() -> Self {
        Self {
            ready: true,
            cooldown_remaining_ms: 0.0,
            active_remaining_ms: 0.0,
        }
    }
}

impl SkillState {
    /// Duration-based skills are in effect while the active window is open.
    pub fn is_active(&self) -> bool {
        self.active_remaining_ms > 0.0
    }
}

/// A player ship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Input slot (0 or 1).
    pub slot: u8,
    pub class: ShipClass,
    pub hp: f32,
    pub max_hp: f32,
    /// Pixels per tick, mutable by upgrades.
    pub speed: f32,
    /// Milliseconds between shots, mutable by upgrades.
    pub fire_interval_ms: f64,
    /// Starts at 1.0 and only grows.
    pub damage_multiplier: f32,
    /// Starts at 1.0 and only shrinks.
    pub skill_cooldown_multiplier: f64,
    pub collision_resistance: f32,
    /// At most one entry per kind.
    pub buffs: Vec<Buff>,
    pub last_shot_ms: f64,
    pub skill: SkillState,
}

impl Player {
    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    pub fn has_buff(&self, kind: BuffKind) -> bool {
        self.buffs.iter().any(|b| b.kind == kind)
    }
}

/// Hostile entity, including bosses and obstacles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub hp: f32,
    pub max_hp: f32,
    /// Points awarded on death before the combo multiplier.
    pub score_value: u64,
    /// The enemy fires once the timestamp passes this value.
    pub shoot_at_ms: f64,
    /// Altitude at which an entering boss stops descending.
    pub hold_altitude: Option<f32>,
    /// Phase offset of periodic motion, in seconds.
    pub phase_offset: f32,
    pub movement: MovementPhase,
    /// Cosmetic spin in radians per tick.
    pub spin: f32,
    /// Increases with every enemy spawned; lower means older.
    pub spawn_order: u64,
}

/// A projectile from either side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub damage: f32,
    /// Eligible for the critical-strike roll on hit.
    pub can_crit: bool,
    pub from_enemy: bool,
    pub kind: ProjectileKind,
    /// Keeps going after a hit instead of being consumed.
    pub piercing: bool,
}

/// A collectible falling toward the players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
}

/// Cosmetic spark. Alpha equals remaining life.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub life: f32,
    pub max_life: f32,
}

/// Cosmetic rising combat number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingText {
    pub text: String,
    pub style: TextStyle,
    pub life: f32,
    pub scale: f32,
}
