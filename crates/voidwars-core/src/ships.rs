//! Static per-class ship stat table.

use serde::{Deserialize, Serialize};

use crate::enums::ShipClass;

/// Base stats of a ship class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipStats {
    pub hp: f32,
    /// Pixels per tick.
    pub speed: f32,
    /// Minimum milliseconds between shots.
    pub fire_interval_ms: f64,
    pub damage: f32,
    pub width: f32,
    pub height: f32,
    /// Fraction of ramming damage ignored, in [0, 1].
    pub collision_resistance: f32,
    pub skill_cooldown_ms: f64,
    /// Active window of the skill. Zero for instant skills.
    pub skill_duration_ms: f64,
}

/// Get the stat table for a ship class.
pub fn ship_stats(class: ShipClass) -> ShipStats {
    match class {
        ShipClass::Interceptor => ShipStats {
            hp: 60.0,
            speed: 7.0,
            fire_interval_ms: 150.0,
            damage: 12.0,
            width: 30.0,
            height: 30.0,
            collision_resistance: 0.0,
            skill_cooldown_ms: 10_000.0,
            skill_duration_ms: 3_000.0,
        },
        ShipClass::Cruiser => ShipStats {
            hp: 100.0,
            speed: 5.0,
            fire_interval_ms: 250.0,
            damage: 25.0,
            width: 40.0,
            height: 40.0,
            collision_resistance: 0.1,
            skill_cooldown_ms: 8_000.0,
            skill_duration_ms: 0.0,
        },
        ShipClass::Destroyer => ShipStats {
            hp: 180.0,
            speed: 3.0,
            fire_interval_ms: 400.0,
            damage: 50.0,
            width: 50.0,
            height: 50.0,
            collision_resistance: 0.2,
            skill_cooldown_ms: 15_000.0,
            // Visual only; the beam resolves in a single tick.
            skill_duration_ms: 1_000.0,
        },
        ShipClass::Spectre => ShipStats {
            hp: 40.0,
            speed: 9.0,
            fire_interval_ms: 600.0,
            damage: 80.0,
            width: 25.0,
            height: 35.0,
            collision_resistance: 0.0,
            skill_cooldown_ms: 12_000.0,
            skill_duration_ms: 3_000.0,
        },
        ShipClass::Titan => ShipStats {
            hp: 300.0,
            speed: 2.0,
            fire_interval_ms: 300.0,
            damage: 35.0,
            width: 60.0,
            height: 60.0,
            collision_resistance: 0.7,
            skill_cooldown_ms: 20_000.0,
            skill_duration_ms: 0.0,
        },
    }
}
