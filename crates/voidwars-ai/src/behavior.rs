//! Enemy behavior finite state machine.
//!
//! Pure functions that compute movement-phase transitions and velocity
//! adjustments for enemies based on their kind, current phase and position.
//! No ECS dependency; operates on plain data.

use glam::Vec2;
use voidwars_core::constants::{BOSS_DESCENT_SPEED, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use voidwars_core::enums::{EnemyKind, MovementPhase};

use crate::profiles::get_boss_profile;

/// Input to the behavior FSM for a single enemy.
pub struct EnemyContext {
    pub kind: EnemyKind,
    pub movement: MovementPhase,
    /// Top-left corner.
    pub position: Vec2,
    pub velocity: Vec2,
    pub width: f32,
    /// Altitude at which an entering boss stops descending.
    pub hold_altitude: Option<f32>,
    /// Seconds added to the strafe sine argument.
    pub phase_offset: f32,
    pub timestamp_ms: f64,
}

/// Output from the behavior FSM. The caller applies `new_velocity` to the
/// position this tick.
pub struct EnemyUpdate {
    pub new_movement: MovementPhase,
    pub new_velocity: Vec2,
    pub movement_changed: bool,
    /// Keep the horizontal position inside the playfield after moving.
    pub clamp_x: bool,
}

/// Evaluate the FSM for one enemy.
pub fn evaluate(ctx: &EnemyContext) -> EnemyUpdate {
    match ctx.kind {
        EnemyKind::Boss | EnemyKind::MiniBoss => evaluate_boss(ctx),
        EnemyKind::Fast => EnemyUpdate {
            new_movement: ctx.movement,
            new_velocity: bounce_off_walls(ctx),
            movement_changed: false,
            clamp_x: false,
        },
        // Basic and tank fall straight; obstacles drift.
        EnemyKind::Basic | EnemyKind::Tank | EnemyKind::Asteroid => EnemyUpdate {
            new_movement: ctx.movement,
            new_velocity: ctx.velocity,
            movement_changed: false,
            clamp_x: false,
        },
    }
}

fn evaluate_boss(ctx: &EnemyContext) -> EnemyUpdate {
    let hold = ctx.hold_altitude.unwrap_or(ctx.position.y);

    match ctx.movement {
        MovementPhase::Entering => {
            let remaining = hold - ctx.position.y;
            if remaining > BOSS_DESCENT_SPEED {
                EnemyUpdate {
                    new_movement: MovementPhase::Entering,
                    new_velocity: Vec2::new(0.0, BOSS_DESCENT_SPEED),
                    movement_changed: false,
                    clamp_x: true,
                }
            } else {
                // Land exactly on the hold altitude.
                EnemyUpdate {
                    new_movement: MovementPhase::Engaged,
                    new_velocity: Vec2::new(0.0, remaining.max(0.0)),
                    movement_changed: true,
                    clamp_x: true,
                }
            }
        }
        MovementPhase::Engaged => {
            let profile = get_boss_profile(ctx.kind == EnemyKind::MiniBoss);
            let t = (ctx.timestamp_ms / 1000.0) as f32 + ctx.phase_offset;
            EnemyUpdate {
                new_movement: MovementPhase::Engaged,
                new_velocity: Vec2::new(t.sin() * profile.strafe_amplitude, 0.0),
                movement_changed: false,
                clamp_x: true,
            }
        }
    }
}

/// Reverse horizontal velocity when touching a side wall while heading into it.
fn bounce_off_walls(ctx: &EnemyContext) -> Vec2 {
    let mut v = ctx.velocity;
    let at_left = ctx.position.x <= 0.0 && v.x < 0.0;
    let at_right = ctx.position.x + ctx.width >= PLAYFIELD_WIDTH && v.x > 0.0;
    if at_left || at_right {
        v.x = -v.x;
    }
    v
}

/// Whether an enemy has left the bottom of the playfield.
pub fn has_escaped(position: Vec2) -> bool {
    position.y > PLAYFIELD_HEIGHT
}

/// Whether an enemy fires this tick.
pub fn should_fire(kind: EnemyKind, shoot_at_ms: f64, timestamp_ms: f64) -> bool {
    !kind.is_obstacle() && timestamp_ms > shoot_at_ms
}
