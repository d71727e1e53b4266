//! Projectile and pickup kinematics: linear bullets, homing missiles,
//! stationary beams and falling power-ups.

use hecs::World;

use voidwars_core::components::{Body, Bullet, Enemy, PowerUp};
use voidwars_core::constants::*;
use voidwars_core::enums::ProjectileKind;
use voidwars_core::types::Vec2;

/// Move every live projectile one tick and cull those that left the field.
pub fn run(world: &mut World) {
    let target = homing_target(world);

    for (_entity, (body, bullet)) in world.query_mut::<(&mut Body, &Bullet)>() {
        if body.marked_for_removal {
            continue;
        }
        match bullet.kind {
            ProjectileKind::Beam => continue,
            ProjectileKind::Homing => {
                body.velocity = match target {
                    Some(target) => steer(body.center(), body.velocity, target),
                    None => body.velocity.clamp_length_max(HOMING_MAX_SPEED),
                };
            }
            ProjectileKind::Standard => {}
        }

        body.position += body.velocity;
        if body.position.y < -BULLET_CULL_MARGIN || body.position.y > PLAYFIELD_HEIGHT + BULLET_CULL_MARGIN {
            body.marked_for_removal = true;
        }
    }
}

/// Centre of the oldest live, non-obstacle enemy.
pub fn homing_target(world: &World) -> Option<Vec2> {
    world
        .query::<(&Body, &Enemy)>()
        .iter()
        .filter(|(_, (body, enemy))| !body.marked_for_removal && !enemy.kind.is_obstacle())
        .min_by_key(|(_, (_, enemy))| enemy.spawn_order)
        .map(|(_, (body, _))| body.center())
}

/// Accelerate toward `target`, then cap the speed. Zero-length vectors are
/// left untouched.
pub fn steer(position: Vec2, velocity: Vec2, target: Vec2) -> Vec2 {
    let offset = target - position;
    let distance = offset.length();
    if distance <= 0.0 {
        return velocity;
    }
    let steered = velocity + offset / distance * HOMING_ACCELERATION;
    steered.clamp_length_max(HOMING_MAX_SPEED)
}

/// Power-ups fall at a fixed speed and vanish past the bottom edge.
pub fn fall_power_ups(world: &mut World) {
    for (_entity, (body, _power_up)) in world.query_mut::<(&mut Body, &PowerUp)>() {
        body.position += body.velocity;
        if body.position.y > PLAYFIELD_HEIGHT {
            body.marked_for_removal = true;
        }
    }
}
