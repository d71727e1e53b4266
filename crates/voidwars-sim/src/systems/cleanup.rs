//! Cleanup system: the single end-of-tick despawn pass.

use hecs::{Entity, World};

use voidwars_core::components::{Body, Bullet};
use voidwars_core::enums::ProjectileKind;

/// Despawn every entity marked for removal, plus beams, which last one tick.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, body) in world.query_mut::<&Body>() {
        if body.marked_for_removal {
            despawn_buffer.push(entity);
        }
    }

    for (entity, (body, bullet)) in world.query_mut::<(&Body, &Bullet)>() {
        if bullet.kind == ProjectileKind::Beam && !body.marked_for_removal {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
