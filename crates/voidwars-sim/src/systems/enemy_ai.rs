//! Enemy AI system: movement, escape and fire for every live enemy.
//!
//! Calls the behavior FSM from voidwars-ai to compute velocities and phase
//! transitions, then updates ECS components accordingly.

use hecs::{Entity, World};
use log::debug;

use voidwars_core::components::{Body, Enemy};
use voidwars_core::constants::{ENEMY_FIRE_JITTER_MS, PLAYFIELD_WIDTH};
use voidwars_core::enums::MovementPhase;
use voidwars_core::events::GameEvent;
use voidwars_core::types::Vec2;

use voidwars_ai::behavior::{evaluate, has_escaped, should_fire, EnemyContext};
use voidwars_ai::profiles::volley;

use crate::rng::RandomSource;
use crate::world_setup;

/// Run the enemy AI: evaluate the FSM for each enemy, move it, then fire.
pub fn run(
    world: &mut World,
    rng: &mut dyn RandomSource,
    level: u32,
    timestamp_ms: f64,
    events: &mut Vec<GameEvent>,
) {
    // Move
    for (entity, (body, enemy)) in world.query_mut::<(&mut Body, &mut Enemy)>() {
        if body.marked_for_removal {
            continue;
        }
        let ctx = EnemyContext {
            kind: enemy.kind,
            movement: enemy.movement,
            position: body.position,
            velocity: body.velocity,
            width: body.width,
            hold_altitude: enemy.hold_altitude,
            phase_offset: enemy.phase_offset,
            timestamp_ms,
        };
        let update = evaluate(&ctx);
        if update.movement_changed {
            debug!("{:?} {:?} reached {:?}", enemy.kind, entity, update.new_movement);
        }
        enemy.movement = update.new_movement;
        body.velocity = update.new_velocity;
        body.position += body.velocity;
        if update.clamp_x {
            body.position.x = body.position.x.clamp(0.0, PLAYFIELD_WIDTH - body.width);
        }
        body.rotation += enemy.spin;

        if has_escaped(body.position) {
            body.marked_for_removal = true;
            events.push(GameEvent::EnemyEscaped { kind: enemy.kind });
        }
    }

    // Fire. Entering bosses hold fire until they are in position.
    let mut shooters: Vec<(Entity, Vec2)> = Vec::new();
    for (entity, (body, enemy)) in world.query::<(&Body, &Enemy)>().iter() {
        if body.marked_for_removal || enemy.movement == MovementPhase::Entering {
            continue;
        }
        if should_fire(enemy.kind, enemy.shoot_at_ms, timestamp_ms) {
            let muzzle = Vec2::new(body.center().x, body.position.y + body.height);
            shooters.push((entity, muzzle));
        }
    }

    for (entity, muzzle) in shooters {
        let Ok(kind) = world.get::<&Enemy>(entity).map(|e| e.kind) else {
            continue;
        };
        let Some(salvo) = volley(kind, level) else {
            continue;
        };
        for velocity in &salvo.velocities {
            world_setup::spawn_enemy_bullet(
                world,
                muzzle,
                *velocity,
                salvo.bullet_width,
                salvo.bullet_height,
                salvo.damage,
            );
        }
        let jitter = if salvo.jittered {
            rng.next_unit() * ENEMY_FIRE_JITTER_MS
        } else {
            0.0
        };
        if let Ok(mut enemy) = world.get::<&mut Enemy>(entity) {
            enemy.shoot_at_ms = timestamp_ms + salvo.reload_ms + jitter;
        }
    }
}
