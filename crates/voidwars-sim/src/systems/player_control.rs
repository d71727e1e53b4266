//! Player control system: skill activation, movement and firing for every
//! living player, driven by that player's action set.

use hecs::{Entity, World};

use voidwars_core::commands::FrameInput;
use voidwars_core::components::{Body, Player};
use voidwars_core::constants::*;
use voidwars_core::enums::BuffKind;
use voidwars_core::events::GameEvent;
use voidwars_core::ships::ship_stats;
use voidwars_core::types::Vec2;

use crate::abilities::active_ability;
use crate::rng::RandomSource;
use crate::systems::skills;
use crate::world_setup;

pub fn run(
    world: &mut World,
    input: &FrameInput,
    timestamp_ms: f64,
    fx: &mut dyn RandomSource,
    events: &mut Vec<GameEvent>,
) {
    let mut players: Vec<(Entity, u8)> = world
        .query::<&Player>()
        .iter()
        .filter(|(_, p)| p.is_alive())
        .map(|(e, p)| (e, p.slot))
        .collect();
    players.sort_by_key(|&(_, slot)| slot);

    for (entity, slot) in players {
        let actions = input.slot(slot);

        if actions.skill {
            skills::activate(world, entity, timestamp_ms, fx, events);
        }

        let shot = {
            let Ok((player, body)) = world.query_one_mut::<(&mut Player, &mut Body)>(entity) else {
                continue;
            };

            // Movement
            let (mut dx, mut dy) = actions.axis();
            if dx != 0.0 && dy != 0.0 {
                dx *= std::f32::consts::FRAC_1_SQRT_2;
                dy *= std::f32::consts::FRAC_1_SQRT_2;
            }
            body.velocity = Vec2::new(dx, dy) * effective_speed(player);
            body.position += body.velocity;
            body.position.x = body.position.x.clamp(0.0, PLAYFIELD_WIDTH - body.width);
            body.position.y = body.position.y.clamp(0.0, PLAYFIELD_HEIGHT - body.height);

            // Firing
            let interval = effective_fire_interval(player);
            if actions.fire && timestamp_ms - player.last_shot_ms > interval {
                player.last_shot_ms = timestamp_ms;
                let damage = ship_stats(player.class).damage * player.damage_multiplier;
                Some((*body, damage))
            } else {
                None
            }
        };

        if let Some((body, damage)) = shot {
            world_setup::spawn_player_bullet(world, &body, damage);
        }
    }
}

/// Effective movement speed of a player this tick, with buffs and skill.
pub fn effective_speed(player: &Player) -> f32 {
    let mut speed = player.speed;
    if player.has_buff(BuffKind::Speed) {
        speed *= SPEED_BUFF_MULTIPLIER;
    }
    if let Some(a) = active_ability(player) {
        speed *= a.speed_multiplier();
    }
    speed
}

/// Effective minimum time between shots, with buffs and skill.
pub fn effective_fire_interval(player: &Player) -> f64 {
    let mut interval = player.fire_interval_ms;
    if player.has_buff(BuffKind::RapidFire) {
        interval /= RAPID_FIRE_DIVISOR;
    }
    if let Some(a) = active_ability(player) {
        interval /= a.fire_interval_divisor();
    }
    interval
}
