//! Skill activation: the shared Ready → Activating → OnCooldown state
//! machine and application of the class ability's effects.

use hecs::{Entity, World};
use log::debug;

use voidwars_core::components::{Body, Player};
use voidwars_core::enums::TextStyle;
use voidwars_core::events::GameEvent;
use voidwars_core::ships::ship_stats;

use crate::abilities::{ability_for, AbilityContext, SkillEffect};
use crate::rng::RandomSource;
use crate::systems::timers::grant_buff;
use crate::world_setup;

/// Beam bursts scatter faster than hit sparks.
const BURST_SPEED: f32 = 10.0;

/// Try to activate the skill of `entity`. A no-op unless the skill is ready.
/// Returns whether the skill fired.
pub fn activate(
    world: &mut World,
    entity: Entity,
    timestamp_ms: f64,
    fx: &mut dyn RandomSource,
    events: &mut Vec<GameEvent>,
) -> bool {
    let (slot, class, effects) = {
        let Ok((player, body)) = world.query_one_mut::<(&mut Player, &Body)>(entity) else {
            return false;
        };
        if !player.skill.ready {
            return false;
        }

        let stats = ship_stats(player.class);
        player.skill.ready = false;
        player.skill.cooldown_remaining_ms = stats.skill_cooldown_ms * player.skill_cooldown_multiplier;
        player.skill.active_remaining_ms = stats.skill_duration_ms;

        let ability = ability_for(player.class);
        let effects = ability.on_activate(&AbilityContext {
            player,
            body,
            timestamp_ms,
        });
        (player.slot, player.class, effects)
    };

    debug!("Slot {} activated {:?} skill", slot, class);
    events.push(GameEvent::SkillActivated { slot, class });

    for effect in effects {
        apply_effect(world, entity, slot, effect, timestamp_ms, fx, events);
    }
    true
}

fn apply_effect(
    world: &mut World,
    entity: Entity,
    slot: u8,
    effect: SkillEffect,
    timestamp_ms: f64,
    fx: &mut dyn RandomSource,
    events: &mut Vec<GameEvent>,
) {
    match effect {
        SkillEffect::SpawnMissiles { origin, count, damage } => {
            world_setup::spawn_missiles(world, origin, count, damage);
        }
        SkillEffect::SpawnBeam { area, damage } => {
            world_setup::spawn_beam(world, area, damage);
        }
        SkillEffect::Heal { amount } => {
            let healed = {
                let Ok((player, body)) = world.query_one_mut::<(&mut Player, &Body)>(entity) else {
                    return;
                };
                let before = player.hp;
                player.hp = (player.hp + amount).min(player.max_hp);
                (player.hp - before, body.center())
            };
            let (gained, at) = healed;
            events.push(GameEvent::PlayerHealed { slot, amount: gained });
            world_setup::spawn_text(world, at, format!("+{}", gained.round() as i64), TextStyle::Heal);
        }
        SkillEffect::GrantBuff { kind, duration_ms } => {
            if let Ok(mut player) = world.get::<&mut Player>(entity) {
                grant_buff(&mut player, kind, timestamp_ms + duration_ms);
            }
        }
        SkillEffect::ParticleBurst { at, count } => {
            world_setup::spawn_particles(world, fx, at, count, BURST_SPEED);
        }
    }
}
