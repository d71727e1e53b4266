//! Collision & combat resolver.
//!
//! AABB overlap in a fixed order: player shots vs enemies, enemy shots vs
//! players, pickups vs players, then ramming. A boss kill completes the
//! level and ends resolution for the tick.

use hecs::{Entity, World};
use log::info;

use voidwars_core::components::{Body, Bullet, Enemy, Player, PowerUp};
use voidwars_core::constants::*;
use voidwars_core::enums::{EnemyKind, PowerUpKind, TextStyle, UpgradeId};
use voidwars_core::events::GameEvent;
use voidwars_core::types::{Aabb, Vec2};

use crate::abilities::is_protected;
use crate::config::Tuning;
use crate::rng::RandomSource;
use crate::session::{GameStats, SessionStats};
use crate::systems::timers::grant_buff;
use crate::upgrades::draw_choices;
use crate::world_setup;

/// Sparks scatter at this speed for hits, kills and contact.
const SPARK_SPEED: f32 = 5.0;

/// Mutable session state touched while resolving combat.
pub struct Combat<'a> {
    pub stats: &'a mut GameStats,
    pub session: &'a mut SessionStats,
    pub tuning: &'a Tuning,
    pub rng: &'a mut dyn RandomSource,
    pub fx: &'a mut dyn RandomSource,
    pub events: &'a mut Vec<GameEvent>,
    pub upgrade_choices: &'a mut Vec<UpgradeId>,
    pub timestamp_ms: f64,
}

/// Resolve every collision stage for this tick.
pub fn run(world: &mut World, combat: &mut Combat) {
    player_shots(world, combat);
    if combat.stats.level_complete {
        return;
    }
    enemy_shots(world, combat);
    pickups(world, combat);
    ramming(world, combat);
}

/// Living players in slot order.
fn living_players(world: &World) -> Vec<Entity> {
    let mut players: Vec<(Entity, u8)> = world
        .query::<&Player>()
        .iter()
        .filter(|(_, p)| p.is_alive())
        .map(|(e, p)| (e, p.slot))
        .collect();
    players.sort_by_key(|&(_, slot)| slot);
    players.into_iter().map(|(e, _)| e).collect()
}

fn live_enemies(world: &World) -> Vec<Entity> {
    world
        .query::<(&Body, &Enemy)>()
        .iter()
        .filter(|(_, (body, _))| !body.marked_for_removal)
        .map(|(e, _)| e)
        .collect()
}

fn aabb_of(world: &World, entity: Entity) -> Option<Aabb> {
    world.get::<&Body>(entity).ok().map(|b| b.aabb())
}

fn is_removed(world: &World, entity: Entity) -> bool {
    world
        .get::<&Body>(entity)
        .map(|b| b.marked_for_removal)
        .unwrap_or(true)
}

fn mark_removed(world: &mut World, entity: Entity) {
    if let Ok(mut body) = world.get::<&mut Body>(entity) {
        body.marked_for_removal = true;
    }
}

// --- Stage 1: player shots ---

fn player_shots(world: &mut World, combat: &mut Combat) {
    let shots: Vec<(Entity, Aabb, Bullet)> = world
        .query::<(&Body, &Bullet)>()
        .iter()
        .filter(|(_, (body, bullet))| !body.marked_for_removal && !bullet.from_enemy)
        .map(|(e, (body, bullet))| (e, body.aabb(), *bullet))
        .collect();
    let enemies = live_enemies(world);

    for (shot, area, bullet) in shots {
        for &enemy in &enemies {
            if is_removed(world, shot) {
                break;
            }
            if is_removed(world, enemy) {
                continue;
            }
            let Some(target) = aabb_of(world, enemy) else {
                continue;
            };
            if !area.overlaps(&target) {
                continue;
            }
            let Ok(kind) = world.get::<&Enemy>(enemy).map(|e| e.kind) else {
                continue;
            };

            if kind.is_obstacle() {
                if bullet.piercing {
                    continue;
                }
                mark_removed(world, shot);
                combat.events.push(GameEvent::ShotDeflected);
                world_setup::spawn_particles(world, combat.fx, area.min, HIT_PARTICLES, SPARK_SPEED);
                break;
            }

            let critical = bullet.can_crit && combat.rng.chance(combat.tuning.crit_chance);
            let damage = if critical {
                bullet.damage * combat.tuning.crit_multiplier
            } else {
                bullet.damage
            };

            if !bullet.piercing {
                mark_removed(world, shot);
            }
            let (dead, text_at) = {
                let Ok((body, target)) = world.query_one_mut::<(&Body, &mut Enemy)>(enemy) else {
                    continue;
                };
                target.hp -= damage;
                (target.hp <= 0.0, Vec2::new(body.center().x, body.position.y))
            };

            combat.events.push(GameEvent::EnemyHit { kind, damage, critical });
            let (label, style) = if critical {
                (format!("{}!", damage.round() as i64), TextStyle::Critical)
            } else {
                (format!("{}", damage.round() as i64), TextStyle::Damage)
            };
            world_setup::spawn_text(world, text_at, label, style);
            let sparks = if bullet.piercing {
                PIERCING_HIT_PARTICLES
            } else {
                HIT_PARTICLES
            };
            world_setup::spawn_particles(world, combat.fx, area.min, sparks, SPARK_SPEED);

            if dead {
                kill(world, combat, enemy, true);
                if combat.stats.level_complete {
                    return;
                }
            }
            if !bullet.piercing {
                break;
            }
        }
    }
}

/// Remove a dead enemy. Scored kills feed score, combo, drops and the
/// boss/mini-boss progression hooks.
pub fn kill(world: &mut World, combat: &mut Combat, entity: Entity, scored: bool) {
    let (kind, score_value, at, center) = {
        let Ok((body, enemy)) = world.query_one_mut::<(&mut Body, &Enemy)>(entity) else {
            return;
        };
        if body.marked_for_removal {
            return;
        }
        body.marked_for_removal = true;
        (enemy.kind, enemy.score_value, body.position, body.center())
    };
    world_setup::spawn_particles(world, combat.fx, center, KILL_PARTICLES, SPARK_SPEED);
    if !scored {
        return;
    }

    let stats = &mut *combat.stats;
    let score = (score_value as f64 * stats.combo_multiplier(combat.tuning.combo_step)).round() as u64;
    stats.score += score;
    stats.level_score += score;
    stats.combo += 1;
    stats.combo_window_ms = combat.tuning.combo_window_ms;
    combat.session.kills += 1;
    combat.session.best_combo = combat.session.best_combo.max(stats.combo);
    combat.events.push(GameEvent::EnemyKilled { kind, score });

    match kind {
        EnemyKind::Boss => {
            stats.level_complete = true;
            stats.paused = true;
            stats.boss_active = false;
            *combat.upgrade_choices = draw_choices(combat.rng);
            combat.session.bosses_killed += 1;
            info!("Level {} boss destroyed, score {}", stats.level, stats.score);
            combat.events.push(GameEvent::LevelComplete { level: stats.level });
        }
        EnemyKind::MiniBoss => {
            stats.mini_boss_active = false;
            info!("Mini-boss destroyed on level {}", stats.level);
            let dropped = world_setup::spawn_random_power_up(world, combat.rng, at);
            combat.events.push(GameEvent::PowerUpDropped { kind: dropped });
        }
        _ => {}
    }

    if combat.rng.chance(combat.tuning.power_up_drop_chance) {
        let dropped = world_setup::spawn_random_power_up(world, combat.rng, at);
        combat.events.push(GameEvent::PowerUpDropped { kind: dropped });
    }
}

/// Subtract `amount` from a player's hp, clamped at zero.
fn damage_player(world: &mut World, combat: &mut Combat, entity: Entity, amount: f32) {
    let Ok(mut player) = world.get::<&mut Player>(entity) else {
        return;
    };
    if !player.is_alive() {
        return;
    }
    let before = player.hp;
    player.hp = (player.hp - amount).max(0.0);
    let slot = player.slot;
    combat.events.push(GameEvent::PlayerDamaged {
        slot,
        amount: before - player.hp,
    });
    if player.hp <= 0.0 {
        info!("Player {} is down", slot);
        combat.events.push(GameEvent::PlayerDown { slot });
    }
}

// --- Stage 2: enemy shots ---

fn enemy_shots(world: &mut World, combat: &mut Combat) {
    let shots: Vec<(Entity, Aabb, f32)> = world
        .query::<(&Body, &Bullet)>()
        .iter()
        .filter(|(_, (body, bullet))| !body.marked_for_removal && bullet.from_enemy)
        .map(|(e, (body, bullet))| (e, body.aabb(), bullet.damage))
        .collect();
    let players = living_players(world);

    for (shot, area, damage) in shots {
        for &entity in &players {
            let hit = {
                let Ok((player, body)) = world.query_one_mut::<(&Player, &Body)>(entity) else {
                    continue;
                };
                if !player.is_alive() || is_protected(player) || !area.overlaps(&body.aabb()) {
                    continue;
                }
                body.center()
            };
            mark_removed(world, shot);
            damage_player(world, combat, entity, damage);
            world_setup::spawn_particles(world, combat.fx, hit, DAMAGE_TAKEN_PARTICLES, SPARK_SPEED);
            break;
        }
    }
}

// --- Stage 3: pickups ---

fn pickups(world: &mut World, combat: &mut Combat) {
    let drops: Vec<(Entity, Aabb, PowerUpKind)> = world
        .query::<(&Body, &PowerUp)>()
        .iter()
        .filter(|(_, (body, _))| !body.marked_for_removal)
        .map(|(e, (body, p))| (e, body.aabb(), p.kind))
        .collect();
    let players = living_players(world);

    for (drop, area, kind) in drops {
        for &entity in &players {
            let collected = {
                let Ok((player, body)) = world.query_one_mut::<(&mut Player, &Body)>(entity) else {
                    continue;
                };
                if !player.is_alive() || !area.overlaps(&body.aabb()) {
                    continue;
                }
                let healed = match kind.buff() {
                    Some(buff) => {
                        grant_buff(player, buff, combat.timestamp_ms + combat.tuning.buff_duration_ms);
                        None
                    }
                    None => {
                        let before = player.hp;
                        player.hp = (player.hp + HEALTH_PICKUP_AMOUNT).min(player.max_hp);
                        Some((player.hp - before, body.center()))
                    }
                };
                (player.slot, healed)
            };

            let (slot, healed) = collected;
            mark_removed(world, drop);
            combat.session.power_ups_collected += 1;
            combat.events.push(GameEvent::PowerUpCollected { slot, kind });
            if let Some((amount, at)) = healed {
                combat.events.push(GameEvent::PlayerHealed { slot, amount });
                world_setup::spawn_text(world, at, format!("+{}", amount.round() as i64), TextStyle::Heal);
            }
            break;
        }
    }
}

// --- Stage 4: ramming ---

fn ramming(world: &mut World, combat: &mut Combat) {
    let enemies = live_enemies(world);
    let players = living_players(world);

    for enemy in enemies {
        for &entity in &players {
            if is_removed(world, enemy) {
                break;
            }
            let Some(hull) = aabb_of(world, enemy) else {
                break;
            };
            let Ok(kind) = world.get::<&Enemy>(enemy).map(|e| e.kind) else {
                break;
            };
            let (protected, resistance, at) = {
                let Ok((player, body)) = world.query_one_mut::<(&Player, &Body)>(entity) else {
                    continue;
                };
                if !player.is_alive() || !hull.overlaps(&body.aabb()) {
                    continue;
                }
                (is_protected(player), player.collision_resistance, body.position)
            };

            if kind.is_obstacle() {
                let damage = (OBSTACLE_RAM_DAMAGE * (1.0 - resistance)).floor();
                damage_player(world, combat, entity, damage);
                world_setup::spawn_particles(world, combat.fx, at, RAM_PARTICLES, SPARK_SPEED);
                kill(world, combat, enemy, false);
                continue;
            }

            if protected {
                world_setup::spawn_particles(world, combat.fx, hull.min, CLEAR_PARTICLES, SPARK_SPEED);
            } else {
                let damage = (RAM_DAMAGE * (1.0 - resistance)).floor();
                damage_player(world, combat, entity, damage);
                world_setup::spawn_particles(world, combat.fx, at, RAM_PARTICLES, SPARK_SPEED);
            }

            if kind.is_boss() {
                let dead = {
                    let Ok(mut boss) = world.get::<&mut Enemy>(enemy) else {
                        break;
                    };
                    boss.hp -= BOSS_RAM_CHIP_DAMAGE;
                    boss.hp <= 0.0
                };
                if dead {
                    kill(world, combat, enemy, true);
                    if combat.stats.level_complete {
                        return;
                    }
                }
            } else {
                kill(world, combat, enemy, false);
            }
        }
    }
}
